//! The shipped config file must load and match the documented defaults.

use std::path::Path;
use std::time::Duration;

use eos_insights::config::{self, DEFAULT_WELCOME};
use eos_insights::console::View;

#[test]
fn shipped_config_loads() {
    let cfg = config::load_from(Path::new("config/default.toml"), None, None).unwrap();
    assert_eq!(cfg.app_name, "EOS Insights");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.chat.reply_delay, Duration::from_millis(1000));
    assert_eq!(cfg.chat.welcome.as_deref(), Some(DEFAULT_WELCOME));
    assert_eq!(cfg.console.start_view, View::Dashboard);
}

#[test]
fn shipped_log_level_is_valid() {
    let cfg = config::load_from(Path::new("config/default.toml"), None, None).unwrap();
    assert!(eos_insights::logger::parse_level(&cfg.log_level).is_ok());
}
