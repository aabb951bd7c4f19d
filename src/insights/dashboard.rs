//! Plain-text rendering of the dashboard view.

use std::fmt::Write as _;

use super::{category_distribution, latest, metrics, performance_series};

/// Width of the longest bar in the revenue and distribution charts.
const BAR_WIDTH: u32 = 30;

/// Read-only dashboard: metric cards, performance trends, revenue growth and
/// resource distribution.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dashboard;

impl Dashboard {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_metrics(&mut out);
        self.render_performance(&mut out);
        self.render_revenue(&mut out);
        self.render_distribution(&mut out);
        out
    }

    fn render_metrics(&self, out: &mut String) {
        let _ = writeln!(out, "── Key metrics ({}) ─────────────────────────", latest().month);
        for m in metrics() {
            let _ = writeln!(
                out,
                "  {:<14}{:>10}   {}",
                m.title,
                m.display_value(),
                m.display_change()
            );
        }
        out.push('\n');
    }

    fn render_performance(&self, out: &mut String) {
        let _ = writeln!(out, "── Performance trends ────────────────────────");
        let _ = writeln!(out, "  {:<6}{:>8}{:>13}", "Month", "Users", "Engagement");
        for p in performance_series() {
            let _ = writeln!(out, "  {:<6}{:>8}{:>12}%", p.month, p.users, p.engagement);
        }
        out.push('\n');
    }

    fn render_revenue(&self, out: &mut String) {
        let _ = writeln!(out, "── Revenue growth ────────────────────────────");
        let series = performance_series();
        let max = series.iter().map(|p| p.revenue).max().unwrap_or(0);
        for p in series {
            let _ = writeln!(
                out,
                "  {:<4} {:<width$} ${}",
                p.month,
                bar(p.revenue, max),
                p.revenue,
                width = BAR_WIDTH as usize
            );
        }
        out.push('\n');
    }

    fn render_distribution(&self, out: &mut String) {
        let _ = writeln!(out, "── Resource distribution ─────────────────────");
        for c in category_distribution() {
            let _ = writeln!(
                out,
                "  {:<16}{:>4}%  {}",
                c.name,
                c.value,
                bar(c.value, 100)
            );
        }
    }
}

fn bar(value: u32, max: u32) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (u64::from(value) * u64::from(BAR_WIDTH) / u64::from(max)) as usize;
    "█".repeat(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_every_section_and_figure() {
        let text = Dashboard.render();
        for heading in ["Key metrics", "Performance trends", "Revenue growth", "Resource distribution"] {
            assert!(text.contains(heading), "missing section {heading}");
        }
        assert!(text.contains("2,100"));
        assert!(text.contains("$75,000"));
        assert!(text.contains("98.5%"));
        assert!(text.contains("Data Processing"));
        assert!(text.contains("Jan"));
    }

    #[test]
    fn metric_heading_names_latest_month() {
        let text = Dashboard.render();
        let heading = text.lines().next().unwrap();
        assert!(heading.contains("Key metrics (Jun)"), "heading was {heading}");
    }

    #[test]
    fn bars_scale_to_max() {
        assert_eq!(bar(75000, 75000).chars().count(), BAR_WIDTH as usize);
        assert_eq!(bar(0, 10).chars().count(), 0);
        assert_eq!(bar(5, 0), "");
        assert_eq!(bar(50, 100).chars().count(), (BAR_WIDTH / 2) as usize);
    }
}
