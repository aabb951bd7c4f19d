//! Static analytics dataset behind the dashboard view.
//!
//! Every figure here is a constant. Nothing is computed from user input and
//! nothing is persisted.

mod dashboard;

pub use dashboard::Dashboard;

/// How a metric value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Count,
    Currency,
    Percent,
}

/// One headline metric card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSnapshot {
    pub title: &'static str,
    pub value: f64,
    pub unit: Unit,
    /// Period-over-period change in percent.
    pub change_pct: f64,
}

impl MetricSnapshot {
    /// `"2,100"`, `"$75,000"`, `"95%"`, `"98.5%"`.
    pub fn display_value(&self) -> String {
        match self.unit {
            Unit::Count => group_thousands(self.value),
            Unit::Currency => format!("${}", group_thousands(self.value)),
            Unit::Percent => format!("{}%", trim_float(self.value)),
        }
    }

    /// `"+16.7%"`.
    pub fn display_change(&self) -> String {
        let sign = if self.change_pct >= 0.0 { "+" } else { "" };
        format!("{sign}{:.1}%", self.change_pct)
    }
}

/// One month of the performance series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub month: &'static str,
    pub users: u32,
    pub revenue: u32,
    /// Engagement score in percent.
    pub engagement: u32,
}

/// One slice of the resource distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryShare {
    pub name: &'static str,
    /// Percent of the whole.
    pub value: u32,
    pub color: &'static str,
}

static METRICS: [MetricSnapshot; 4] = [
    MetricSnapshot { title: "Total Users", value: 2100.0, unit: Unit::Count, change_pct: 16.7 },
    MetricSnapshot { title: "Revenue", value: 75000.0, unit: Unit::Currency, change_pct: 10.2 },
    MetricSnapshot { title: "Engagement", value: 95.0, unit: Unit::Percent, change_pct: 3.2 },
    MetricSnapshot { title: "AI Accuracy", value: 98.5, unit: Unit::Percent, change_pct: 1.8 },
];

static PERFORMANCE: [SeriesPoint; 6] = [
    SeriesPoint { month: "Jan", users: 1200, revenue: 45000, engagement: 78 },
    SeriesPoint { month: "Feb", users: 1350, revenue: 52000, engagement: 82 },
    SeriesPoint { month: "Mar", users: 1100, revenue: 48000, engagement: 75 },
    SeriesPoint { month: "Apr", users: 1600, revenue: 61000, engagement: 88 },
    SeriesPoint { month: "May", users: 1800, revenue: 68000, engagement: 92 },
    SeriesPoint { month: "Jun", users: 2100, revenue: 75000, engagement: 95 },
];

static CATEGORIES: [CategoryShare; 4] = [
    CategoryShare { name: "AI Models", value: 35, color: "#3B82F6" },
    CategoryShare { name: "Data Processing", value: 25, color: "#10B981" },
    CategoryShare { name: "User Interface", value: 20, color: "#F59E0B" },
    CategoryShare { name: "Analytics", value: 20, color: "#EF4444" },
];

pub fn metrics() -> &'static [MetricSnapshot] {
    &METRICS
}

pub fn performance_series() -> &'static [SeriesPoint] {
    &PERFORMANCE
}

pub fn category_distribution() -> &'static [CategoryShare] {
    &CATEGORIES
}

/// Most recent month of the series.
pub fn latest() -> &'static SeriesPoint {
    &PERFORMANCE[PERFORMANCE.len() - 1]
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// `95.0` → `"95"`, `98.5` → `"98.5"`.
fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
