//! Horizontal text bar charts for the report screen.

use crate::libs::report::RentalReport;

pub const BAR_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 24;

/// One labelled bar. `value` sets the length; `display` is printed after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: i64,
    pub display: String,
}

pub fn format_bar(value: i64, max_value: i64, width: usize) -> String {
    if max_value <= 0 || value <= 0 {
        return "░".repeat(width);
    }

    let filled = ((value as f64 / max_value as f64) * width as f64).round() as usize;
    let filled = filled.clamp(1, width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn fit_label(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        return format!("{:<width$}", label, width = LABEL_WIDTH);
    }
    let truncated: String = label.chars().take(LABEL_WIDTH - 1).collect();
    format!("{}…", truncated)
}

pub fn render(title: &str, bars: &[Bar]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"─".repeat(LABEL_WIDTH + BAR_WIDTH + 12));
    out.push('\n');

    let max = bars.iter().map(|b| b.value).max().unwrap_or(0);
    for bar in bars {
        out.push_str(&format!("{} {} {}\n", fit_label(&bar.label), format_bar(bar.value, max, BAR_WIDTH), bar.display));
    }
    out
}

pub fn rentals_per_month(report: &RentalReport) -> Vec<Bar> {
    report
        .monthly
        .iter()
        .map(|m| Bar {
            label: m.month.clone(),
            value: m.rentals as i64,
            display: format!("{} ({})", m.rentals, m.revenue),
        })
        .collect()
}

pub fn top_movies(report: &RentalReport) -> Vec<Bar> {
    report
        .top_movies
        .iter()
        .map(|m| Bar {
            label: m.title.clone(),
            value: m.rentals as i64,
            display: m.rentals.to_string(),
        })
        .collect()
}

pub fn revenue_by_genre(report: &RentalReport) -> Vec<Bar> {
    report
        .genres
        .iter()
        .map(|g| Bar {
            label: g.genre.clone(),
            value: g.revenue.cents(),
            display: g.revenue.to_string(),
        })
        .collect()
}
