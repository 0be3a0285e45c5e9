//! Reports module for profit-calc
//!
//! Terminal tables and CSV exports for the profitability summary, scenario
//! cases, the Best/Worst review, the product plan and the monthly effort
//! table.

pub mod effort;
pub mod product;
pub mod scenario;
pub mod summary;

pub use effort::EffortReport;
pub use product::ProductPlanReport;
pub use scenario::{ReviewReport, ScenarioReport};
pub use summary::SummaryReport;

use crate::numeric::finite_or_zero;

/// Amount with thousands separators; decimals only when present
pub fn format_amount(value: f64) -> String {
    let value = finite_or_zero(value);
    let hundredths = (value.abs() * 100.0).round() as u64;
    let whole = hundredths / 100;
    let fraction = hundredths % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && hundredths > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, fraction)
    }
}

/// Percentage with one decimal
pub fn format_percent(percent: f64) -> String {
    // + 0.0 folds -0.0 into 0.0
    let rounded = (finite_or_zero(percent) * 10.0).round() / 10.0 + 0.0;
    format!("{:.1}%", rounded)
}

/// Person-months with two decimals
pub fn format_mm(mm: f64) -> String {
    format!("{:.2}", finite_or_zero(mm))
}

/// Plain numeric cell for CSV output
fn csv_number(value: f64) -> String {
    format!("{:.2}", finite_or_zero(value))
}
