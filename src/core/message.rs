use crate::domain::model::Report;
use chrono::NaiveDate;

/// Sent when the listing failed or no link passed the name filter.
pub const FAILURE_TEXT: &str = "❌ Could not fetch link statistics";

/// Renders the webhook message: title with the report date, one line per
/// link, and the grand total.
pub fn render_report(report: &Report, title_prefix: &str, date: NaiveDate) -> String {
    if report.is_empty() {
        return FAILURE_TEXT.to_string();
    }

    let mut message = format!(
        "📊 **{} link stats - {}**\n\n",
        title_prefix,
        date.format("%d/%m/%Y")
    );

    for stat in &report.stats {
        message.push_str(&format!(
            "👆 **{}:** {} clicks\n",
            stat.name,
            group_thousands(stat.clicks)
        ));
    }

    message.push_str(&format!(
        "\n📈 **TOTAL:** {} clicks",
        group_thousands(report.total)
    ));
    message
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
