//! Money and date rendering shared by the CLI and reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MONEY_PREFIX: &str = "UN$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

/// Rendering preferences for monetary values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyFormat {
    pub prefix: String,
    #[serde(default)]
    pub negative_style: NegativeStyle,
    #[serde(default = "MoneyFormat::default_grouping")]
    pub grouping: bool,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_MONEY_PREFIX.into(),
            negative_style: NegativeStyle::Sign,
            grouping: false,
        }
    }
}

impl MoneyFormat {
    fn default_grouping() -> bool {
        false
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Renders `amount` rounded to cents, e.g. `UN$2024.00` or `-UN$12.50`.
    pub fn format(&self, amount: f64) -> String {
        let cents = round_cents(amount);
        let body = format_number(cents.abs(), self.grouping);
        if cents < 0.0 {
            match self.negative_style {
                NegativeStyle::Sign => format!("-{}{}", self.prefix, body),
                NegativeStyle::Parentheses => format!("({}{})", self.prefix, body),
            }
        } else {
            format!("{}{}", self.prefix, body)
        }
    }
}

/// Formats with the default `UN$` prefix.
pub fn format_money(amount: f64) -> String {
    MoneyFormat::default().format(amount)
}

/// Day/month/year rendering used in transaction listings.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn round_cents(amount: f64) -> f64 {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn format_number(value: f64, grouping: bool) -> String {
    let raw = format!("{value:.2}");
    if !grouping {
        return raw;
    }
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let mut grouped = String::new();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_prefix_and_cents() {
        assert_eq!(format_money(2024.0), "UN$2024.00");
        assert_eq!(format_money(37976.004), "UN$37976.00");
        assert_eq!(format_money(-12.5), "-UN$12.50");
        assert_eq!(format_money(-0.001), "UN$0.00");
    }

    #[test]
    fn supports_grouping_and_parentheses() {
        let format = MoneyFormat {
            prefix: "$".into(),
            negative_style: NegativeStyle::Parentheses,
            grouping: true,
        };
        assert_eq!(format.format(1234567.891), "$1,234,567.89");
        assert_eq!(format.format(-1500.0), "($1,500.00)");
        assert_eq!(format.format(999.0), "$999.00");
    }

    #[test]
    fn dates_render_day_first() {
        let date = NaiveDate::from_ymd_opt(2022, 10, 9).unwrap();
        assert_eq!(format_date(date), "09/10/2022");
    }
}
