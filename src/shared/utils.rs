//! Utility functions and helpers

use serde::{Deserialize, Serialize};

/// Currency rendering convention of the receiving locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: String,
    pub thousands_separator: String,
}

impl Default for CurrencyFormat {
    /// Brazilian real, `R$ 1.234,56`
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ",".to_string(),
            thousands_separator: ".".to_string(),
        }
    }
}

impl CurrencyFormat {
    /// Format a price with two decimals, grouped thousands and the currency symbol
    pub fn format(&self, value: f64) -> String {
        let cents = (value * 100.0).round() as i64;
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.abs();

        let digits = (cents / 100).to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(ch);
        }

        format!(
            "{}{} {}{}{:02}",
            sign,
            self.symbol,
            grouped,
            self.decimal_separator,
            cents % 100
        )
    }
}

/// Parse a scraped price string such as `"59,99"`, `"R$ 1.299,90"` or `"$19.99"`.
///
/// The right-most `,` or `.` followed by at most two digits is the decimal
/// separator; every other separator is a thousands separator.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = match cleaned.rfind([',', '.']) {
        Some(pos) if cleaned.len() - pos - 1 <= 2 => {
            let (int_part, frac_part) = cleaned.split_at(pos);
            let int_digits: String = int_part.chars().filter(|c| c.is_ascii_digit()).collect();
            format!("{}.{}", int_digits, &frac_part[1..])
        }
        _ => cleaned.chars().filter(|c| c.is_ascii_digit()).collect(),
    };

    normalized.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Deterministic ID derived from `key`, the same on every run
pub fn stable_id(key: &str) -> String {
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_URL, key.as_bytes()).to_string()
}
