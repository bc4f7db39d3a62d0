use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places shown for currency amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount for display: 2 decimal places, half away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounded amount with a fixed two-digit fraction, e.g. `37.50`.
pub fn display_amount(amount: Decimal) -> String {
    let mut rounded = round_currency(amount);
    rounded.rescale(CURRENCY_SCALE);
    rounded.to_string()
}

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: Decimal) -> String;
}

/// Prints amounts followed by an ISO currency code (`1,234.50 EUR`).
#[derive(Debug, Clone)]
pub struct CodeCurrencyFormatter {
    pub currency: String,
    pub grouping_separator: char,
}

impl CodeCurrencyFormatter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into().to_uppercase(),
            grouping_separator: ',',
        }
    }
}

impl CurrencyFormatter for CodeCurrencyFormatter {
    fn format_amount(&self, amount: Decimal) -> String {
        let plain = display_amount(amount);
        let (sign, digits) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(self.grouping_separator);
            }
            grouped.push(ch);
        }
        format!("{sign}{grouped}.{fraction} {}", self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_to_cents() {
        assert_eq!(round_currency(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_currency(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
        assert_eq!(round_currency(Decimal::new(12344, 3)), Decimal::new(1234, 2));
    }

    #[test]
    fn display_pads_fraction() {
        assert_eq!(display_amount(Decimal::new(375, 1)), "37.50");
        assert_eq!(display_amount(Decimal::from(80)), "80.00");
    }

    #[test]
    fn code_formatter_groups_thousands() {
        let formatter = CodeCurrencyFormatter::new("eur");
        assert_eq!(formatter.format_amount(Decimal::new(123456789, 2)), "1,234,567.89 EUR");
        assert_eq!(formatter.format_amount(Decimal::new(-5, 1)), "-0.50 EUR");
        assert_eq!(formatter.format_amount(Decimal::from(999)), "999.00 EUR");
    }
}
