//! Display formatting for prices and account amounts.

use rust_decimal::prelude::*;

/// Price as cents with one decimal place: `0.425` → `"42.5¢"`.
pub fn format_cents(price: &Decimal) -> String {
    let cents = (price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}¢", cents)
}

/// Dollar amount with two decimals and thousands separators: `1234.5` → `"$1,234.50"`.
pub fn format_usd(amount: &Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}", sign, group_thousands(&format!("{:.2}", rounded)))
}

/// Like [`format_usd`] but always shows a sign for non-zero amounts.
pub fn format_signed_usd(amount: &Decimal) -> String {
    if *amount > Decimal::ZERO {
        format!("+{}", format_usd(amount))
    } else {
        format_usd(amount)
    }
}

fn group_thousands(formatted: &str) -> String {
    let (integer, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted, None),
    };

    let grouped = integer
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    match fraction {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(&dec("0.42")), "42.0¢");
        assert_eq!(format_cents(&dec("0.4255")), "42.6¢");
        assert_eq!(format_cents(&dec("0.5")), "50.0¢");
        assert_eq!(format_cents(&Decimal::ZERO), "0.0¢");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(&dec("2.4")), "$2.40");
        assert_eq!(format_usd(&dec("1000")), "$1,000.00");
        assert_eq!(format_usd(&dec("1234567.891")), "$1,234,567.89");
        assert_eq!(format_usd(&dec("-12.5")), "-$12.50");
        assert_eq!(format_usd(&dec("-0.001")), "$0.00");
    }

    #[test]
    fn test_format_signed_usd() {
        assert_eq!(format_signed_usd(&dec("25")), "+$25.00");
        assert_eq!(format_signed_usd(&dec("-25")), "-$25.00");
        assert_eq!(format_signed_usd(&Decimal::ZERO), "$0.00");
    }
}
