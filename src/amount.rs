//! Currency text normalization - amounts are stored as text, often suffixed `$`

use rust_decimal::Decimal;

use crate::records::RecordError;

/// A normalized amount with its parse outcome.
///
/// `malformed = true` means the stored text could not be read as a number and
/// the value was coerced to zero. Callers decide whether to surface that
/// (views count malformed rows) or reject it (form input uses [`parse_strict`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountCell {
    pub value: Decimal,
    pub malformed: bool,
}

/// Best-effort parse with safe default: strip everything that is not a digit
/// or decimal point, then parse; fall back to zero on failure.
///
/// This is the named coercion policy applied to amounts already on disk. It
/// never fails, so a single bad row cannot take a whole view down.
pub fn parse_or_default(raw: &str) -> AmountCell {
    match parse_residue(raw) {
        Some(value) => AmountCell {
            value,
            malformed: false,
        },
        None => AmountCell {
            value: Decimal::ZERO,
            malformed: true,
        },
    }
}

/// Strict variant for typed form input: malformed text is an error, not a zero.
pub fn parse_strict(raw: &str) -> Result<Decimal, RecordError> {
    parse_residue(raw).ok_or_else(|| RecordError::InvalidAmount(raw.to_string()))
}

fn parse_residue(raw: &str) -> Option<Decimal> {
    let residue: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if residue.is_empty() {
        return None;
    }
    residue.parse().ok()
}

/// Render an amount in the stored text convention: two decimal places,
/// trailing `$` (e.g. `200.00$`). Round-trips through [`parse_or_default`].
pub fn to_amount_text(value: Decimal) -> String {
    format!("{:.2}$", value)
}

/// Render an amount for display: `$` prefix with thousands separators.
pub fn display_usd(value: Decimal) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, frac) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let whole: String = grouped.chars().rev().collect();
    if value < Decimal::ZERO {
        format!("-${}.{}", whole, frac)
    } else {
        format!("${}.{}", whole, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn strips_currency_symbol_and_whitespace() {
        assert_eq!(parse_or_default("200$").value, dec!(200));
        assert_eq!(parse_or_default(" $1,250.50 ").value, dec!(1250.50));
        assert_eq!(parse_or_default("900").value, dec!(900));
    }

    #[test]
    fn malformed_text_coerces_to_zero_with_flag() {
        let cell = parse_or_default("abc");
        assert_eq!(cell.value, Decimal::ZERO);
        assert!(cell.malformed);

        let cell = parse_or_default("");
        assert_eq!(cell.value, Decimal::ZERO);
        assert!(cell.malformed);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = parse_or_default("1,234.56$").value;
        let twice = parse_or_default(&once.to_string()).value;
        assert_eq!(once, twice);
    }

    #[test]
    fn round_trips_stored_text_convention() {
        for value in [dec!(0), dec!(200), dec!(1250.50), dec!(0.01)] {
            let cell = parse_or_default(&to_amount_text(value));
            assert!(!cell.malformed);
            assert_eq!(cell.value, value);
        }
    }

    #[test]
    fn strict_parse_rejects_garbage() {
        assert!(parse_strict("abc").is_err());
        assert!(parse_strict("").is_err());
        assert_eq!(parse_strict("200$").unwrap(), dec!(200));
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(display_usd(dec!(1200)), "$1,200.00");
        assert_eq!(display_usd(dec!(999.9)), "$999.90");
        assert_eq!(display_usd(dec!(1234567.89)), "$1,234,567.89");
    }
}
