//! Money and date formatting for Dominican (es-DO, DOP) documents

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};
use rust_decimal::prelude::*;

/// Decimal places for monetary amounts
pub const DECIMAL_PLACES: u32 = 2;

/// Currency prefix
pub const CURRENCY_SYMBOL: &str = "RD$";

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Round to cents, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format with thousands separators and two decimals (`1,234.56`)
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_money(value);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Format as Dominican pesos (`RD$1,234.56`, `-RD$5.00`)
pub fn format_money(value: Decimal) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(abs) => format!("-{CURRENCY_SYMBOL}{abs}"),
        None => format!("{CURRENCY_SYMBOL}{amount}"),
    }
}

/// Business timezone (America/Santo_Domingo, UTC-4 all year)
pub fn business_offset() -> FixedOffset {
    FixedOffset::west_opt(4 * 3600).unwrap_or_else(|| Utc.fix())
}

/// Long Spanish date, e.g. `15 de enero de 2024`
pub fn format_date_long(value: DateTime<Utc>) -> String {
    let local = value.with_timezone(&business_offset());
    let month = MONTHS_ES[local.month0() as usize];
    format!("{} de {} de {}", local.day(), month, local.year())
}

/// Short date, `dd/mm/yyyy`
pub fn format_date_short(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&business_offset())
        .format("%d/%m/%Y")
        .to_string()
}

/// Date and time, `dd/mm/yyyy hh:mm`
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&business_offset())
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_money(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
        assert_eq!(round_money(Decimal::new(1234, 3)), Decimal::new(123, 2));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(123456, 2)), "RD$1,234.56");
        assert_eq!(format_money(Decimal::ZERO), "RD$0.00");
        assert_eq!(format_money(Decimal::from(1_000_000)), "RD$1,000,000.00");
        assert_eq!(format_money(Decimal::new(-500, 2)), "-RD$5.00");
        assert_eq!(format_money(Decimal::new(999, 1)), "RD$99.90");
        assert_eq!(format_money(Decimal::new(100, 0)), "RD$100.00");
    }

    #[test]
    fn test_format_amount_small_negative_rounds_to_zero() {
        assert_eq!(format_amount(Decimal::new(-1, 3)), "0.00");
    }

    #[test]
    fn test_format_date_long_uses_local_day() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 16, 0, 0).unwrap();
        assert_eq!(format_date_long(dt), "15 de enero de 2024");

        // 02:00 UTC is still the previous evening in Santo Domingo
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        assert_eq!(format_date_long(dt), "29 de febrero de 2024");
    }

    #[test]
    fn test_format_short_dates() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 5, 18, 7, 0).unwrap();
        assert_eq!(format_date_short(dt), "05/12/2024");
        assert_eq!(format_datetime(dt), "05/12/2024 14:07");
    }
}
