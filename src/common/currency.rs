// src/common/currency.rs

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::middleware::i18n::Locale;

const CURRENCY_SYMBOL: &str = "R$";

/// Separadores de milhar e decimal de um idioma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    pub group: char,
    pub decimal: char,
}

impl Separators {
    pub fn for_locale(locale: &Locale) -> Self {
        if locale.is_portuguese() {
            Self { group: '.', decimal: ',' }
        } else {
            Self { group: ',', decimal: '.' }
        }
    }
}

/// Formata um número com `places` casas decimais e agrupamento de milhar.
pub fn format_number(value: Decimal, places: u32, locale: &Locale) -> String {
    let sep = Separators::for_locale(locale);
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", places as usize, rounded.abs());

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(sep.group);
        }
        out.push(digit);
    }
    if let Some(frac) = frac_part {
        out.push(sep.decimal);
        out.push_str(frac);
    }
    out
}

/// Valor monetário em reais: `R$ 1.234,56` (pt) ou `R$ 1,234.56` (demais).
pub fn format_currency(amount: Decimal, locale: &Locale) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_number(amount, 2, locale))
}

pub fn format_date(date: NaiveDate, locale: &Locale) -> String {
    if locale.is_portuguese() {
        date.format("%d/%m/%Y").to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pt() -> Locale {
        Locale("pt".into())
    }

    fn en() -> Locale {
        Locale("en".into())
    }

    #[test]
    fn formats_brl_with_portuguese_separators() {
        let revenue = Decimal::from_str("1234.56").unwrap();
        assert_eq!(format_currency(revenue, &pt()), "R$ 1.234,56");
    }

    #[test]
    fn formats_brl_with_english_separators() {
        let revenue = Decimal::from_str("1234567.5").unwrap();
        assert_eq!(format_currency(revenue, &en()), "R$ 1,234,567.50");
    }

    #[test]
    fn always_two_decimal_places() {
        assert_eq!(format_currency(Decimal::from(5000), &pt()), "R$ 5.000,00");
        assert_eq!(format_currency(Decimal::ZERO, &pt()), "R$ 0,00");
        assert_eq!(format_currency(Decimal::from(120), &pt()), "R$ 120,00");
    }

    #[test]
    fn rounds_midpoint_away_from_zero() {
        let value = Decimal::from_str("0.005").unwrap();
        assert_eq!(format_currency(value, &pt()), "R$ 0,01");
    }

    #[test]
    fn keeps_the_sign_of_negative_amounts() {
        let value = Decimal::from_str("-1500.2").unwrap();
        assert_eq!(format_currency(value, &pt()), "R$ -1.500,20");
    }

    #[test]
    fn formats_dates_by_locale() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(format_date(date, &pt()), "01/02/2026");
        assert_eq!(format_date(date, &en()), "2026-02-01");
    }

    #[test]
    fn number_without_decimals() {
        assert_eq!(format_number(Decimal::from(1500), 0, &pt()), "1.500");
    }
}
