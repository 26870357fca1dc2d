// Utility helpers for parsing and number formatting.
//
// This module centralizes the "dirty" CSV field handling so the rest of the
// code can assume clean, typed values.
use crate::types::Month;
use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};

/// Every raw month spelling seen in the source data, mapped to its month.
/// Canonical labels are present too, so canonicalization is idempotent.
const MONTH_ALIASES: &[(&str, Month)] = &[
    ("janeiro", Month::January),
    ("Janeiro", Month::January),
    ("fevereiro", Month::February),
    ("Fevereiro", Month::February),
    ("março", Month::March),
    ("Marco", Month::March),
    ("marco", Month::March),
    ("Março", Month::March),
    ("abril", Month::April),
    ("Abril", Month::April),
    ("maio", Month::May),
    ("Maio", Month::May),
    ("junho", Month::June),
    ("Junho", Month::June),
    ("julho", Month::July),
    ("Julho", Month::July),
    ("agosto", Month::August),
    ("Agosto", Month::August),
    ("setembro", Month::September),
    ("Setembro", Month::September),
    ("outubro", Month::October),
    ("Outubro", Month::October),
    ("novembro", Month::November),
    ("Novembro", Month::November),
    ("dezembro", Month::December),
    ("Dezembro", Month::December),
];

/// Look up a raw month label. Only the known variants are accepted; anything
/// else yields `None` so the loader can reject the row.
pub fn canonical_month(raw: &str) -> Option<Month> {
    let raw = raw.trim();
    MONTH_ALIASES
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map(|(_, month)| *month)
}

/// Parse the combined year-month field into the first day of that month.
///
/// Accepts `YYYY-MM`, `YYYY/MM`, `YYYY-MM-DD`, `YYYY/MM/DD` and `DD/MM/YYYY`,
/// optionally followed by a time part which is ignored.
pub fn parse_month_year(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // Drop a trailing time component (`2014-01-01 00:00:00` or `2014-01-01T00:00:00`).
    let date_part = s.split([' ', 'T']).next()?;
    if date_part.is_empty() {
        return None;
    }

    let full_formats = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
    let date = full_formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .or_else(|| {
            let sep = if date_part.contains('/') { '/' } else { '-' };
            let with_day = format!("{date_part}{sep}01");
            let fmt = if sep == '/' { "%Y/%m/%d" } else { "%Y-%m-%d" };
            NaiveDate::parse_from_str(&with_day, fmt).ok()
        })?;
    date.with_day(1)
}

pub fn parse_i32_safe(s: Option<&str>) -> Option<i32> {
    // `?` propagates `None` early if the option is missing.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed number of decimal places plus thousands separators (`1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
