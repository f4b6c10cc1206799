//! Heuristic date parsing for spreadsheet cells
//!
//! Clinic files spell dates in many ways. Every candidate goes through an
//! ordered ladder of parsers and resolves to the canonical `DD/MM/YYYY` form:
//!
//! 1. Excel serial day numbers
//! 2. Separated forms: `D/M/YYYY`, `D/M/YY`, `YYYY/M/D` (`/`, `-` or `.`)
//! 3. Compact forms: `DDMMYYYY`, `YYYYMMDD`
//! 4. Month names (Indonesian or English) and ISO date-times
//!
//! The first pattern whose regex matches decides the outcome. Separated
//! forms are always read day-first.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::workbook::CellValue;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2030;

/// Shorter strings cannot hold a day, month and year
const MIN_TEXT_LEN: usize = 6;

const DISPLAY_FORMAT: &str = "%d/%m/%Y";
const STORAGE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    DayMonthYear,
    DayMonthShortYear,
    YearMonthDay,
}

struct DatePattern {
    regex: Regex,
    order: FieldOrder,
}

fn pattern(re: &str, order: FieldOrder) -> DatePattern {
    DatePattern {
        regex: Regex::new(re).expect("valid date pattern"),
        order,
    }
}

static DATE_PATTERNS: Lazy<Vec<DatePattern>> = Lazy::new(|| {
    vec![
        pattern(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})$", FieldOrder::DayMonthYear),
        pattern(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2})$", FieldOrder::DayMonthShortYear),
        pattern(r"^(\d{4})[/.\-](\d{1,2})[/.\-](\d{1,2})$", FieldOrder::YearMonthDay),
        // Compact day-first only claims strings that look like a real day, month and year
        pattern(
            r"^(0[1-9]|[12]\d|3[01])(0[1-9]|1[0-2])((?:19|20)\d{2})$",
            FieldOrder::DayMonthYear,
        ),
        pattern(r"^(\d{4})(\d{2})(\d{2})$", FieldOrder::YearMonthDay),
    ]
});

static DAY_MONTH_NAME_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[\s\-]+([A-Za-z]+)\.?[\s\-,]+(\d{4})$").expect("valid date pattern")
});

static MONTH_NAME_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\.?\s+(\d{1,2}),?\s+(\d{4})$").expect("valid date pattern")
});

static DISPLAY_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid date pattern"));

static STORAGE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date pattern"));

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const MONTH_NAMES: &[(&[&str], u32)] = &[
    (&["januari", "january", "jan"], 1),
    (&["februari", "pebruari", "february", "feb", "peb"], 2),
    (&["maret", "march", "mar"], 3),
    (&["april", "apr"], 4),
    (&["mei", "may"], 5),
    (&["juni", "june", "jun"], 6),
    (&["juli", "july", "jul"], 7),
    (&["agustus", "august", "agu", "agt", "ags", "aug"], 8),
    (&["september", "sept", "sep"], 9),
    (&["oktober", "october", "okt", "oct"], 10),
    (&["november", "nopember", "nov", "nop"], 11),
    (&["desember", "december", "des", "dec"], 12),
];

fn in_year_range(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Range checks plus calendar validity (month length, leap years)
fn build_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || !in_year_range(year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn expand_short_year(year: i32) -> i32 {
    if year < 50 {
        2000 + year
    } else {
        1900 + year
    }
}

pub fn to_canonical(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Resolve a decoded cell to canonical `DD/MM/YYYY`
pub fn disambiguate(value: &CellValue) -> Option<String> {
    let date = match value {
        CellValue::Date(date) => Some(*date),
        CellValue::Number(serial) => parse_excel_serial(*serial),
        CellValue::Text(text) => parse_date_text(text),
        CellValue::Empty => None,
    };
    date.map(to_canonical)
}

/// Excel serial day count: serial 1 is 1900-01-01. Serials past the
/// phantom 1900-02-29 are counted from 1899-12-30.
pub fn parse_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 1_000_000.0 {
        return None;
    }
    let days = serial.floor();
    let base = if days < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let date = base.checked_add_signed(Duration::days(days as i64))?;
    in_year_range(date.year()).then_some(date)
}

pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.chars().count() < MIN_TEXT_LEN {
        return None;
    }

    for candidate in DATE_PATTERNS.iter() {
        if let Some(caps) = candidate.regex.captures(text) {
            let a: i32 = caps[1].parse().ok()?;
            let b: u32 = caps[2].parse().ok()?;
            let c: i32 = caps[3].parse().ok()?;
            return match candidate.order {
                FieldOrder::DayMonthYear => build_date(c, b, a as u32),
                FieldOrder::DayMonthShortYear => build_date(expand_short_year(c), b, a as u32),
                FieldOrder::YearMonthDay => build_date(a, b, c as u32),
            };
        }
    }

    parse_loose(text)
}

/// Last resort for month names and date-time strings
fn parse_loose(text: &str) -> Option<NaiveDate> {
    let fallbacks: [fn(&str) -> Option<NaiveDate>; 3] =
        [parse_month_name_date, parse_datetime_text, parse_rfc3339];
    fallbacks
        .iter()
        .find_map(|parse| parse(text))
        .filter(|date| in_year_range(date.year()))
}

fn month_from_name(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|(names, _)| names.contains(&name.as_str()))
        .map(|(_, month)| *month)
}

fn parse_month_name_date(text: &str) -> Option<NaiveDate> {
    if let Some(caps) = DAY_MONTH_NAME_YEAR.captures(text) {
        let month = month_from_name(&caps[2])?;
        return build_date(caps[3].parse().ok()?, month, caps[1].parse().ok()?);
    }
    if let Some(caps) = MONTH_NAME_DAY_YEAR.captures(text) {
        let month = month_from_name(&caps[1])?;
        return build_date(caps[3].parse().ok()?, month, caps[2].parse().ok()?);
    }
    None
}

fn parse_datetime_text(text: &str) -> Option<NaiveDate> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_rfc3339(text: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}

fn parse_strict(text: &str, re: &Regex, year_first: bool) -> Option<NaiveDate> {
    let caps = re.captures(text.trim())?;
    let a: u32 = caps[1].parse().ok()?;
    let b: u32 = caps[2].parse().ok()?;
    let c: u32 = caps[3].parse().ok()?;
    if year_first {
        build_date(a as i32, b, c)
    } else {
        build_date(c as i32, b, a)
    }
}

/// True for a well-formed `DD/MM/YYYY` or `YYYY-MM-DD` string naming a real date
pub fn is_valid_date_string(text: &str) -> bool {
    parse_strict(text, &DISPLAY_DATE, false).is_some()
        || parse_strict(text, &STORAGE_DATE, true).is_some()
}

/// `DD/MM/YYYY` -> `YYYY-MM-DD`. Storage-form input is returned unchanged.
pub fn display_to_storage(text: &str) -> Option<String> {
    parse_strict(text, &DISPLAY_DATE, false)
        .or_else(|| parse_strict(text, &STORAGE_DATE, true))
        .map(|d| d.format(STORAGE_FORMAT).to_string())
}

#[cfg(test)]
/// `YYYY-MM-DD` -> `DD/MM/YYYY`. Display-form input is returned unchanged.
pub fn storage_to_display(text: &str) -> Option<String> {
    parse_strict(text, &STORAGE_DATE, true)
        .or_else(|| parse_strict(text, &DISPLAY_DATE, false))
        .map(to_canonical)
}
