//! Derivation of human-facing facts from a valid EGN: region of
//! registration, birth order, zodiac sign and localized date formatting.

use crate::codec;
use crate::prelude::*;
use crate::tables::{Locale, month_name, region_for, weekday_name, zodiac_for};
use crate::types::Gender;
use crate::{EgnError, consts::EGN_LENGTH};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::{Value, json};
use std::str::FromStr;

/// Ambient locale source injected by the host application. Consulted only
/// when no explicit (supported) locale is passed to details resolution.
pub trait LocaleProvider {
    /// The application's current locale tag, if any
    fn locale_tag(&self) -> Option<String>;
}

/// Output shape of details resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DetailsFormat {
    /// Nested JSON mapping
    #[display(fmt = "plain")]
    Plain,
    /// Top-level key/value pairs in canonical order
    #[display(fmt = "ordered")]
    Ordered,
    /// The typed [`EgnDetails`] struct
    #[display(fmt = "object")]
    Object,
}

impl FromStr for DetailsFormat {
    type Err = EgnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "ordered" => Ok(Self::Ordered),
            "object" => Ok(Self::Object),
            other => Err(EgnError::UnknownFormat(other.to_owned())),
        }
    }
}

/// Birth date group of the details output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthDateDetails {
    pub iso: String,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: String,
    pub formatted: String,
}

/// Region group of the details output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionDetails {
    pub code: u16,
    pub name: String,
    pub range_start: u16,
    pub range_end: u16,
}

/// Zodiac group of the details output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZodiacDetails {
    pub name: String,
    pub range: String,
    pub label: String,
}

/// The canonical details record. Field declaration order is the canonical
/// key order of the `Ordered` projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EgnDetails {
    pub egn: String,
    pub valid: bool,
    pub locale: Locale,
    pub gender: String,
    pub gender_code: Gender,
    pub birth_date: BirthDateDetails,
    pub age: u32,
    pub region: RegionDetails,
    pub birth_order: u16,
    pub zodiac: ZodiacDetails,
}

/// Details rendered in the requested format
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsValue {
    Plain(Value),
    Ordered(Vec<(String, Value)>),
    Object(EgnDetails),
}

/// Resolves details for an EGN, reducing any parse failure to `None`.
///
/// `today` anchors the age computation, which makes this function
/// deterministic; wall-clock callers pass the current local date.
pub fn resolve(
    egn: &str,
    format: DetailsFormat,
    locale: Option<&str>,
    provider: Option<&dyn LocaleProvider>,
    today: NaiveDate,
) -> Option<DetailsValue> {
    let details = build_details(egn, locale, provider, today)?;

    let rendered = match format {
        DetailsFormat::Plain => DetailsValue::Plain(serde_json::to_value(&details).ok()?),
        DetailsFormat::Ordered => DetailsValue::Ordered(ordered_projection(&details)),
        DetailsFormat::Object => DetailsValue::Object(details),
    };

    Some(rendered)
}

fn build_details(
    egn: &str,
    locale: Option<&str>,
    provider: Option<&dyn LocaleProvider>,
    today: NaiveDate,
) -> Option<EgnDetails> {
    let parsed = codec::parse(egn).ok()?;
    let locale = resolve_locale(locale, provider);

    let birth_date = NaiveDate::from_ymd_opt(
        i32::from(parsed.year()),
        u32::from(parsed.month()),
        u32::from(parsed.day()),
    )?;

    let serial: u16 = egn.get(6..EGN_LENGTH - 1)?.parse().ok()?;
    let (region_entry, range_start) = region_for(serial);
    let zodiac_entry = zodiac_for(parsed.month(), parsed.day())?;

    let weekday = weekday_name(locale, birth_date.weekday()).to_owned();
    let iso = birth_date.format("%Y-%m-%d").to_string();
    let formatted = format_birth_date(
        locale,
        (parsed.year(), parsed.month(), parsed.day()),
        &weekday,
        &iso,
    )?;

    let zodiac_name = zodiac_entry.name(locale).to_owned();
    let zodiac_range = zodiac_entry.range(locale).to_owned();
    let zodiac_label = format!("{zodiac_name} ({zodiac_range})");

    Some(EgnDetails {
        egn: egn.to_owned(),
        valid: true,
        locale,
        gender: gender_label(locale, parsed.gender()).to_owned(),
        gender_code: parsed.gender(),
        birth_date: BirthDateDetails {
            iso,
            year: parsed.year(),
            month: parsed.month(),
            day: parsed.day(),
            weekday,
            formatted,
        },
        age: age_on(birth_date, today),
        region: RegionDetails {
            code: serial,
            name: region_entry.name(locale).to_owned(),
            range_start,
            range_end: region_entry.upper,
        },
        birth_order: birth_order(serial, range_start, region_entry.upper),
        zodiac: ZodiacDetails {
            name: zodiac_name,
            range: zodiac_range,
            label: zodiac_label,
        },
    })
}

/// Explicit supported tag wins; otherwise the ambient provider is probed;
/// unknown tags from either source silently fall back to the default.
fn resolve_locale(explicit: Option<&str>, provider: Option<&dyn LocaleProvider>) -> Locale {
    explicit
        .and_then(Locale::from_tag)
        .or_else(|| {
            provider
                .and_then(LocaleProvider::locale_tag)
                .and_then(|tag| Locale::from_tag(&tag))
        })
        .unwrap_or_default()
}

fn gender_label(locale: Locale, gender: Gender) -> &'static str {
    match (locale, gender) {
        (Locale::Bg, Gender::Male) => "мъж",
        (Locale::Bg, Gender::Female) => "жена",
        (Locale::En, Gender::Male) => "male",
        (Locale::En, Gender::Female) => "female",
    }
}

fn format_birth_date(
    locale: Locale,
    (year, month, day): (u16, u8, u8),
    weekday: &str,
    iso: &str,
) -> Option<String> {
    let month_name = month_name(locale, month)?;
    let formatted = match locale {
        Locale::En => format!("{day} {month_name} {year} ({weekday}) ({iso})"),
        Locale::Bg => format!("{day} {month_name} {year} г. ({weekday}) ({iso})"),
    };
    Some(formatted)
}

/// Whole elapsed years between the birth date and `today`; clamped at zero
/// for birth dates in the future.
fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0).unsigned_abs()
}

/// 1-based position of the serial among same-parity serials in its region
/// range; 0 when the parity sub-range misses the serial entirely.
fn birth_order(serial: u16, range_start: u16, range_end: u16) -> u16 {
    let parity = serial % 2;
    let first = if range_start % 2 == parity {
        range_start
    } else {
        range_start + 1
    };
    let last = if range_end % 2 == parity {
        range_end
    } else {
        range_end.saturating_sub(1)
    };

    if first > last || serial < first || serial > last {
        return 0;
    }

    (serial - first) / 2 + 1
}

fn ordered_projection(details: &EgnDetails) -> Vec<(String, Value)> {
    vec![
        ("egn".to_owned(), json!(details.egn)),
        ("valid".to_owned(), json!(details.valid)),
        ("locale".to_owned(), json!(details.locale)),
        ("gender".to_owned(), json!(details.gender)),
        ("gender_code".to_owned(), json!(details.gender_code)),
        ("birth_date".to_owned(), json!(details.birth_date)),
        ("age".to_owned(), json!(details.age)),
        ("region".to_owned(), json!(details.region)),
        ("birth_order".to_owned(), json!(details.birth_order)),
        ("zodiac".to_owned(), json!(details.zodiac)),
    ]
}
