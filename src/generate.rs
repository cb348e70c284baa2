//! Generation of valid EGN codes from partial constraints.
//!
//! The generator resolves a concrete birth date from the options (sampling
//! any missing fields), builds a serial whose last digit carries the gender
//! parity, and delegates to the codec for the century encoding and check
//! digit, so every generated code parses back with the same rules used for
//! validation.

use crate::EgnError;
use crate::codec;
use crate::consts::{DATE_SAMPLING_ATTEMPTS, MAX_MONTH, MAX_REGION};
use crate::types::{Gender, YearRange, days_in_month, is_valid_date};
use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;
use serde::Deserialize;

/// Constraints for EGN generation. All fields are optional; unset fields
/// are drawn uniformly at random.
///
/// `date` takes precedence over the partial `year`/`month`/`day` fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Exact birth date; must fall within the configured year range
    pub date: Option<NaiveDate>,
    /// Birth year; must fall within the configured year range
    pub year: Option<u16>,
    /// Birth month, 1..=12
    pub month: Option<u8>,
    /// Birth day, 1..=31 (additionally checked against the resolved month)
    pub day: Option<u8>,
    /// Gender encoded in the serial parity
    pub gender: Option<Gender>,
    /// Region prefix of the serial, 0..=99
    pub region: Option<u8>,
}

/// Generates one EGN satisfying the options, drawing unset fields from the
/// given RNG.
///
/// # Errors
/// Returns `EgnError::InvalidOption` for out-of-domain fields and
/// `EgnError::UnsatisfiableConstraint` when no calendar-valid date exists
/// for the requested combination within the year range.
pub fn generate_one<R: Rng>(
    options: &GenerationOptions,
    year_range: YearRange,
    rng: &mut R,
) -> Result<String, EgnError> {
    if let Some(region) = options.region {
        if region > MAX_REGION {
            return Err(EgnError::InvalidOption(format!(
                "region must be 0..={MAX_REGION}, got {region}"
            )));
        }
    }

    let date = pick_date(options, year_range, rng)?;

    let year = date.year().unsigned_abs() as u16;
    let month = date.month() as u8;
    let day = date.day() as u8;
    let encoded_month = codec::encode_month(year, month)?;
    let serial = build_serial(options.gender, options.region, rng);

    let yy = (year % 100) as u8;
    let first_nine = [
        yy / 10,
        yy % 10,
        encoded_month / 10,
        encoded_month % 10,
        day / 10,
        day % 10,
        (serial / 100) as u8,
        (serial / 10 % 10) as u8,
        (serial % 10) as u8,
    ];
    let check = codec::checksum(&first_nine);

    let mut code = String::with_capacity(first_nine.len() + 1);
    for digit in first_nine {
        code.push(char::from(b'0' + digit));
    }
    code.push(char::from(b'0' + check));

    Ok(code)
}

/// Generates `count` independent EGNs. No uniqueness guarantee across the
/// returned codes.
///
/// # Errors
/// Returns `EgnError::InvalidOption` if `count` is zero, otherwise fails
/// like [`generate_one`].
pub fn generate<R: Rng>(
    count: usize,
    options: &GenerationOptions,
    year_range: YearRange,
    rng: &mut R,
) -> Result<Vec<String>, EgnError> {
    if count < 1 {
        return Err(EgnError::InvalidOption("count must be >= 1".to_owned()));
    }

    let mut codes = Vec::with_capacity(count);
    for _ in 0..count {
        codes.push(generate_one(options, year_range, rng)?);
    }

    Ok(codes)
}

fn pick_date<R: Rng>(
    options: &GenerationOptions,
    year_range: YearRange,
    rng: &mut R,
) -> Result<NaiveDate, EgnError> {
    if let Some(date) = options.date {
        let year = date.year();
        if year < i32::from(year_range.start()) || year > i32::from(year_range.end()) {
            return Err(EgnError::InvalidOption(format!(
                "date year {year} is outside the configured range {}..{}",
                year_range.start(),
                year_range.end()
            )));
        }
        return Ok(date);
    }

    if let Some(year) = options.year {
        if !year_range.contains(year) {
            return Err(EgnError::InvalidOption(format!(
                "year must be {}..={}, got {year}",
                year_range.start(),
                year_range.end()
            )));
        }
    }
    if let Some(month) = options.month {
        if !(1..=MAX_MONTH).contains(&month) {
            return Err(EgnError::InvalidOption(format!(
                "month must be 1..=12, got {month}"
            )));
        }
    }
    if let Some(day) = options.day {
        if !(1..=31).contains(&day) {
            return Err(EgnError::InvalidOption(format!(
                "day must be 1..=31, got {day}"
            )));
        }
    }

    if options.year.is_none() && options.month.is_none() && options.day.is_none() {
        return random_date(year_range, rng);
    }

    sample_date(options.year, options.month, options.day, year_range, rng)
}

/// Uniform random date over the whole year range, drawn as an inclusive
/// day offset from the range start.
fn random_date<R: Rng>(year_range: YearRange, rng: &mut R) -> Result<NaiveDate, EgnError> {
    let start = calendar_date(year_range.start(), 1, 1)?;
    let end = calendar_date(year_range.end(), 12, 31)?;

    let span_days = (end - start).num_days().unsigned_abs();
    let offset = rng.gen_range(0..=span_days);

    start
        .checked_add_days(Days::new(offset))
        .ok_or_else(|| EgnError::UnsatisfiableConstraint("date offset overflow".to_owned()))
}

/// Bounded sampling of the fields left unset. A fully pinned
/// year+month+day that is not calendar-valid fails immediately instead of
/// burning the attempt budget.
fn sample_date<R: Rng>(
    year: Option<u16>,
    month: Option<u8>,
    day: Option<u8>,
    year_range: YearRange,
    rng: &mut R,
) -> Result<NaiveDate, EgnError> {
    if let (None, Some(m), Some(d)) = (year, month, day) {
        if !year_exists_for(m, d, year_range) {
            return Err(EgnError::UnsatisfiableConstraint(format!(
                "no year in {}..{} makes {m:02}-{d:02} a valid date",
                year_range.start(),
                year_range.end()
            )));
        }
    }

    for _ in 0..DATE_SAMPLING_ATTEMPTS {
        let candidate_year =
            year.unwrap_or_else(|| rng.gen_range(year_range.start()..=year_range.end()));
        let candidate_month = month.unwrap_or_else(|| rng.gen_range(1..=MAX_MONTH));
        let max_day = days_in_month(candidate_year, candidate_month);

        if let Some(d) = day {
            if d > max_day {
                if year.is_some() && month.is_some() {
                    return Err(EgnError::UnsatisfiableConstraint(format!(
                        "day {d} is not valid for {candidate_year}-{candidate_month:02}"
                    )));
                }
                continue;
            }
        }

        let candidate_day = day.unwrap_or_else(|| rng.gen_range(1..=max_day));
        return calendar_date(candidate_year, candidate_month, candidate_day);
    }

    Err(EgnError::UnsatisfiableConstraint(
        "no valid date found within the sampling budget".to_owned(),
    ))
}

fn year_exists_for(month: u8, day: u8, year_range: YearRange) -> bool {
    (year_range.start()..=year_range.end()).any(|year| is_valid_date(year, month, day))
}

fn calendar_date(year: u16, month: u8, day: u8) -> Result<NaiveDate, EgnError> {
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .ok_or(EgnError::InvalidDate { year, month, day })
}

/// Three-digit serial: two region digits followed by a digit whose parity
/// encodes the gender (odd male, even female, anything when unset).
fn build_serial<R: Rng>(gender: Option<Gender>, region: Option<u8>, rng: &mut R) -> u16 {
    let base = region.unwrap_or_else(|| rng.gen_range(0..=MAX_REGION));

    let last_digit = match gender {
        Some(Gender::Male) => rng.gen_range(0..5u8) * 2 + 1,
        Some(Gender::Female) => rng.gen_range(0..5u8) * 2,
        None => rng.gen_range(0..10u8),
    };

    u16::from(base) * 10 + u16::from(last_digit)
}
