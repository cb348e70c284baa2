pub mod codec;
mod consts;
mod details;
pub mod generate;
mod prelude;
mod tables;
mod types;

pub use consts::*;
pub use details::{
    BirthDateDetails, DetailsFormat, DetailsValue, EgnDetails, LocaleProvider, RegionDetails,
    ZodiacDetails,
};
pub use generate::GenerationOptions;
pub use tables::{
    Locale, REGIONS, RegionEntry, ZODIAC, ZodiacEntry, month_name, region_for, weekday_name,
    zodiac_for,
};
pub use types::{Gender, ParsedEgn, YearRange, days_in_month, is_leap_year, is_valid_date};

use chrono::{Local, NaiveDate};
use rand::Rng;
use std::fmt;

/// Errors surfaced by EGN parsing, generation and details resolution.
///
/// Parse-level failures (`MalformedInput`, `InvalidMonthEncoding`,
/// `InvalidDate`, `ChecksumMismatch`) are reduced to `false`/`None` by the
/// [`Egn`] entry point; only option and format misuse reaches callers as an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EgnError {
    /// Input is not exactly 10 ASCII digits.
    #[error("EGN must be exactly 10 ASCII digits")]
    MalformedInput,

    /// The encoded month digits fall in none of the three century bands.
    #[error("encoded month {0} falls in no recognized century band")]
    InvalidMonthEncoding(u8),

    /// The decoded digits do not name a real Gregorian calendar date.
    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: u16, month: u8, day: u8 },

    /// Structurally valid digits with a wrong check digit.
    #[error("check digit does not match the weighted checksum")]
    ChecksumMismatch,

    /// Out-of-range or malformed generation option or configuration.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// A constraint combination no date in the configured range satisfies.
    #[error("unsatisfiable constraint: {0}")]
    UnsatisfiableConstraint(String),

    /// An unsupported details rendering format.
    #[error("unknown details format {0:?}, expected plain|ordered|object")]
    UnknownFormat(String),
}

/// Entry point bundling the configured year range and an optional ambient
/// locale source.
///
/// All operations take `&self`; the only mutable state is the thread-local
/// RNG the generator draws from, so a single `Egn` is safe to share across
/// concurrent callers.
///
/// ```
/// use egn::{Egn, GenerationOptions};
///
/// let egn = Egn::new();
/// assert!(egn.validate("6101057509"));
///
/// let code = egn.generate_one(&GenerationOptions::default()).unwrap();
/// assert!(egn.validate(&code));
/// ```
#[derive(Default)]
pub struct Egn {
    year_range: YearRange,
    locale_provider: Option<Box<dyn LocaleProvider + Send + Sync>>,
}

impl fmt::Debug for Egn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Egn")
            .field("year_range", &self.year_range)
            .field("locale_provider", &self.locale_provider.is_some())
            .finish()
    }
}

impl Egn {
    /// Default configuration: year range 1800..=2099, no ambient locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the year range the generator draws birth dates from.
    pub fn with_year_range(mut self, year_range: YearRange) -> Self {
        self.year_range = year_range;
        self
    }

    /// Injects an ambient locale source, consulted by details resolution
    /// when no explicit supported locale is passed.
    pub fn with_locale_provider(
        mut self,
        provider: impl LocaleProvider + Send + Sync + 'static,
    ) -> Self {
        self.locale_provider = Some(Box::new(provider));
        self
    }

    /// The configured generation year range
    pub const fn year_range(&self) -> YearRange {
        self.year_range
    }

    /// Whether the code is a valid EGN. Never fails.
    pub fn validate(&self, egn: &str) -> bool {
        codec::is_valid(egn)
    }

    /// Parses the code, reducing every decode failure to `None`.
    pub fn parse(&self, egn: &str) -> Option<ParsedEgn> {
        codec::parse(egn).ok()
    }

    /// Resolves details for the code with the age anchored to today's
    /// local date. `None` when the code is not a valid EGN.
    pub fn details(
        &self,
        egn: &str,
        format: DetailsFormat,
        locale: Option<&str>,
    ) -> Option<DetailsValue> {
        self.details_at(egn, format, locale, Local::now().date_naive())
    }

    /// Deterministic variant of [`Egn::details`] with an injected `today`
    /// for the age computation.
    pub fn details_at(
        &self,
        egn: &str,
        format: DetailsFormat,
        locale: Option<&str>,
        today: NaiveDate,
    ) -> Option<DetailsValue> {
        details::resolve(egn, format, locale, self.provider(), today)
    }

    /// Generates one EGN satisfying the options.
    ///
    /// # Errors
    /// `EgnError::InvalidOption` for out-of-domain options,
    /// `EgnError::UnsatisfiableConstraint` when no date in the configured
    /// year range fits the requested fields.
    pub fn generate_one(&self, options: &GenerationOptions) -> Result<String, EgnError> {
        self.generate_one_with(options, &mut rand::thread_rng())
    }

    /// [`Egn::generate_one`] drawing from a caller-supplied RNG, e.g. a
    /// seeded one for reproducible output.
    ///
    /// # Errors
    /// Same as [`Egn::generate_one`].
    pub fn generate_one_with<R: Rng>(
        &self,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> Result<String, EgnError> {
        generate::generate_one(options, self.year_range, rng)
    }

    /// Generates `count` independent EGNs.
    ///
    /// # Errors
    /// `EgnError::InvalidOption` if `count` is zero, otherwise as
    /// [`Egn::generate_one`].
    pub fn generate(
        &self,
        count: usize,
        options: &GenerationOptions,
    ) -> Result<Vec<String>, EgnError> {
        self.generate_with(count, options, &mut rand::thread_rng())
    }

    /// [`Egn::generate`] drawing from a caller-supplied RNG.
    ///
    /// # Errors
    /// Same as [`Egn::generate`].
    pub fn generate_with<R: Rng>(
        &self,
        count: usize,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> Result<Vec<String>, EgnError> {
        generate::generate(count, options, self.year_range, rng)
    }

    fn provider(&self) -> Option<&dyn LocaleProvider> {
        self.locale_provider.as_deref().map(|p| p as &dyn LocaleProvider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parse_known_valid_egn() {
        let egn = Egn::new();
        let parsed = egn.parse("6101057509").unwrap();

        assert_eq!(parsed.year(), 1961);
        assert_eq!(parsed.month(), 1);
        assert_eq!(parsed.day(), 5);
        assert_eq!(parsed.gender(), Gender::Female);
        assert!(egn.validate("6101057509"));
    }

    #[test]
    fn test_validate_rejects_bad_checksum_and_date() {
        let egn = Egn::new();
        assert!(!egn.validate("6101057508"));
        assert!(!egn.validate("6102327503"));
        assert!(egn.parse("6101057508").is_none());
    }

    #[test]
    fn test_details_english_scenario() {
        let egn = Egn::new();
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let value = egn
            .details_at("8702260780", DetailsFormat::Object, Some("en"), today)
            .unwrap();
        let DetailsValue::Object(details) = value else {
            panic!("expected object");
        };

        assert_eq!(details.region.name, "Burgas");
        assert_eq!(details.gender, "female");
        assert_eq!(details.zodiac.name, "Pisces");
        assert_eq!(
            details.birth_date.formatted,
            "26 February 1987 (Thursday) (1987-02-26)"
        );
    }

    #[test]
    fn test_details_none_for_invalid_egn() {
        let egn = Egn::new();
        assert!(egn.details("0000000000", DetailsFormat::Plain, None).is_none());
    }

    #[test]
    fn test_generate_one_round_trip() {
        let egn = Egn::new();
        let options = GenerationOptions {
            year: Some(1991),
            month: Some(12),
            day: Some(24),
            gender: Some(Gender::Male),
            region: Some(22),
            ..GenerationOptions::default()
        };

        let code = egn.generate_one(&options).unwrap();
        let parsed = egn.parse(&code).unwrap();

        assert_eq!(parsed.year(), 1991);
        assert_eq!(parsed.month(), 12);
        assert_eq!(parsed.day(), 24);
        assert_eq!(parsed.gender(), Gender::Male);
        assert_eq!(&code[6..8], "22");
    }

    #[test]
    fn test_generated_codes_always_validate() {
        let egn = Egn::new();
        let codes = egn.generate(10, &GenerationOptions::default()).unwrap();
        assert_eq!(codes.len(), 10);
        for code in &codes {
            assert!(egn.validate(code), "generated code {code} must validate");
        }
    }

    #[test]
    fn test_feb_29_unsatisfiable_in_leapless_range() {
        let egn = Egn::new().with_year_range(YearRange::new(1901, 1903).unwrap());
        let options = GenerationOptions {
            month: Some(2),
            day: Some(29),
            ..GenerationOptions::default()
        };

        let result = egn.generate_one(&options);
        assert!(matches!(result, Err(EgnError::UnsatisfiableConstraint(_))));
    }

    struct FixedLocale(&'static str);

    impl LocaleProvider for FixedLocale {
        fn locale_tag(&self) -> Option<String> {
            Some(self.0.to_owned())
        }
    }

    #[test]
    fn test_ambient_locale_provider_is_probed() {
        let egn = Egn::new().with_locale_provider(FixedLocale("en"));
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let value = egn
            .details_at("8702260780", DetailsFormat::Object, None, today)
            .unwrap();
        let DetailsValue::Object(details) = value else {
            panic!("expected object");
        };

        assert_eq!(details.locale, Locale::En);
        assert_eq!(details.region.name, "Burgas");
    }

    #[test]
    fn test_seeded_generation_reproducible_through_service() {
        let egn = Egn::new();
        let options = GenerationOptions::default();

        let a = egn
            .generate_one_with(&options, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let b = egn
            .generate_one_with(&options, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(a, b);
        assert!(egn.validate(&a));
    }

    #[test]
    fn test_debug_does_not_require_provider_debug() {
        let egn = Egn::new().with_locale_provider(FixedLocale("en"));
        let debug = format!("{egn:?}");
        assert!(debug.contains("year_range"));
    }
}
