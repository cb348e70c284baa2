/// Earliest year representable by the EGN century encoding (inclusive)
pub const MIN_YEAR: u16 = 1800;

/// Latest year representable by the EGN century encoding (inclusive)
pub const MAX_YEAR: u16 = 2099;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Length of a well-formed EGN code
pub const EGN_LENGTH: usize = 10;

/// Checksum weights applied positionally to the first nine digits
pub const CHECKSUM_WEIGHTS: [u32; 9] = [2, 4, 8, 5, 10, 9, 7, 3, 6];

/// Modulus of the weighted checksum; a remainder of 10 maps to check digit 0
pub const CHECKSUM_MODULUS: u32 = 11;

/// Month offset encoding births in the 1800s
pub const MONTH_OFFSET_1800S: u8 = 40;

/// Month offset encoding births in the 2000s
pub const MONTH_OFFSET_2000S: u8 = 20;

/// Highest region prefix of the three-digit serial
pub const MAX_REGION: u8 = 99;

/// Highest value of the three-digit serial
pub const MAX_SERIAL: u16 = 999;

/// Attempt budget for the partial-date sampling search in the generator
pub const DATE_SAMPLING_ATTEMPTS: u32 = 1000;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;
