//! Pure encode/decode functions for the 10-digit EGN format.
//!
//! An EGN packs a birth date, a region serial and a gender bit into nine
//! digits, followed by a weighted mod-11 check digit. The century is not
//! stored directly: the two month digits are offset by 0, 20 or 40 to
//! jointly encode the month and one of three centuries.

use crate::EgnError;
use crate::consts::{
    CHECKSUM_MODULUS, CHECKSUM_WEIGHTS, EGN_LENGTH, MAX_MONTH, MONTH_OFFSET_1800S,
    MONTH_OFFSET_2000S,
};
use crate::types::{Gender, ParsedEgn, is_valid_date};

/// Weighted mod-11 checksum of the first nine digits.
///
/// A remainder of 10 maps to check digit 0; this is part of the encoding,
/// not an error case.
pub fn checksum(digits: &[u8; 9]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(CHECKSUM_WEIGHTS)
        .map(|(&d, w)| u32::from(d) * w)
        .sum();

    let rem = sum % CHECKSUM_MODULUS;
    if rem == 10 { 0 } else { rem as u8 }
}

/// Forward half of the century encoding: the month digits to write for a
/// birth in the given year.
///
/// # Errors
/// Returns `EgnError::InvalidOption` if `year` is outside 1800..=2099.
pub fn encode_month(year: u16, month: u8) -> Result<u8, EgnError> {
    match year {
        1800..=1899 => Ok(month + MONTH_OFFSET_1800S),
        1900..=1999 => Ok(month),
        2000..=2099 => Ok(month + MONTH_OFFSET_2000S),
        _ => Err(EgnError::InvalidOption(format!(
            "year {year} is outside the representable range 1800..2099"
        ))),
    }
}

/// Reverse half of the century encoding: recovers (year, month) from the
/// two-digit year and the encoded month digits.
///
/// # Errors
/// Returns `EgnError::InvalidMonthEncoding` if the encoded month falls in
/// none of the three recognized bands.
pub fn decode_year_month(yy: u8, encoded_month: u8) -> Result<(u16, u8), EgnError> {
    let yy = u16::from(yy);
    match encoded_month {
        1..=MAX_MONTH => Ok((1900 + yy, encoded_month)),
        m if (MONTH_OFFSET_2000S + 1..=MONTH_OFFSET_2000S + MAX_MONTH).contains(&m) => {
            Ok((2000 + yy, m - MONTH_OFFSET_2000S))
        }
        m if (MONTH_OFFSET_1800S + 1..=MONTH_OFFSET_1800S + MAX_MONTH).contains(&m) => {
            Ok((1800 + yy, m - MONTH_OFFSET_1800S))
        }
        m => Err(EgnError::InvalidMonthEncoding(m)),
    }
}

/// Parses and fully validates an EGN.
///
/// Checks, in order: shape (exactly 10 ASCII digits), the century/month
/// encoding, calendar validity of the date (Gregorian leap rules), and the
/// check digit. The gender is the parity of the ninth digit.
///
/// # Errors
/// Returns the first failing check as `EgnError::MalformedInput`,
/// `EgnError::InvalidMonthEncoding`, `EgnError::InvalidDate` or
/// `EgnError::ChecksumMismatch`.
pub fn parse(egn: &str) -> Result<ParsedEgn, EgnError> {
    let digits = digits_of(egn)?;

    let yy = digits[0] * 10 + digits[1];
    let encoded_month = digits[2] * 10 + digits[3];
    let day = digits[4] * 10 + digits[5];

    let (year, month) = decode_year_month(yy, encoded_month)?;

    if !is_valid_date(year, month, day) {
        return Err(EgnError::InvalidDate { year, month, day });
    }

    let first_nine: [u8; 9] = digits[..9]
        .try_into()
        .map_err(|_| EgnError::MalformedInput)?;
    if checksum(&first_nine) != digits[9] {
        return Err(EgnError::ChecksumMismatch);
    }

    let gender = Gender::from_digit(digits[8]);

    Ok(ParsedEgn::new(year, month, day, gender))
}

/// Whether the code parses as a valid EGN
pub fn is_valid(egn: &str) -> bool {
    parse(egn).is_ok()
}

fn digits_of(egn: &str) -> Result<[u8; EGN_LENGTH], EgnError> {
    if egn.len() != EGN_LENGTH {
        return Err(EgnError::MalformedInput);
    }

    let mut digits = [0u8; EGN_LENGTH];
    for (slot, byte) in digits.iter_mut().zip(egn.bytes()) {
        if !byte.is_ascii_digit() {
            return Err(EgnError::MalformedInput);
        }
        *slot = byte - b'0';
    }

    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_valid_egn() {
        let parsed = parse("6101057509").unwrap();
        assert_eq!(parsed.year(), 1961);
        assert_eq!(parsed.month(), 1);
        assert_eq!(parsed.day(), 5);
        assert_eq!(parsed.gender(), Gender::Female);
    }

    #[test]
    fn test_parse_sample_8702260780() {
        let parsed = parse("8702260780").unwrap();
        assert_eq!(parsed.year(), 1987);
        assert_eq!(parsed.month(), 2);
        assert_eq!(parsed.day(), 26);
        assert_eq!(parsed.gender(), Gender::Female);
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("6101057509"));
        assert!(is_valid("8702260780"));
    }

    #[test]
    fn test_rejects_checksum_mismatch() {
        let result = parse("6101057508");
        assert!(matches!(result, Err(EgnError::ChecksumMismatch)));
        assert!(!is_valid("6101057508"));
    }

    #[test]
    fn test_rejects_invalid_date() {
        // day 32 does not exist in February
        let result = parse("6102327503");
        assert!(matches!(result, Err(EgnError::InvalidDate { .. })));
        assert!(!is_valid("6102327503"));
    }

    #[test]
    fn test_rejects_malformed_input() {
        for code in ["", "123", "12345678901", "61010575O9", "6101 57509"] {
            assert!(
                matches!(parse(code), Err(EgnError::MalformedInput)),
                "expected MalformedInput for {code:?}"
            );
        }
    }

    #[test]
    fn test_rejects_unrecognized_month_band() {
        // encoded month 00
        assert!(matches!(
            parse("6100057509"),
            Err(EgnError::InvalidMonthEncoding(0))
        ));
        // encoded months in the gaps between bands
        for mm in [13, 20, 33, 40, 53, 99] {
            let code = format!("61{mm:02}057509");
            assert!(
                matches!(parse(&code), Err(EgnError::InvalidMonthEncoding(_))),
                "expected InvalidMonthEncoding for encoded month {mm}"
            );
        }
    }

    #[test]
    fn test_decode_year_month_bands() {
        assert_eq!(decode_year_month(61, 1).unwrap(), (1961, 1));
        assert_eq!(decode_year_month(61, 12).unwrap(), (1961, 12));
        assert_eq!(decode_year_month(5, 21).unwrap(), (2005, 1));
        assert_eq!(decode_year_month(5, 32).unwrap(), (2005, 12));
        assert_eq!(decode_year_month(80, 41).unwrap(), (1880, 1));
        assert_eq!(decode_year_month(80, 52).unwrap(), (1880, 12));
    }

    #[test]
    fn test_encode_month_per_century() {
        assert_eq!(encode_month(1880, 3).unwrap(), 43);
        assert_eq!(encode_month(1961, 3).unwrap(), 3);
        assert_eq!(encode_month(2005, 3).unwrap(), 23);
    }

    #[test]
    fn test_encode_month_rejects_out_of_range_year() {
        assert!(matches!(
            encode_month(1799, 6),
            Err(EgnError::InvalidOption(_))
        ));
        assert!(matches!(
            encode_month(2100, 6),
            Err(EgnError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for year in [1800u16, 1899, 1900, 1999, 2000, 2099] {
            for month in 1..=12u8 {
                let encoded = encode_month(year, month).unwrap();
                let (y, m) = decode_year_month((year % 100) as u8, encoded).unwrap();
                assert_eq!((y, m), (year, month));
            }
        }
    }

    #[test]
    fn test_checksum_reproduces_check_digit() {
        for code in ["6101057509", "8702260780"] {
            let digits: Vec<u8> = code.bytes().map(|b| b - b'0').collect();
            let first_nine: [u8; 9] = digits[..9].try_into().unwrap();
            assert_eq!(checksum(&first_nine), digits[9], "checksum of {code}");
        }
    }

    #[test]
    fn test_checksum_remainder_ten_maps_to_zero() {
        // weighted sum of [5,0,0,0,0,0,0,0,0] is 5 * 2 = 10, i.e. 10 mod 11
        let digits = [5u8, 0, 0, 0, 0, 0, 0, 0, 0];
        let sum: u32 = digits
            .iter()
            .zip(CHECKSUM_WEIGHTS)
            .map(|(&d, w)| u32::from(d) * w)
            .sum();
        assert_eq!(sum % CHECKSUM_MODULUS, 10);
        assert_eq!(checksum(&digits), 0);
    }

    #[test]
    fn test_gender_parity_of_ninth_digit() {
        // 8702260780: ninth digit is 8 (even) -> female
        assert_eq!(parse("8702260780").unwrap().gender(), Gender::Female);
    }
}
