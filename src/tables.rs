//! Static locale-keyed lookup tables: registration regions, zodiac signs,
//! month and weekday names.
//!
//! The region table partitions the serial space 0..=999 into contiguous
//! inclusive ranges by upper bound; the zodiac table covers every
//! (month, day) pair exactly once, with Capricorn wrapping the year end.

use crate::prelude::*;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Supported output locales for details resolution.
///
/// Unknown locale tags are not an error anywhere in the crate; they fall
/// back to the default, Bulgarian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[display(fmt = "bg")]
    Bg,
    #[display(fmt = "en")]
    En,
}

impl Locale {
    /// Matches a locale tag by its first two letters, case-insensitive
    /// (`"en-US"` resolves to `En`). Returns `None` for unsupported tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let prefix: String = tag.trim().chars().take(2).collect();
        match prefix.to_lowercase().as_str() {
            "bg" => Some(Self::Bg),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// One row of the region table: the inclusive upper bound of the serial
/// range registered to the region, and its localized names.
#[derive(Debug, Clone, Copy)]
pub struct RegionEntry {
    pub upper: u16,
    name_bg: &'static str,
    name_en: &'static str,
}

impl RegionEntry {
    pub fn name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Bg => self.name_bg,
            Locale::En => self.name_en,
        }
    }
}

const fn region(upper: u16, name_bg: &'static str, name_en: &'static str) -> RegionEntry {
    RegionEntry {
        upper,
        name_bg,
        name_en,
    }
}

/// Region serial ranges, strictly increasing in upper bound and ending at
/// 999 so every three-digit serial resolves to exactly one entry.
pub const REGIONS: [RegionEntry; 29] = [
    region(43, "Благоевград", "Blagoevgrad"),
    region(93, "Бургас", "Burgas"),
    region(139, "Варна", "Varna"),
    region(169, "Велико Търново", "Veliko Tarnovo"),
    region(183, "Видин", "Vidin"),
    region(217, "Враца", "Vratsa"),
    region(233, "Габрово", "Gabrovo"),
    region(281, "Кърджали", "Kardzhali"),
    region(301, "Кюстендил", "Kyustendil"),
    region(319, "Ловеч", "Lovech"),
    region(341, "Монтана", "Montana"),
    region(377, "Пазарджик", "Pazardzhik"),
    region(395, "Перник", "Pernik"),
    region(435, "Плевен", "Pleven"),
    region(501, "Пловдив", "Plovdiv"),
    region(527, "Разград", "Razgrad"),
    region(555, "Русе", "Ruse"),
    region(575, "Силистра", "Silistra"),
    region(601, "Сливен", "Sliven"),
    region(623, "Смолян", "Smolyan"),
    region(721, "София - град", "Sofia City"),
    region(751, "София - окръг", "Sofia District"),
    region(789, "Стара Загора", "Stara Zagora"),
    region(821, "Добрич (Толбухин)", "Dobrich (Tolbukhin)"),
    region(843, "Търговище", "Targovishte"),
    region(871, "Хасково", "Haskovo"),
    region(903, "Шумен", "Shumen"),
    region(925, "Ямбол", "Yambol"),
    region(999, "Друг/Неизвестен", "Other/Unknown"),
];

/// Finds the region entry for a three-digit serial along with the start of
/// its inclusive range. The serial must be 0..=999.
pub fn region_for(serial: u16) -> (&'static RegionEntry, u16) {
    const LAST: usize = REGIONS.len() - 1;

    let mut range_start = 0u16;
    for entry in &REGIONS[..LAST] {
        if serial <= entry.upper {
            return (entry, range_start);
        }
        range_start = entry.upper + 1;
    }
    // the table ends at 999, so any remaining serial lands here
    (&REGIONS[LAST], range_start)
}

/// One zodiac sign: an inclusive (month, day) interval plus localized name
/// and range label. Capricorn is the single entry with `start > end`; it
/// spans the December-January boundary.
#[derive(Debug, Clone, Copy)]
pub struct ZodiacEntry {
    start: (u8, u8),
    end: (u8, u8),
    name_bg: &'static str,
    name_en: &'static str,
    range_bg: &'static str,
    range_en: &'static str,
}

impl ZodiacEntry {
    pub fn name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Bg => self.name_bg,
            Locale::En => self.name_en,
        }
    }

    pub fn range(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Bg => self.range_bg,
            Locale::En => self.range_en,
        }
    }

    /// Inclusive containment; the wrapping entry matches the union of
    /// `[start, 12-31]` and `[01-01, end]`.
    pub fn contains(&self, month: u8, day: u8) -> bool {
        let md = (month, day);
        if self.start <= self.end {
            self.start <= md && md <= self.end
        } else {
            md >= self.start || md <= self.end
        }
    }
}

#[rustfmt::skip]
pub const ZODIAC: [ZodiacEntry; 12] = [
    ZodiacEntry { start: (3, 21), end: (4, 19), name_bg: "Овен", name_en: "Aries", range_bg: "21 март - 19 април", range_en: "21 March - 19 April" },
    ZodiacEntry { start: (4, 20), end: (5, 20), name_bg: "Телец", name_en: "Taurus", range_bg: "20 април - 20 май", range_en: "20 April - 20 May" },
    ZodiacEntry { start: (5, 21), end: (6, 20), name_bg: "Близнаци", name_en: "Gemini", range_bg: "21 май - 20 юни", range_en: "21 May - 20 June" },
    ZodiacEntry { start: (6, 21), end: (7, 22), name_bg: "Рак", name_en: "Cancer", range_bg: "21 юни - 22 юли", range_en: "21 June - 22 July" },
    ZodiacEntry { start: (7, 23), end: (8, 22), name_bg: "Лъв", name_en: "Leo", range_bg: "23 юли - 22 август", range_en: "23 July - 22 August" },
    ZodiacEntry { start: (8, 23), end: (9, 22), name_bg: "Дева", name_en: "Virgo", range_bg: "23 август - 22 септември", range_en: "23 August - 22 September" },
    ZodiacEntry { start: (9, 23), end: (10, 22), name_bg: "Везни", name_en: "Libra", range_bg: "23 септември - 22 октомври", range_en: "23 September - 22 October" },
    ZodiacEntry { start: (10, 23), end: (11, 21), name_bg: "Скорпион", name_en: "Scorpio", range_bg: "23 октомври - 21 ноември", range_en: "23 October - 21 November" },
    ZodiacEntry { start: (11, 22), end: (12, 21), name_bg: "Стрелец", name_en: "Sagittarius", range_bg: "22 ноември - 21 декември", range_en: "22 November - 21 December" },
    ZodiacEntry { start: (12, 22), end: (1, 19), name_bg: "Козирог", name_en: "Capricorn", range_bg: "22 декември - 19 януари", range_en: "22 December - 19 January" },
    ZodiacEntry { start: (1, 20), end: (2, 18), name_bg: "Водолей", name_en: "Aquarius", range_bg: "20 януари - 18 февруари", range_en: "20 January - 18 February" },
    ZodiacEntry { start: (2, 19), end: (3, 20), name_bg: "Риби", name_en: "Pisces", range_bg: "19 февруари - 20 март", range_en: "19 February - 20 March" },
];

/// Finds the zodiac sign containing the given (month, day). The table
/// covers the full calendar, so this is `None` only for nonsense input.
pub fn zodiac_for(month: u8, day: u8) -> Option<&'static ZodiacEntry> {
    ZODIAC.iter().find(|z| z.contains(month, day))
}

const MONTH_NAMES_BG: [&str; 12] = [
    "януари",
    "февруари",
    "март",
    "април",
    "май",
    "юни",
    "юли",
    "август",
    "септември",
    "октомври",
    "ноември",
    "декември",
];

const MONTH_NAMES_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Localized month name for a month 1..=12
pub fn month_name(locale: Locale, month: u8) -> Option<&'static str> {
    let index = usize::from(month.checked_sub(1)?);
    match locale {
        Locale::Bg => MONTH_NAMES_BG.get(index).copied(),
        Locale::En => MONTH_NAMES_EN.get(index).copied(),
    }
}

const WEEKDAY_NAMES_BG: [&str; 7] = [
    "понеделник",
    "вторник",
    "сряда",
    "четвъртък",
    "петък",
    "събота",
    "неделя",
];

const WEEKDAY_NAMES_EN: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Localized weekday name
pub fn weekday_name(locale: Locale, weekday: Weekday) -> &'static str {
    let index = weekday.num_days_from_monday() as usize;
    match locale {
        Locale::Bg => WEEKDAY_NAMES_BG[index],
        Locale::En => WEEKDAY_NAMES_EN[index],
    }
}
