/// Seed construction for the lucky number draw
///
/// The seed is a plain string. Only its leading digits feed the trig chain in
/// `rng.rs`, so every component appended here is rendered as digits.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use super::input::{Gender, GenerationInput};

/// Multiplier applied to the name hash
pub const NAME_PRIME: i64 = 2_654_435_761;

/// Constant appended for each gender value
pub const fn gender_constant(gender: Gender) -> u64 {
    match gender {
        Gender::Male => 1_000_000_007,
        Gender::Female => 998_244_353,
    }
}

/// Rolling `hash * 31 + unit` over UTF-16 code units, wrapped to i32
pub fn poly_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Name contribution: |poly_hash(name) * NAME_PRIME|
pub fn name_hash(name: &str) -> u64 {
    (poly_hash(name) as i64 * NAME_PRIME).unsigned_abs()
}

/// The upcoming Sunday (today if today is Sunday)
pub fn upcoming_sunday(today: NaiveDate) -> NaiveDate {
    let days = (7 - today.weekday().num_days_from_sunday() as i64) % 7;
    today + Duration::days(days)
}

/// Week rotation key, `YYYY-MM-DD` of the upcoming Sunday
pub fn week_key(today: NaiveDate) -> String {
    upcoming_sunday(today).format("%Y-%m-%d").to_string()
}

/// Midnight of the next Sunday strictly after `now`
pub fn next_refresh(now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date();
    let days = match today.weekday() {
        Weekday::Sun => 7,
        other => 7 - other.num_days_from_sunday() as i64,
    };
    (today + Duration::days(days))
        .and_hms_opt(0, 0, 0)
        .unwrap_or(now)
}

/// Build the seed string for `input` in the week identified by `week`.
///
/// Order: birthdate (or today), week digits, name hash, gender constant,
/// birthtime, dream hash. Empty optional fields contribute nothing.
pub fn seed(input: &GenerationInput, week: &str, today: NaiveDate) -> String {
    let mut seed = if input.birthdate.is_empty() {
        today.format("%Y%m%d").to_string()
    } else {
        input.birthdate.clone()
    };

    seed.extend(week.chars().filter(char::is_ascii_digit));

    if !input.name.is_empty() {
        seed.push_str(&name_hash(&input.name).to_string());
    }
    if let Some(gender) = input.gender {
        seed.push_str(&gender_constant(gender).to_string());
    }
    seed.push_str(&input.birthtime);
    if !input.dream.is_empty() {
        seed.push_str(&poly_hash(&input.dream).unsigned_abs().to_string());
    }

    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_poly_hash_known_values() {
        assert_eq!(poly_hash(""), 0);
        assert_eq!(poly_hash("abc"), 96354);
        assert_eq!(poly_hash("hello"), 99162322);
        // Hangul syllables hash by their UTF-16 unit
        assert_eq!(poly_hash("꿈"), 45000);
    }

    #[test]
    fn test_poly_hash_wraps() {
        // Long input must wrap instead of overflowing
        let long = "z".repeat(64);
        let _ = poly_hash(&long);
        assert_eq!(name_hash("hello"), 263_220_013_660_597_042);
    }

    #[test]
    fn test_week_key() {
        // Wednesday -> following Sunday
        assert_eq!(week_key(date(2024, 1, 3)), "2024-01-07");
        // Saturday -> next day
        assert_eq!(week_key(date(2024, 1, 6)), "2024-01-07");
        // Sunday is its own key
        assert_eq!(week_key(date(2024, 1, 7)), "2024-01-07");
        // Monday rolls over to the next week
        assert_eq!(week_key(date(2024, 1, 8)), "2024-01-14");
        // Month boundary
        assert_eq!(week_key(date(2024, 2, 27)), "2024-03-03");
    }

    #[test]
    fn test_next_refresh() {
        let wed = date(2024, 1, 3).and_hms_opt(15, 30, 0).unwrap();
        assert_eq!(next_refresh(wed), date(2024, 1, 7).and_hms_opt(0, 0, 0).unwrap());

        let sun = date(2024, 1, 7).and_hms_opt(0, 0, 1).unwrap();
        assert_eq!(next_refresh(sun), date(2024, 1, 14).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_seed_birthdate_and_week_only() {
        let input = GenerationInput::from_form("20000101", "", "", None, "");
        assert_eq!(seed(&input, "2024-01-07", date(2024, 1, 3)), "2000010120240107");
    }

    #[test]
    fn test_seed_component_order() {
        let input = GenerationInput::from_form(
            "19851231",
            "0730",
            "Minji",
            Some(Gender::Female),
            "돈 부자 바다",
        );
        assert_eq!(
            seed(&input, "2024-03-10", date(2024, 3, 6)),
            "198512312024031019735271461979075399824435307301327304456"
        );
    }

    #[test]
    fn test_seed_without_birthdate_uses_today() {
        let input = GenerationInput::default();
        assert_eq!(seed(&input, "2024-01-07", date(2024, 1, 3)), "2024010320240107");
    }
}
