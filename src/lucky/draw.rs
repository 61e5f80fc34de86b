/// Weighted draw of six numbers from 1..=45

use serde::{Deserialize, Serialize};

use super::input::GenerationInput;
use super::pools::{PoolKind, PreferencePools, MAX_NUMBER, MIN_NUMBER};
use super::rng::pseudo_random;
use super::seed::seed;

/// Numbers per draw
pub const DRAW_SIZE: usize = 6;

/// How each slot's first random value is split across the preference pools.
///
/// Bands are cumulative upper bounds checked in order; the first band whose
/// bound exceeds the value and whose pool still has candidates wins. Values
/// past the last band draw uniformly from what remains.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightingScheme {
    /// name < 0.15, gender < 0.30, dream < 0.50, pattern < 0.70
    #[default]
    Full,
    /// dream < 0.40, pattern < 0.70
    DreamPattern,
}

impl WeightingScheme {
    pub fn bands(self) -> &'static [(PoolKind, f64)] {
        match self {
            WeightingScheme::Full => &[
                (PoolKind::Name, 0.15),
                (PoolKind::Gender, 0.30),
                (PoolKind::Dream, 0.50),
                (PoolKind::Pattern, 0.70),
            ],
            WeightingScheme::DreamPattern => &[(PoolKind::Dream, 0.40), (PoolKind::Pattern, 0.70)],
        }
    }
}

/// Scale a unit value to an index below `len`
fn pick_index(value: f64, len: usize) -> usize {
    ((value * len as f64).floor() as usize).min(len - 1)
}

/// Draw six distinct numbers for `input` using an already built seed string
pub fn draw_with_seed(input: &GenerationInput, seed: &str, scheme: WeightingScheme) -> [u8; DRAW_SIZE] {
    let pools = PreferencePools::from_input(input);
    let mut remaining: Vec<u8> = (MIN_NUMBER..=MAX_NUMBER).collect();
    let mut picked = [0u8; DRAW_SIZE];

    for (slot, out) in picked.iter_mut().enumerate() {
        let i = slot as u32;
        let roll = pseudo_random(seed, i);

        let from_pool = scheme
            .bands()
            .iter()
            .filter(|(_, upper)| roll < *upper)
            .find_map(|&(kind, _)| {
                let pool = pools.get(kind);
                let available: Vec<u8> = remaining
                    .iter()
                    .copied()
                    .filter(|n| pool.contains(n))
                    .collect();
                if available.is_empty() {
                    return None;
                }
                let value = pseudo_random(&format!("{seed}{}", kind.suffix()), i);
                Some(available[pick_index(value, available.len())])
            });

        let number = match from_pool {
            Some(number) => {
                remaining.retain(|&n| n != number);
                number
            }
            None => {
                let value = pseudo_random(&format!("{seed}{slot}"), i * 3);
                remaining.remove(pick_index(value, remaining.len()))
            }
        };
        *out = number;
    }

    picked.sort_unstable();
    picked
}

/// Seed and draw in one step
pub fn draw(
    input: &GenerationInput,
    week: &str,
    today: chrono::NaiveDate,
    scheme: WeightingScheme,
) -> [u8; DRAW_SIZE] {
    let seed = seed(input, week, today);
    tracing::debug!("🎲 Drawing with seed {seed} ({scheme:?})");
    draw_with_seed(input, &seed, scheme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lucky::input::Gender;
    use chrono::NaiveDate;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    fn assert_valid(numbers: &[u8; DRAW_SIZE]) {
        for pair in numbers.windows(2) {
            assert!(pair[0] < pair[1], "not strictly ascending: {numbers:?}");
        }
        assert!(numbers.iter().all(|n| (1..=45).contains(n)));
    }

    #[test]
    fn test_birthdate_only_golden() {
        let input = GenerationInput::from_form("19900515", "", "", None, "");
        let numbers = draw(&input, "2024-01-07", wednesday(), WeightingScheme::Full);
        assert_eq!(numbers, [5, 11, 15, 16, 20, 34]);
    }

    #[test]
    fn test_next_week_changes_result() {
        let input = GenerationInput::from_form("19900515", "", "", None, "");
        let next = draw(&input, "2024-01-14", wednesday(), WeightingScheme::Full);
        assert_eq!(next, [1, 5, 15, 20, 33, 45]);
    }

    #[test]
    fn test_full_input_golden_for_both_schemes() {
        let input = GenerationInput::from_form(
            "19851231",
            "0730",
            "Minji",
            Some(Gender::Female),
            "돈 부자 바다",
        );
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(
            draw(&input, "2024-03-10", today, WeightingScheme::Full),
            [3, 15, 16, 24, 37, 43]
        );
        assert_eq!(
            draw(&input, "2024-03-10", today, WeightingScheme::DreamPattern),
            [15, 23, 31, 35, 37, 43]
        );
    }

    #[test]
    fn test_always_six_distinct_sorted() {
        let names = ["", "A", "김철수", "Zoë"];
        let dreams = ["", "water", "돈 부자 재물 건강", "a b c d e f g h"];
        for year in [1950, 1977, 1999, 2010] {
            for (k, name) in names.iter().enumerate() {
                let birthdate = format!("{year}{:02}{:02}", k + 1, k * 7 + 1);
                let gender = [None, Some(Gender::Male), Some(Gender::Female)][k % 3];
                let input = GenerationInput::from_form(&birthdate, "1245", name, gender, dreams[k]);
                for scheme in [WeightingScheme::Full, WeightingScheme::DreamPattern] {
                    assert_valid(&draw(&input, "2025-06-01", wednesday(), scheme));
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let input = GenerationInput::from_form("20010911", "2300", "", Some(Gender::Male), "bird");
        let a = draw(&input, "2024-01-07", wednesday(), WeightingScheme::Full);
        let b = draw(&input, "2024-01-07", wednesday(), WeightingScheme::Full);
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_numeric_seed_still_draws() {
        // NaN rolls skip every band and fall back to the uniform branch
        let input = GenerationInput::default();
        let numbers = draw_with_seed(&input, "abc", WeightingScheme::Full);
        assert_valid(&numbers);
    }
}
