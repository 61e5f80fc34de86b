/// Seeded pseudo-random values for the lucky number draw
///
/// Not random in any statistical sense: the value is a chaotic but fully
/// deterministic function of the seed's leading digits and an index. The
/// operation order below is load-bearing; changing it changes every draw.

/// Leading decimal digits of `seed` as an f64, NaN when there are none
pub fn numeric_prefix(seed: &str) -> f64 {
    let end = seed
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(seed.len());
    if end == 0 {
        return f64::NAN;
    }
    seed[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Unit-interval value for (`seed`, `index`)
pub fn pseudo_random(seed: &str, index: u32) -> f64 {
    let n = numeric_prefix(seed);
    let mut value = (n * (index as f64 + 1.0)).sin() * 10000.0;
    value = (value.tan() * (value + index as f64).cos()).abs() * 9999.0;
    value - value.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("2000010120240107"), 2_000_010_120_240_107.0);
        assert_eq!(numeric_prefix("19900515dream"), 19_900_515.0);
        assert!(numeric_prefix("dream").is_nan());
        assert!(numeric_prefix("").is_nan());
    }

    #[test]
    fn test_golden_values() {
        // Regression anchors for the sin -> tan*cos -> frac chain
        assert_eq!(pseudo_random("2000010120240107", 0), 0.5163082397211838);
        assert_eq!(pseudo_random("2000010120240107", 1), 0.1410822890466079);
        assert_eq!(pseudo_random("2000010120240107", 5), 0.6960797634819755);
    }

    #[test]
    fn test_suffix_letters_do_not_change_value() {
        let seed = "1990051520240107";
        for i in 0..6 {
            assert_eq!(pseudo_random(seed, i), pseudo_random(&format!("{seed}dream"), i));
        }
    }

    #[test]
    fn test_unit_interval() {
        for i in 0..200 {
            let v = pseudo_random("1990051520240107", i);
            assert!((0.0..1.0).contains(&v), "index {i} gave {v}");
        }
    }
}
