/// Keyword reading of dream text. Display only; it never feeds the draw.

/// Numbers shown when no theme keyword matches
const DEFAULT_LUCKY: &[u8] = &[1, 7, 8, 9, 13, 17, 23, 33, 37, 42, 45];

struct Theme {
    label: &'static str,
    triggers: &'static [&'static str],
    numbers: &'static [u8],
}

const THEMES: &[Theme] = &[
    Theme {
        label: "Wealth",
        triggers: &["돈", "부자", "재물", "money", "rich"],
        numbers: &[2, 6, 8, 9, 12, 18, 24, 28, 33, 42],
    },
    Theme {
        label: "Success",
        triggers: &["승진", "합격", "성공", "promotion", "success"],
        numbers: &[1, 3, 5, 7, 11, 21, 27, 37, 41, 43],
    },
    Theme {
        label: "Health",
        triggers: &["건강", "치유", "병원", "health", "hospital"],
        numbers: &[4, 10, 14, 19, 24, 29, 31, 36, 38, 40],
    },
    Theme {
        label: "Love",
        triggers: &["사랑", "연인", "결혼", "love", "wedding"],
        numbers: &[3, 6, 9, 12, 15, 21, 24, 30, 33, 36],
    },
    Theme {
        label: "Family",
        triggers: &["가족", "부모", "자식", "family", "parents"],
        numbers: &[5, 8, 13, 16, 22, 25, 30, 35, 38, 42],
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DreamReading {
    pub themes: Vec<&'static str>,
    /// Deduplicated, in theme order
    pub lucky_numbers: Vec<u8>,
}

/// Match theme keywords in `dream`; an empty dream reads as nothing at all
pub fn read_dream(dream: &str) -> DreamReading {
    let text = dream.trim().to_lowercase();
    if text.is_empty() {
        return DreamReading::default();
    }

    let mut reading = DreamReading::default();
    for theme in THEMES {
        if theme.triggers.iter().any(|t| text.contains(t)) {
            reading.themes.push(theme.label);
            for &n in theme.numbers {
                if !reading.lucky_numbers.contains(&n) {
                    reading.lucky_numbers.push(n);
                }
            }
        }
    }

    if reading.lucky_numbers.is_empty() {
        reading.lucky_numbers = DEFAULT_LUCKY.to_vec();
    }
    reading
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dream() {
        assert_eq!(read_dream("  "), DreamReading::default());
    }

    #[test]
    fn test_theme_match() {
        let reading = read_dream("부자가 되어 결혼하는 꿈");
        assert_eq!(reading.themes, vec!["Wealth", "Love"]);
        assert!(reading.lucky_numbers.contains(&42));
        assert!(reading.lucky_numbers.contains(&15));
        // 6, 9, 12, 24, 33 appear in both themes but only once here
        assert_eq!(reading.lucky_numbers.iter().filter(|&&n| n == 24).count(), 1);
    }

    #[test]
    fn test_no_theme_uses_default() {
        let reading = read_dream("A Blue Whale");
        assert!(reading.themes.is_empty());
        assert_eq!(reading.lucky_numbers, DEFAULT_LUCKY.to_vec());
    }
}
