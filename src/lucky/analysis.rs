/// Descriptive statistics shown under a drawn set

use super::draw::DRAW_SIZE;

/// Reference set the draw is compared against
pub const RECENT_WINNING: [u8; DRAW_SIZE] = [3, 7, 12, 24, 31, 45];

/// Colour band of a number, matching the range buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBand {
    UpTo10,
    UpTo20,
    UpTo30,
    UpTo40,
    UpTo45,
}

impl NumberBand {
    pub fn of(number: u8) -> Self {
        match number {
            0..=10 => NumberBand::UpTo10,
            11..=20 => NumberBand::UpTo20,
            21..=30 => NumberBand::UpTo30,
            31..=40 => NumberBand::UpTo40,
            _ => NumberBand::UpTo45,
        }
    }

    /// Display colour as RGB
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            NumberBand::UpTo10 => (0xFF, 0xB3, 0x00),
            NumberBand::UpTo20 => (0x29, 0xB6, 0xF6),
            NumberBand::UpTo30 => (0xEF, 0x53, 0x50),
            NumberBand::UpTo40 => (0x66, 0xBB, 0x6A),
            NumberBand::UpTo45 => (0xAB, 0x47, 0xBC),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumberBand::UpTo10 => "1-10",
            NumberBand::UpTo20 => "11-20",
            NumberBand::UpTo30 => "21-30",
            NumberBand::UpTo40 => "31-40",
            NumberBand::UpTo45 => "41-45",
        }
    }

    pub const ALL: [NumberBand; 5] = [
        NumberBand::UpTo10,
        NumberBand::UpTo20,
        NumberBand::UpTo30,
        NumberBand::UpTo40,
        NumberBand::UpTo45,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberAnalysis {
    pub sum: u32,
    pub average: f64,
    pub odd: usize,
    pub even: usize,
    /// Mean difference between neighbouring numbers
    pub average_gap: f64,
    pub distinct_last_digits: usize,
    /// Count per `NumberBand::ALL` bucket
    pub ranges: [usize; 5],
    /// (max - min) / 5
    pub spread: f64,
    /// 45 / 6
    pub theoretical_spread: f64,
    pub has_consecutive: bool,
    pub recent_matches: usize,
}

impl NumberAnalysis {
    /// Analyse an ascending draw
    pub fn of(numbers: &[u8; DRAW_SIZE]) -> Self {
        let sum: u32 = numbers.iter().map(|&n| n as u32).sum();
        let odd = numbers.iter().filter(|&&n| n % 2 == 1).count();

        let gaps: Vec<u32> = numbers
            .windows(2)
            .map(|pair| pair[1].saturating_sub(pair[0]) as u32)
            .collect();
        let average_gap = gaps.iter().sum::<u32>() as f64 / gaps.len() as f64;

        let mut last_digits: Vec<u8> = numbers.iter().map(|n| n % 10).collect();
        last_digits.sort_unstable();
        last_digits.dedup();

        let mut ranges = [0usize; 5];
        for &n in numbers {
            let bucket = NumberBand::ALL
                .iter()
                .position(|band| *band == NumberBand::of(n))
                .unwrap_or(0);
            ranges[bucket] += 1;
        }

        let span = numbers[DRAW_SIZE - 1].saturating_sub(numbers[0]) as f64;

        Self {
            sum,
            average: sum as f64 / DRAW_SIZE as f64,
            odd,
            even: DRAW_SIZE - odd,
            average_gap,
            distinct_last_digits: last_digits.len(),
            ranges,
            spread: span / (DRAW_SIZE - 1) as f64,
            theoretical_spread: 45.0 / DRAW_SIZE as f64,
            has_consecutive: gaps.contains(&1),
            recent_matches: numbers.iter().filter(|n| RECENT_WINNING.contains(n)).count(),
        }
    }

    /// Both parities appear at least twice
    pub fn is_balanced(&self) -> bool {
        self.odd > 1 && self.even > 1
    }

    /// At least four different last digits
    pub fn is_diverse(&self) -> bool {
        self.distinct_last_digits >= 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis() {
        let a = NumberAnalysis::of(&[5, 11, 15, 16, 20, 34]);
        assert_eq!(a.sum, 101);
        assert!((a.average - 101.0 / 6.0).abs() < 1e-9);
        assert_eq!((a.odd, a.even), (3, 3));
        assert!((a.average_gap - 5.8).abs() < 1e-9);
        // last digits 5,1,5,6,0,4
        assert_eq!(a.distinct_last_digits, 5);
        assert_eq!(a.ranges, [1, 4, 0, 1, 0]);
        assert!((a.spread - 5.8).abs() < 1e-9);
        assert!((a.theoretical_spread - 7.5).abs() < 1e-9);
        assert!(a.has_consecutive);
        assert_eq!(a.recent_matches, 0);
        assert!(a.is_balanced());
        assert!(a.is_diverse());
    }

    #[test]
    fn test_matches_reference_set() {
        let a = NumberAnalysis::of(&[3, 7, 12, 24, 31, 45]);
        assert_eq!(a.recent_matches, 6);
        assert!(!a.has_consecutive);
        assert_eq!(a.ranges, [2, 1, 1, 1, 1]);
    }

    #[test]
    fn test_bands() {
        assert_eq!(NumberBand::of(10), NumberBand::UpTo10);
        assert_eq!(NumberBand::of(11), NumberBand::UpTo20);
        assert_eq!(NumberBand::of(40), NumberBand::UpTo40);
        assert_eq!(NumberBand::of(45), NumberBand::UpTo45);
    }
}
