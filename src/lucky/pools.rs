/// Preference pools: subsets of 1..=45 favoured by one input heuristic each

use super::input::{Gender, GenerationInput};
use super::seed::poly_hash;

pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 45;

/// Which heuristic a pool (and a draw band) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Name,
    Gender,
    Dream,
    Pattern,
}

impl PoolKind {
    /// Salt appended to the seed when drawing from this pool
    pub fn suffix(self) -> &'static str {
        match self {
            PoolKind::Name => "name",
            PoolKind::Gender => "gender",
            PoolKind::Dream => "dream",
            PoolKind::Pattern => "pattern",
        }
    }
}

/// All preference pools derived from one input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencePools {
    pub name: Vec<u8>,
    pub gender: Vec<u8>,
    pub dream: Vec<u8>,
    pub pattern: Vec<u8>,
}

impl PreferencePools {
    pub fn from_input(input: &GenerationInput) -> Self {
        Self {
            name: name_pool(&input.name),
            gender: input.gender.map(gender_pool).unwrap_or_default(),
            dream: dream_pool(&input.dream),
            pattern: pattern_pool(&input.birthdate, &input.birthtime),
        }
    }

    pub fn get(&self, kind: PoolKind) -> &[u8] {
        match kind {
            PoolKind::Name => &self.name,
            PoolKind::Gender => &self.gender,
            PoolKind::Dream => &self.dream,
            PoolKind::Pattern => &self.pattern,
        }
    }
}

/// Map any non-negative value into 1..=45
fn fold(value: u64) -> u8 {
    (value % MAX_NUMBER as u64) as u8 + 1
}

fn push_unique(pool: &mut Vec<u8>, n: u8) {
    if !pool.contains(&n) {
        pool.push(n);
    }
}

/// Per code unit `unit % 45 + 1`, then adjacent pair sums the same way
pub fn name_pool(name: &str) -> Vec<u8> {
    let units: Vec<u16> = name.encode_utf16().collect();
    let mut pool = Vec::new();
    for &unit in &units {
        push_unique(&mut pool, fold(unit as u64));
    }
    for pair in units.windows(2) {
        push_unique(&mut pool, fold(pair[0] as u64 + pair[1] as u64));
    }
    pool
}

/// Odd numbers for male, even numbers for female
pub fn gender_pool(gender: Gender) -> Vec<u8> {
    let parity = match gender {
        Gender::Male => 1,
        Gender::Female => 0,
    };
    (MIN_NUMBER..=MAX_NUMBER).filter(|n| n % 2 == parity).collect()
}

/// One number per whitespace-separated word of the dream text
pub fn dream_pool(dream: &str) -> Vec<u8> {
    let mut pool = Vec::new();
    for word in dream.split_whitespace() {
        push_unique(&mut pool, fold(poly_hash(word).unsigned_abs() as u64));
    }
    pool
}

/// Date and time arithmetic that lands in 1..=45
pub fn pattern_pool(birthdate: &str, birthtime: &str) -> Vec<u8> {
    let mut pool = Vec::new();
    let mut keep = |value: u32| {
        if (1..=MAX_NUMBER as u32).contains(&value) {
            push_unique(&mut pool, value as u8);
        }
    };

    if let (Some(year), Some(month), Some(day)) = (
        digits(birthdate, 2..4),
        digits(birthdate, 4..6),
        digits(birthdate, 6..8),
    ) {
        keep(day);
        keep(month);
        keep(year);
        keep(month + day);
    }

    if let (Some(hour), Some(minute)) = (digits(birthtime, 0..2), digits(birthtime, 2..4)) {
        keep(hour);
        keep(minute);
        keep(hour + minute);
    }

    pool
}

fn digits(value: &str, range: std::ops::Range<usize>) -> Option<u32> {
    value.get(range)?.parse().ok()
}
