/// Weekly lucky number generator
///
/// This module handles:
/// - Input validation (input.rs)
/// - Seed strings and the week key (seed.rs)
/// - The seeded trig chain (rng.rs)
/// - Preference pools and the weighted draw (pools.rs, draw.rs)
/// - Per-week history in the local store (history.rs, generator.rs)
/// - Display-only analysis and dream keyword reading (analysis.rs, dream.rs)

pub mod analysis;
pub mod draw;
pub mod dream;
pub mod generator;
pub mod history;
pub mod input;
pub mod pools;
pub mod rng;
pub mod seed;

pub use draw::WeightingScheme;
pub use generator::{Generated, LuckyGenerator};
pub use input::{Gender, GenerationInput, LuckyError};
