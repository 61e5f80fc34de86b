use chrono::NaiveDateTime;

use super::draw::{draw, WeightingScheme, DRAW_SIZE};
use super::history::{History, HistoryRecord};
use super::input::{GenerationInput, LuckyError};
use super::seed::week_key;
use crate::state::LocalStore;

/// Result of one press of the generate button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub numbers: [u8; DRAW_SIZE],
    pub week: String,
    /// False when the numbers came from this week's history
    pub fresh: bool,
}

/// Owns the history and its store; everything the lucky page needs
pub struct LuckyGenerator {
    store: LocalStore,
    history: History,
    scheme: WeightingScheme,
}

impl LuckyGenerator {
    pub fn new(store: LocalStore, history_limit: usize, scheme: WeightingScheme) -> Result<Self, LuckyError> {
        let history = History::load(&store, history_limit)?;
        match store.path() {
            Some(path) => tracing::info!("🍀 Loaded {} history records from {}", history.len(), path.display()),
            None => tracing::info!("🍀 Loaded {} history records (not persisted)", history.len()),
        }
        Ok(Self {
            store,
            history,
            scheme,
        })
    }

    /// Validate, then return this week's numbers for `input`.
    ///
    /// A repeat request in the same week returns the stored numbers without
    /// drawing again. Nothing is written when validation fails.
    pub fn generate(&mut self, input: &GenerationInput, now: NaiveDateTime) -> Result<Generated, LuckyError> {
        input.validate()?;

        let today = now.date();
        let week = week_key(today);

        if let Some(existing) = self.history.find(&week, input) {
            tracing::debug!("♻️  Reusing numbers for week {week}");
            return Ok(Generated {
                numbers: existing.numbers,
                week,
                fresh: false,
            });
        }

        let numbers = draw(input, &week, today, self.scheme);
        let mut updated = self.history.clone();
        updated.push_front(HistoryRecord {
            date: week.clone(),
            time: now.format("%H:%M").to_string(),
            numbers,
            inputs: input.clone(),
        });
        // Only keep the record once it is on disk
        updated.save(&self.store)?;
        self.history = updated;

        tracing::info!("✅ Generated {:?} for week {}", numbers, week);
        Ok(Generated {
            numbers,
            week,
            fresh: true,
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

}

impl std::fmt::Debug for LuckyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LuckyGenerator")
            .field("store", &self.store)
            .field("records", &self.history.len())
            .field("scheme", &self.scheme)
            .finish()
    }
}
