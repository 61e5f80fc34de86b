/// Per-week history of generated numbers
///
/// Records live most-recent-first in one JSON array under `HISTORY_KEY` in the
/// local store. A record is identified by its week key plus the exact input,
/// which is what makes generation idempotent within a week.

use serde::{Deserialize, Serialize};

use super::draw::DRAW_SIZE;
use super::input::GenerationInput;
use crate::state::{LocalStore, StoreError};

/// Local store key holding the history array
pub const HISTORY_KEY: &str = "lottoHistory";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    /// Week key (upcoming Sunday, YYYY-MM-DD)
    pub date: String,
    /// HH:MM when the record was created
    pub time: String,
    pub numbers: [u8; DRAW_SIZE],
    pub inputs: GenerationInput,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    records: Vec<HistoryRecord>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit,
        }
    }

    /// Load history from the store.
    ///
    /// A missing key gives an empty history. So does a value that no longer
    /// parses; it is logged and removed from the store.
    pub fn load(store: &LocalStore, limit: usize) -> Result<Self, StoreError> {
        let mut history = Self::new(limit);
        if let Some(raw) = store.get(HISTORY_KEY)? {
            match serde_json::from_str::<Vec<HistoryRecord>>(&raw) {
                Ok(records) => history.records = records,
                Err(e) => {
                    tracing::warn!("⚠️  Discarding unreadable history: {e}");
                    store.remove(HISTORY_KEY)?;
                }
            }
        }
        history.records.truncate(limit);
        Ok(history)
    }

    pub fn save(&self, store: &LocalStore) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.records)?;
        store.set(HISTORY_KEY, &raw)
    }

    /// Existing record for this week and input, if any
    pub fn find(&self, week: &str, input: &GenerationInput) -> Option<&HistoryRecord> {
        self.records
            .iter()
            .find(|record| record.date == week && record.inputs == *input)
    }

    /// Prepend a record, evicting the oldest beyond the limit
    pub fn push_front(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.limit);
    }

    /// All records, most recent first
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Records from weeks other than `current_week`, newest week first
    pub fn past_weeks(&self, current_week: &str) -> Vec<&HistoryRecord> {
        let mut past: Vec<&HistoryRecord> = self
            .records
            .iter()
            .filter(|record| record.date != current_week)
            .collect();
        past.sort_by(|a, b| b.date.cmp(&a.date));
        past
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, birthdate: &str) -> HistoryRecord {
        HistoryRecord {
            date: date.to_string(),
            time: "12:00".to_string(),
            numbers: [1, 2, 3, 4, 5, 6],
            inputs: GenerationInput::from_form(birthdate, "", "", None, ""),
        }
    }

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut history = History::new(30);
        for i in 0..35 {
            history.push_front(record("2024-01-07", &format!("1990{:04}", i)));
        }
        assert_eq!(history.len(), 30);
        assert_eq!(history.records()[0].inputs.birthdate, "19900034");
        assert_eq!(history.records()[29].inputs.birthdate, "19900005");
    }

    #[test]
    fn test_find_requires_week_and_input() {
        let mut history = History::new(30);
        history.push_front(record("2024-01-07", "19900515"));

        let input = GenerationInput::from_form("19900515", "", "", None, "");
        assert!(history.find("2024-01-07", &input).is_some());
        assert!(history.find("2024-01-14", &input).is_none());

        let other = GenerationInput::from_form("19900515", "0100", "", None, "");
        assert!(history.find("2024-01-07", &other).is_none());
    }

    #[test]
    fn test_round_trip_through_store() {
        let store = LocalStore::in_memory().unwrap();
        let mut history = History::new(30);
        history.push_front(record("2024-01-07", "19900515"));
        history.save(&store).unwrap();

        let loaded = History::load(&store, 30).unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_corrupt_value_loads_empty() {
        let store = LocalStore::in_memory().unwrap();
        store.set(HISTORY_KEY, "{ definitely not an array").unwrap();
        assert!(History::load(&store, 30).unwrap().is_empty());
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn test_older_records_without_new_fields_load() {
        // Records written before name/gender existed
        let store = LocalStore::in_memory().unwrap();
        store
            .set(
                HISTORY_KEY,
                r#"[{"date":"2024-01-07","time":"09:15","numbers":[1,7,13,22,30,41],
                    "inputs":{"birthdate":"19900515","birthtime":"","dream":""}}]"#,
            )
            .unwrap();

        let history = History::load(&store, 30).unwrap();
        let input = GenerationInput::from_form("19900515", "", "", None, "");
        assert_eq!(
            history.find("2024-01-07", &input).map(|r| r.numbers),
            Some([1, 7, 13, 22, 30, 41])
        );
    }

    #[test]
    fn test_past_weeks_excludes_current() {
        let mut history = History::new(30);
        history.push_front(record("2023-12-24", "19900515"));
        history.push_front(record("2024-01-07", "19900515"));
        history.push_front(record("2023-12-31", "19900515"));

        let past: Vec<&str> = history
            .past_weeks("2024-01-07")
            .iter()
            .map(|r| r.date.as_str())
            .collect();
        assert_eq!(past, vec!["2023-12-31", "2023-12-24"]);
    }
}
