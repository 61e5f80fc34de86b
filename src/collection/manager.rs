/// The ordered image collection
///
/// List order is both the display order and the order sent to the merge
/// service. Intake happens in two phases: `plan_intake` validates candidates
/// and reserves slots, then each `complete` call adds one finished read. Slots
/// reserved by reads still in flight count toward the file cap. Reads that
/// finish after a `reset` belong to an old epoch and are discarded.

use super::entry::{DecodedImage, ImageEntry, ImageId, Rotation};
use super::intake::{IntakeCandidate, IntakeError};

/// Caps applied at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_files: usize,
    pub max_file_size: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_files: 100,
            max_file_size: 32 * 1024 * 1024,
        }
    }
}

/// Outcome of validating a batch of candidates
#[derive(Debug, Default)]
pub struct IntakePlan {
    /// Files to read, in the order they were offered
    pub accepted: Vec<IntakeCandidate>,
    /// One warning per skipped file, plus one for the cap if it was hit
    pub rejected: Vec<IntakeError>,
    /// Pass back to `complete` with each finished read
    pub epoch: u64,
}

#[derive(Debug, Default)]
pub struct ImageCollection {
    entries: Vec<ImageEntry>,
    pending: usize,
    next_id: u64,
    epoch: u64,
    limits: Limits,
}

impl ImageCollection {
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Validate type and size, then truncate to the free slots
    pub fn plan_intake(&mut self, candidates: Vec<IntakeCandidate>) -> IntakePlan {
        let mut plan = IntakePlan {
            epoch: self.epoch,
            ..IntakePlan::default()
        };

        for candidate in candidates {
            if candidate.mime.is_none() {
                plan.rejected.push(IntakeError::NotAnImage {
                    name: candidate.name,
                });
            } else if candidate.size > self.limits.max_file_size {
                plan.rejected.push(IntakeError::TooLarge {
                    name: candidate.name,
                    size: candidate.size,
                    limit: self.limits.max_file_size,
                });
            } else {
                plan.accepted.push(candidate);
            }
        }

        let free = self
            .limits
            .max_files
            .saturating_sub(self.entries.len() + self.pending);
        if plan.accepted.len() > free {
            let dropped = plan.accepted.len() - free;
            plan.accepted.truncate(free);
            plan.rejected.push(IntakeError::TooMany {
                max: self.limits.max_files,
                dropped,
            });
        }

        self.pending += plan.accepted.len();
        plan
    }

    /// Finish one reserved read.
    ///
    /// Returns the new entry's id, or `None` when the read was planned before
    /// the last reset.
    pub fn complete(
        &mut self,
        epoch: u64,
        result: Result<DecodedImage, IntakeError>,
    ) -> Result<Option<ImageId>, IntakeError> {
        if epoch != self.epoch {
            return Ok(None);
        }
        self.pending = self.pending.saturating_sub(1);
        let decoded = result?;

        if self.entries.len() >= self.limits.max_files {
            return Err(IntakeError::TooMany {
                max: self.limits.max_files,
                dropped: 1,
            });
        }

        let id = ImageId(self.next_id);
        self.next_id += 1;
        self.entries.push(ImageEntry::new(id, decoded));
        Ok(Some(id))
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads reserved but not yet completed
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    fn position(&self, id: ImageId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn toggle_select(&mut self, id: ImageId) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.selected = !entry.selected;
        }
    }

    pub fn all_selected(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|entry| entry.selected)
    }

    pub fn has_selection(&self) -> bool {
        self.entries.iter().any(|entry| entry.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.selected).count()
    }

    /// Select everything, or deselect everything if all are selected already
    pub fn toggle_select_all(&mut self) {
        let select = !self.all_selected();
        for entry in &mut self.entries {
            entry.selected = select;
        }
    }

    pub fn rotate(&mut self, id: ImageId, rotation: Rotation) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.rotation = rotation;
        }
    }

    /// Remove one entry; returns whether it existed
    pub fn remove(&mut self, id: ImageId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn selected_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.selected)
            .map(|(index, _)| index)
            .collect()
    }

    /// Remove all selected entries, highest index first; returns how many
    pub fn remove_selected(&mut self) -> usize {
        let indices = self.selected_indices();
        for &index in indices.iter().rev() {
            self.entries.remove(index);
        }
        indices.len()
    }

    /// Swap each selected entry with the one above it.
    ///
    /// Indices are processed ascending so a run of adjacent selections moves
    /// as a block. An entry already at the top stays put. Returns whether
    /// anything moved.
    pub fn move_selected_up(&mut self) -> bool {
        let indices: Vec<usize> = self
            .selected_indices()
            .into_iter()
            .filter(|&index| index > 0)
            .collect();
        for &index in &indices {
            self.entries.swap(index, index - 1);
        }
        !indices.is_empty()
    }

    /// Swap each selected entry with the one below it, descending order
    pub fn move_selected_down(&mut self) -> bool {
        let last = self.entries.len().saturating_sub(1);
        let indices: Vec<usize> = self
            .selected_indices()
            .into_iter()
            .filter(|&index| index < last)
            .collect();
        for &index in indices.iter().rev() {
            self.entries.swap(index, index + 1);
        }
        !indices.is_empty()
    }

    /// Drop every entry and forget reads in flight
    pub fn reset(&mut self) {
        self.entries.clear();
        self.pending = 0;
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn candidate(name: &str, size: u64) -> IntakeCandidate {
        IntakeCandidate {
            path: PathBuf::from(name),
            name: name.to_string(),
            mime: crate::collection::intake::mime_for(&PathBuf::from(name)),
            size,
            last_modified: None,
        }
    }

    fn decoded(name: &str) -> DecodedImage {
        DecodedImage {
            source: PathBuf::from(name),
            name: name.to_string(),
            mime: "image/png".to_string(),
            size: 1,
            last_modified: None,
            data_url: "data:image/png;base64,AA==".to_string(),
            bytes: vec![0],
        }
    }

    /// Collection with `names` already added, optionally selecting some
    fn collection(names: &[&str], selected: &[usize]) -> ImageCollection {
        let mut c = ImageCollection::new(Limits::default());
        let plan = c.plan_intake(names.iter().map(|n| candidate(n, 10)).collect());
        for accepted in plan.accepted {
            c.complete(plan.epoch, Ok(decoded(&accepted.name))).unwrap();
        }
        for &index in selected {
            let id = c.entries()[index].id;
            c.toggle_select(id);
        }
        c
    }

    fn names(c: &ImageCollection) -> Vec<&str> {
        c.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_plan_filters_type_and_size() {
        let mut c = ImageCollection::new(Limits::default());
        let plan = c.plan_intake(vec![
            candidate("a.png", 10),
            candidate("notes.txt", 10),
            candidate("huge.jpg", 33_554_433),
            candidate("edge.jpg", 33_554_432),
        ]);

        let accepted: Vec<&str> = plan.accepted.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(accepted, vec!["a.png", "edge.jpg"]);
        assert_eq!(plan.rejected.len(), 2);
        assert!(matches!(plan.rejected[0], IntakeError::NotAnImage { .. }));
        assert!(matches!(plan.rejected[1], IntakeError::TooLarge { size: 33_554_433, .. }));
        assert_eq!(
            plan.rejected[1].to_string(),
            "huge.jpg is 32 MB, over the 32 MB limit."
        );
        assert_eq!(c.pending(), 2);
    }

    #[test]
    fn test_cap_counts_existing_and_pending() {
        let mut c = ImageCollection::new(Limits {
            max_files: 5,
            max_file_size: 100,
        });
        let first = c.plan_intake((0..3).map(|i| candidate(&format!("{i}.png"), 1)).collect());
        assert_eq!(first.accepted.len(), 3);

        // Two slots left while the first three are still reading
        let second = c.plan_intake((0..4).map(|i| candidate(&format!("x{i}.png"), 1)).collect());
        assert_eq!(second.accepted.len(), 2);
        assert!(matches!(
            second.rejected.as_slice(),
            [IntakeError::TooMany { max: 5, dropped: 2 }]
        ));

        let epoch = first.epoch;
        for accepted in first.accepted.into_iter().chain(second.accepted) {
            c.complete(epoch, Ok(decoded(&accepted.name))).unwrap();
        }
        assert_eq!(c.len(), 5);
        assert_eq!(c.pending(), 0);

        let third = c.plan_intake(vec![candidate("late.png", 1)]);
        assert!(third.accepted.is_empty());
    }

    #[test]
    fn test_failed_read_releases_slot() {
        let mut c = ImageCollection::new(Limits::default());
        let plan = c.plan_intake(vec![candidate("a.png", 1)]);
        assert_eq!(plan.accepted.len(), 1);
        let err = c.complete(plan.epoch, Err(IntakeError::NotAnImage { name: "a.png".into() }));
        assert!(err.is_err());
        assert_eq!(c.pending(), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn test_toggle_select_all() {
        let mut c = collection(&["a.png", "b.png", "c.png"], &[1]);
        c.toggle_select_all();
        assert!(c.all_selected());
        c.toggle_select_all();
        assert!(!c.has_selection());
    }

    #[test]
    fn test_remove_selected() {
        let mut c = collection(&["a.png", "b.png", "c.png", "d.png"], &[0, 2, 3]);
        assert_eq!(c.remove_selected(), 3);
        assert_eq!(names(&c), vec!["b.png"]);
        assert_eq!(c.remove_selected(), 0);
    }

    #[test]
    fn test_move_up_adjacent_block() {
        let mut c = collection(&["a.png", "b.png", "c.png", "d.png"], &[1, 2]);
        assert!(c.move_selected_up());
        assert_eq!(names(&c), vec!["b.png", "c.png", "a.png", "d.png"]);
    }

    #[test]
    fn test_move_down_adjacent_block() {
        let mut c = collection(&["a.png", "b.png", "c.png", "d.png"], &[1, 2]);
        assert!(c.move_selected_down());
        assert_eq!(names(&c), vec!["a.png", "d.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_boundary_moves_are_noops() {
        let mut c = collection(&["a.png", "b.png", "c.png"], &[0]);
        assert!(!c.move_selected_up());
        assert_eq!(names(&c), vec!["a.png", "b.png", "c.png"]);

        let mut c = collection(&["a.png", "b.png", "c.png"], &[2]);
        assert!(!c.move_selected_down());
        assert_eq!(names(&c), vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_moves_keep_membership() {
        let mut c = collection(&["a.png", "b.png", "c.png", "d.png", "e.png"], &[0, 2, 4]);
        c.move_selected_up();
        c.move_selected_down();
        c.move_selected_down();
        let mut sorted = names(&c);
        sorted.sort();
        assert_eq!(sorted, vec!["a.png", "b.png", "c.png", "d.png", "e.png"]);
    }

    #[test]
    fn test_rotate_and_remove_by_id() {
        let mut c = collection(&["a.png", "b.png"], &[]);
        let id = c.entries()[1].id;
        c.rotate(id, Rotation::Half);
        let entry = &c.entries()[1];
        assert_eq!(entry.rotation, Rotation::Half);
        // Pixel data is untouched by rotation
        assert_eq!(entry.data_url, "data:image/png;base64,AA==");

        assert!(c.remove(id));
        assert!(!c.remove(id));
        assert_eq!(names(&c), vec!["a.png"]);
    }

    #[test]
    fn test_reset_discards_late_reads() {
        let mut c = collection(&["a.png"], &[0]);
        let plan = c.plan_intake(vec![candidate("b.png", 1)]);
        c.reset();
        assert!(c.is_empty());
        assert_eq!(c.pending(), 0);

        let late = c.complete(plan.epoch, Ok(decoded("b.png"))).unwrap();
        assert_eq!(late, None);
        assert!(c.is_empty());
    }
}
