/// Merge workflow state
///
/// Tracks where the page is between "nothing added" and "merged image ready".
/// The UI asks the session before submitting so a second click while a merge
/// is running is refused instead of sending twice.

use super::client::MergeError;
use super::options::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MergePhase {
    #[default]
    Idle,
    /// Images are loaded and showing as tiles
    Previewing,
    Merging,
    Merged { url: String },
}

#[derive(Debug, Default)]
pub struct MergeSession {
    phase: MergePhase,
    /// Ticket of the most recent `begin`
    ticket: u64,
}

impl MergeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &MergePhase {
        &self.phase
    }

    /// Follow the collection size while no merge is in flight.
    ///
    /// A shown result survives edits to the list but not an empty list.
    pub fn sync(&mut self, count: usize) {
        self.phase = match self.phase {
            MergePhase::Merging => return,
            _ if count == 0 => MergePhase::Idle,
            MergePhase::Merged { .. } => return,
            _ => MergePhase::Previewing,
        };
    }

    /// Start a merge; pass the returned ticket back to `finish`
    pub fn begin(&mut self, count: usize) -> Result<u64, MergeError> {
        if self.is_loading() {
            return Err(MergeError::Busy);
        }
        if count == 0 {
            return Err(MergeError::EmptyCollection);
        }
        self.ticket += 1;
        self.phase = MergePhase::Merging;
        Ok(self.ticket)
    }

    /// Settle a merge. Loading always ends here, whatever the outcome.
    ///
    /// Returns `None` when `ticket` is not the merge in flight, i.e. the page
    /// was reset while the request was running; the late result is dropped.
    pub fn finish(
        &mut self,
        ticket: u64,
        result: Result<String, MergeError>,
    ) -> Option<Result<&str, MergeError>> {
        if !self.is_loading() || ticket != self.ticket {
            return None;
        }
        match result {
            Ok(url) => {
                self.phase = MergePhase::Merged { url };
                Some(Ok(self.result_url().unwrap_or_default()))
            }
            Err(e) => {
                self.phase = MergePhase::Previewing;
                Some(Err(e))
            }
        }
    }

    /// Give up on a merge that never reached the service
    pub fn abort(&mut self) {
        if self.is_loading() {
            self.phase = MergePhase::Previewing;
        }
    }

    /// Back to the empty page
    pub fn reset(&mut self) {
        self.phase = MergePhase::Idle;
    }

    pub fn is_loading(&self) -> bool {
        self.phase == MergePhase::Merging
    }

    pub fn result_url(&self) -> Option<&str> {
        match &self.phase {
            MergePhase::Merged { url } => Some(url),
            _ => None,
        }
    }
}

/// `merged_image_<millis>.<ext>`
pub fn download_file_name(format: OutputFormat, millis: i64) -> String {
    format!("merged_image_{millis}.{}", format.extension())
}
