/// Merge module
///
/// - Layout options and the editable form (options.rs)
/// - HTTP client for the merge service (client.rs)
/// - Workflow state for the page (session.rs)

pub mod client;
pub mod options;
pub mod session;

pub use client::{MergeClient, MergeError, MergeRequest};
pub use options::{Alignment, Direction, MergeForm, MergeOptions, OutputFormat};
pub use session::{download_file_name, MergePhase, MergeSession};
