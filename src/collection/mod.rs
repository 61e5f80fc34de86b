/// Image collection module
///
/// This module handles the client side of a merge:
/// - Entry data structures (entry.rs)
/// - Finding, validating and reading files (intake.rs)
/// - The ordered, editable list (manager.rs)
/// - Projecting the list into UI tiles (view.rs)

pub mod entry;
pub mod intake;
pub mod manager;
pub mod view;

pub use entry::{DecodedImage, ImageEntry, ImageId, Rotation};
pub use intake::{IntakeCandidate, IntakeError};
pub use manager::{ImageCollection, IntakePlan, Limits};
