/// UI module
///
/// - Toast-style notices (notices.rs)
/// - Merge page (merge_page.rs)
/// - Lucky number page (lucky_page.rs)

pub mod lucky_page;
pub mod merge_page;
pub mod notices;

pub use lucky_page::{LuckyForm, LuckyPage};
pub use notices::Notices;

/// Which page the window is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Merge,
    Lucky,
}
