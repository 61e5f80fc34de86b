/// State management module
///
/// This module handles state that outlives a single run:
/// - The local key-value store backing the lucky number history (store.rs)

pub mod store;

pub use store::{LocalStore, StoreError};
