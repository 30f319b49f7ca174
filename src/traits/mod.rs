//! Trait definitions for YesPlan operations.

mod fetch;

pub use fetch::Fetch;
