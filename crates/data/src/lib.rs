//! Data loading and validation for card packs, decklists and game config.

pub mod load;

pub use load::*;
