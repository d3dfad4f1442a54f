//! Core data models for trade matching

pub mod card;
pub mod collection;
pub mod opportunity;
pub mod profile;
pub mod settings;
pub mod trading;

pub use card::*;
pub use collection::*;
pub use opportunity::*;
pub use profile::*;
pub use settings::*;
pub use trading::*;
