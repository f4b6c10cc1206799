//! Type definitions

pub mod import;
pub mod patient;
pub mod profile;

pub use import::*;
pub use patient::*;
pub use profile::*;
