//! Operations behind the command line.

pub mod error;
pub mod update;
pub mod usage;

pub use error::UpdateError;
pub use update::{Outcome, run};
