//! Core data model shared across the engine.

mod alert;
mod factors;
mod patient;
mod reporting;
mod test;

pub use alert::*;
pub use factors::*;
pub use patient::*;
pub use reporting::*;
pub use test::*;
