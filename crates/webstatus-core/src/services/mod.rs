//! Application services.

mod collector;

pub use collector::StatusCollector;
