//! HTTP handlers.

pub mod status;
