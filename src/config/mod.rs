//! Runtime configuration for the demo tools.

pub mod track;
