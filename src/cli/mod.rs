//! Command-line interface for habitual.

pub mod args;
pub mod commands;
