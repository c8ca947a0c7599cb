//! CLI command implementations.

pub mod bands;
pub mod common;
pub mod config;
pub mod graph;
pub mod parts;
