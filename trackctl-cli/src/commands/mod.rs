//! Command implementations for trackctl CLI

pub mod serve;

pub use serve::run_serve;
