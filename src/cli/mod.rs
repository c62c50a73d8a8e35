//! Command-line surface: boot argument classification.

pub mod args;

pub use args::ArgumentState;
