//! Configuration: layered property source, option registry, processing,
//! and printing.

pub mod options;
pub mod printer;
pub mod processor;
pub mod source;

pub use options::{ScanOption, ScanOptions};
pub use source::{PropertyOrigin, PropertySource};
