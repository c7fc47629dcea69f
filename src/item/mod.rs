#[cfg(feature = "logger")]
/// This module provides a logger item writer implementation for xmlify pipelines.
pub mod logger;

#[cfg(feature = "csv")]
/// This module provides a CSV row reader implementation for xmlify pipelines.
pub mod csv;

/// This module provides an XML document writer implementation for xmlify pipelines.
pub mod xml;
