use thiserror::Error;

#[derive(Error, Debug)]
/// Xmlify error
pub enum XmlifyError {
    /// The row handed to the encoder does not line up with the column
    /// descriptors the encoder was built with.
    #[error("row value mismatch: {expected} values required, {actual} supplied")]
    InputMismatch { expected: usize, actual: usize },

    /// A configured element or attribute name, or a column name emitted as an
    /// attribute, is not a well-formed XML name.
    #[error("malformed XML name: '{0}'")]
    MalformedName(String),

    /// A configuration property is empty, unknown or cannot be parsed.
    #[error("invalid property: {0}")]
    InvalidProperty(String),

    #[error("ItemReader error: {0}")]
    ItemReader(String),

    #[error("ItemProcessor error: {0}")]
    ItemProcessor(String),

    #[error("ItemWriter error: {0}")]
    ItemWriter(String),

    #[error("Step error: {0}")]
    Step(String),
}
