use serde::{Deserialize, Serialize};

/// Describes one column of the tabular input.
///
/// A descriptor couples the column name used for XML output with the position
/// of the column's value inside each row. Descriptors are captured once, before
/// any row is encoded, and stay fixed for the lifetime of an encoder.
///
/// # Examples
///
/// ```
/// use xmlify_rs::core::row::ColumnDescriptor;
///
/// let column = ColumnDescriptor::new("id", 0);
/// assert_eq!(column.name(), "id");
/// assert_eq!(column.position(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    name: String,
    position: usize,
}

impl ColumnDescriptor {
    /// Creates a descriptor for the column `name` whose value sits at
    /// `position` in each row.
    pub fn new<S: Into<String>>(name: S, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// Builds one descriptor per name, assigning positions in iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlify_rs::core::row::ColumnDescriptor;
    ///
    /// let columns = ColumnDescriptor::from_names(["id", "name", "email"]);
    /// assert_eq!(columns.len(), 3);
    /// assert_eq!(columns[2].name(), "email");
    /// assert_eq!(columns[2].position(), 2);
    /// ```
    pub fn from_names<I, S>(names: I) -> Vec<ColumnDescriptor>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(position, name)| ColumnDescriptor::new(name, position))
            .collect()
    }

    /// The column name used for XML output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index of the column's value inside a row.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// One column value captured for one row.
///
/// A value is either a piece of text, kept verbatim, or null. The distinction
/// matters to the encoder: text is escaped and emitted, null values are marked
/// with a null attribute or skipped entirely depending on the output format.
///
/// # Examples
///
/// ```
/// use xmlify_rs::core::row::RowValue;
///
/// let value = RowValue::text("42");
/// assert_eq!(value.as_text(), Some("42"));
///
/// let missing = RowValue::null();
/// assert!(missing.is_null());
/// assert_eq!(missing.as_text(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowValue(Option<String>);

impl RowValue {
    /// A textual value. The text is emitted as-is, apart from XML escaping.
    pub fn text<S: Into<String>>(value: S) -> Self {
        RowValue(Some(value.into()))
    }

    /// A null value.
    pub fn null() -> Self {
        RowValue(None)
    }

    /// Returns `true` when the value is null.
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// The text of the value, or `None` when it is null.
    pub fn as_text(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<&str> for RowValue {
    fn from(value: &str) -> Self {
        RowValue::text(value)
    }
}

impl From<String> for RowValue {
    fn from(value: String) -> Self {
        RowValue(Some(value))
    }
}

impl From<Option<String>> for RowValue {
    fn from(value: Option<String>) -> Self {
        RowValue(value)
    }
}

/// The values of one row, ordered like the column descriptors they belong to.
pub type Row = Vec<RowValue>;
