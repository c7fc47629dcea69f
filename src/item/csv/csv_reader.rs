use csv::{Reader, ReaderBuilder, StringRecord, Terminator, Trim};
use log::error;
use std::{cell::RefCell, fs::File, io::Read, path::Path};

use crate::{
    core::{
        item::{ItemReader, ItemReaderResult},
        row::{ColumnDescriptor, Row, RowValue},
    },
    error::XmlifyError,
};

/// A CSV reader that yields [`Row`] values.
///
/// The column descriptors are fixed when the reader is built, from the header
/// record when headers are enabled or as positional `column_N` names when they
/// are not. Every subsequent record is turned into a row of text values, with
/// empty fields optionally mapped to null.
///
/// # Type Parameters
///
/// - `R`: The source providing the CSV data. Must implement `Read`.
///
/// # Examples
///
/// ```
/// use xmlify_rs::core::{item::ItemReader, row::RowValue};
/// use xmlify_rs::item::csv::csv_reader::CsvRowReaderBuilder;
///
/// let data = "\
/// city,country,pop
/// Boston,United States,4628910
/// Concord,United States,42695
/// ";
///
/// let reader = CsvRowReaderBuilder::new()
///     .delimiter(b',')
///     .from_reader(data.as_bytes())?;
///
/// let names: Vec<&str> = reader.columns().iter().map(|c| c.name()).collect();
/// assert_eq!(names, ["city", "country", "pop"]);
///
/// let row = reader.read()?.unwrap();
/// assert_eq!(row[0], RowValue::text("Boston"));
///
/// let row = reader.read()?.unwrap();
/// assert_eq!(row[0], RowValue::text("Concord"));
///
/// assert!(reader.read()?.is_none());
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
pub struct CsvRowReader<R> {
    /// Uses `RefCell` to provide interior mutability so the underlying CSV
    /// reader can advance while `read` takes `&self`.
    reader: RefCell<Reader<R>>,
    columns: Vec<ColumnDescriptor>,
    empty_as_null: bool,
}

impl<R: Read> CsvRowReader<R> {
    /// The column descriptors derived from the input.
    ///
    /// Hand these to the encoder so its output matches the rows this reader
    /// produces.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }
}

impl<R: Read> ItemReader<Row> for CsvRowReader<R> {
    /// Reads the next CSV record as a row.
    ///
    /// # Returns
    /// - `Ok(Some(row))` when a record was read
    /// - `Ok(None)` when the input is exhausted
    /// - `Err(XmlifyError::ItemReader(..))` when the record cannot be parsed,
    ///   for example when its field count differs from the header
    fn read(&self) -> ItemReaderResult<Row> {
        let mut record = StringRecord::new();

        let has_more = self
            .reader
            .borrow_mut()
            .read_record(&mut record)
            .map_err(|error| XmlifyError::ItemReader(error.to_string()))?;

        if !has_more {
            return Ok(None);
        }

        let row = record
            .iter()
            .map(|field| {
                if self.empty_as_null && field.is_empty() {
                    RowValue::null()
                } else {
                    RowValue::text(field)
                }
            })
            .collect();

        Ok(Some(row))
    }
}

/// A builder for configuring CSV row reading.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Terminator: CRLF (also accepts bare line feeds)
/// - Headers: enabled, the first record supplies the column names
/// - Empty fields: kept as empty text
///
/// # Examples
///
/// ```
/// use xmlify_rs::core::{item::ItemReader, row::RowValue};
/// use xmlify_rs::item::csv::csv_reader::CsvRowReaderBuilder;
///
/// // Headerless input with empty fields read as null values.
/// let data = "42,\n,note\n";
///
/// let reader = CsvRowReaderBuilder::new()
///     .has_headers(false)
///     .empty_as_null(true)
///     .from_reader(data.as_bytes())?;
///
/// assert_eq!(reader.columns()[0].name(), "column_1");
/// assert_eq!(reader.columns()[1].name(), "column_2");
///
/// let row = reader.read()?.unwrap();
/// assert_eq!(row, vec![RowValue::text("42"), RowValue::null()]);
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
pub struct CsvRowReaderBuilder {
    delimiter: u8,
    terminator: Terminator,
    has_headers: bool,
    empty_as_null: bool,
}

impl Default for CsvRowReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRowReaderBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            terminator: Terminator::CRLF,
            has_headers: true,
            empty_as_null: false,
        }
    }

    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the record terminator.
    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Sets whether the first record carries the column names.
    ///
    /// Without headers the columns are named `column_1`, `column_2` and so
    /// on, and the first record is read as data.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Sets whether empty fields are read as null values instead of empty
    /// text.
    pub fn empty_as_null(mut self, yes: bool) -> Self {
        self.empty_as_null = yes;
        self
    }

    /// Creates a reader over any `Read` source.
    ///
    /// The column descriptors are derived immediately, which reads the header
    /// record when headers are enabled and peeks at the first record when they
    /// are not.
    ///
    /// # Errors
    ///
    /// Returns [`XmlifyError::ItemReader`] when that initial record cannot be
    /// parsed.
    pub fn from_reader<R: Read>(self, rdr: R) -> Result<CsvRowReader<R>, XmlifyError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .has_headers(self.has_headers)
            .flexible(false)
            .from_reader(rdr);

        let columns = columns_of(&mut reader, self.has_headers)?;

        Ok(CsvRowReader {
            reader: RefCell::new(reader),
            columns,
            empty_as_null: self.empty_as_null,
        })
    }

    /// Creates a reader over the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`XmlifyError::ItemReader`] when the file cannot be opened or
    /// its initial record cannot be parsed.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<CsvRowReader<File>, XmlifyError> {
        let file = File::open(path).map_err(|err| {
            error!("Failed to open CSV file: {}", err);
            XmlifyError::ItemReader(err.to_string())
        })?;

        self.from_reader(file)
    }
}

fn columns_of<R: Read>(
    reader: &mut Reader<R>,
    has_headers: bool,
) -> Result<Vec<ColumnDescriptor>, XmlifyError> {
    // With headers disabled this returns the first record without consuming
    // it, so the column count is known either way.
    let headers = reader
        .headers()
        .map_err(|error| XmlifyError::ItemReader(error.to_string()))?;

    let columns = if has_headers {
        ColumnDescriptor::from_names(headers.iter())
    } else {
        (0..headers.len())
            .map(|position| ColumnDescriptor::new(format!("column_{}", position + 1), position))
            .collect()
    };

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<R: Read>(reader: &CsvRowReader<R>) -> Vec<Row> {
        let mut rows = Vec::new();
        while let Some(row) = reader.read().unwrap() {
            rows.push(row);
        }
        rows
    }

    #[test]
    fn headers_become_column_descriptors() {
        let data = "city,country,pop\nBoston,United States,4628910\n";

        let reader = CsvRowReaderBuilder::new()
            .from_reader(data.as_bytes())
            .unwrap();

        let columns = reader.columns();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].name(), "city");
        assert_eq!(columns[2].name(), "pop");
        assert_eq!(columns[2].position(), 2);

        let rows = drain(&reader);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], RowValue::text("United States"));
    }

    #[test]
    fn headerless_input_gets_positional_column_names() {
        let data = "1,Boston\n2,Concord\n";

        let reader = CsvRowReaderBuilder::new()
            .has_headers(false)
            .from_reader(data.as_bytes())
            .unwrap();

        let names: Vec<&str> = reader.columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["column_1", "column_2"]);

        // The record used to size the columns is still read as data.
        let rows = drain(&reader);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], RowValue::text("1"));
    }

    #[test]
    fn fields_are_trimmed() {
        let data = "name , value\n  spaced  ,  7 \n";

        let reader = CsvRowReaderBuilder::new()
            .from_reader(data.as_bytes())
            .unwrap();

        assert_eq!(reader.columns()[1].name(), "value");

        let rows = drain(&reader);
        assert_eq!(rows[0][0], RowValue::text("spaced"));
        assert_eq!(rows[0][1], RowValue::text("7"));
    }

    #[test]
    fn empty_fields_stay_text_by_default() {
        let data = "id,note\n42,\n";

        let reader = CsvRowReaderBuilder::new()
            .from_reader(data.as_bytes())
            .unwrap();

        let rows = drain(&reader);
        assert_eq!(rows[0][1], RowValue::text(""));
    }

    #[test]
    fn empty_fields_can_be_read_as_null() {
        let data = "id,note\n42,\n,full\n";

        let reader = CsvRowReaderBuilder::new()
            .empty_as_null(true)
            .from_reader(data.as_bytes())
            .unwrap();

        let rows = drain(&reader);
        assert_eq!(rows[0], vec![RowValue::text("42"), RowValue::null()]);
        assert_eq!(rows[1], vec![RowValue::null(), RowValue::text("full")]);
    }

    #[test]
    fn uneven_records_are_read_errors() {
        let data = "a,b\n1,2\n3\n";

        let reader = CsvRowReaderBuilder::new()
            .from_reader(data.as_bytes())
            .unwrap();

        assert!(reader.read().is_ok());
        let error = reader.read().unwrap_err();
        assert!(matches!(error, XmlifyError::ItemReader(_)));
    }

    #[test]
    fn custom_delimiters_are_honored() {
        let data = "id;name\n1;Alice\n";

        let reader = CsvRowReaderBuilder::new()
            .delimiter(b';')
            .from_reader(data.as_bytes())
            .unwrap();

        assert_eq!(reader.columns()[1].name(), "name");
        assert_eq!(drain(&reader)[0][1], RowValue::text("Alice"));
    }

    #[test]
    fn missing_file_is_a_reader_error() {
        let result = CsvRowReaderBuilder::new().from_path("does/not/exist.csv");

        assert!(matches!(result, Err(XmlifyError::ItemReader(_))));
    }

    #[test]
    fn empty_input_yields_no_columns_and_no_rows() {
        let reader = CsvRowReaderBuilder::new()
            .from_reader("".as_bytes())
            .unwrap();

        assert!(reader.columns().is_empty());
        assert!(reader.read().unwrap().is_none());
    }
}
