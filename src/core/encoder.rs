use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    core::{
        config::{EncoderConfig, XmlFormat},
        item::{ItemProcessor, ItemProcessorResult},
        name::is_valid_xml_name,
        row::{ColumnDescriptor, Row, RowValue},
    },
    error::XmlifyError,
};

/// Encodes tabular rows into standalone XML documents.
///
/// An encoder is built once per batch from the column descriptors and a
/// configuration, then applied to every row. Construction never fails;
/// configuration problems surface on the first call to [`encode_row`].
///
/// Each call produces one complete document, so the output of any row can be
/// parsed, stored or shipped on its own. Encoding is stateless: the result for
/// a row depends only on that row, the descriptors and the configuration, and
/// the same row always yields byte-identical output.
///
/// The encoder holds no interior mutability and can be shared between threads
/// encoding different rows concurrently.
///
/// [`encode_row`]: RowXmlEncoder::encode_row
///
/// # Formats
///
/// With [`XmlFormat::Element`] every column becomes a child element of the row
/// element; null values turn into empty elements marked with the null
/// attribute. With [`XmlFormat::Attribute`] every non-null column becomes an
/// attribute on the row element and null values are left out entirely.
///
/// # Examples
///
/// Element format, the default:
///
/// ```
/// use xmlify_rs::core::{
///     config::EncoderConfigBuilder,
///     encoder::RowXmlEncoder,
///     row::{ColumnDescriptor, RowValue},
/// };
///
/// let columns = ColumnDescriptor::from_names(["id", "note"]);
/// let config = EncoderConfigBuilder::new()
///     .include_xml_declaration(false)
///     .build();
/// let encoder = RowXmlEncoder::new(columns, config);
///
/// let row = vec![RowValue::text("42"), RowValue::null()];
/// let document = encoder.encode_row(&row)?;
///
/// assert_eq!(
///     document,
///     r#"<row><col name="id">42</col><col name="note" null="true"/></row>"#
/// );
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
///
/// Attribute format:
///
/// ```
/// use xmlify_rs::core::{
///     config::{EncoderConfigBuilder, XmlFormat},
///     encoder::RowXmlEncoder,
///     row::{ColumnDescriptor, RowValue},
/// };
///
/// let columns = ColumnDescriptor::from_names(["id", "note"]);
/// let config = EncoderConfigBuilder::new()
///     .format(XmlFormat::Attribute)
///     .include_xml_declaration(false)
///     .build();
/// let encoder = RowXmlEncoder::new(columns, config);
///
/// let row = vec![RowValue::text("42"), RowValue::null()];
/// assert_eq!(encoder.encode_row(&row)?, r#"<row id="42"/>"#);
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
pub struct RowXmlEncoder {
    columns: Vec<ColumnDescriptor>,
    config: EncoderConfig,
}

impl RowXmlEncoder {
    /// Creates an encoder for rows shaped like `columns`.
    pub fn new(columns: Vec<ColumnDescriptor>, config: EncoderConfig) -> Self {
        Self { columns, config }
    }

    /// The column descriptors the encoder was built with.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// The configuration the encoder was built with.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encodes one row into a standalone XML document.
    ///
    /// The row must supply one value for every column descriptor. Values are
    /// picked by descriptor position, text is XML-escaped on the way out and
    /// the document is returned without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`XmlifyError::InputMismatch`] when the row length does not
    /// match the descriptors or a descriptor points past the end of the row,
    /// and [`XmlifyError::MalformedName`] when a configured name, or a column
    /// name emitted as an attribute, is not a well-formed XML name. No partial
    /// document is returned in either case.
    pub fn encode_row(&self, values: &[RowValue]) -> Result<String, XmlifyError> {
        if values.len() != self.columns.len() {
            return Err(XmlifyError::InputMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }

        let mut writer = Writer::new(Vec::new());

        if self.config.include_xml_declaration() {
            emit(
                &mut writer,
                Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
            )?;
        }

        let mut row = BytesStart::new(checked_name(self.config.row_element_name())?);
        if let Some(namespace) = self.config.namespace() {
            // The namespace goes first so it scopes every other attribute.
            row.push_attribute(("xmlns", namespace));
        }

        match self.config.format() {
            XmlFormat::Attribute => {
                for column in &self.columns {
                    if let Some(text) = self.value_of(column, values)?.as_text() {
                        row.push_attribute((checked_name(column.name())?, text));
                    }
                }
                emit(&mut writer, Event::Empty(row))?;
            }
            XmlFormat::Element => {
                emit(&mut writer, Event::Start(row))?;
                for column in &self.columns {
                    let value = self.value_of(column, values)?;
                    self.write_column(&mut writer, column, value)?;
                }
                emit(
                    &mut writer,
                    Event::End(BytesEnd::new(self.config.row_element_name())),
                )?;
            }
        }

        String::from_utf8(writer.into_inner())
            .map_err(|error| XmlifyError::ItemProcessor(error.to_string()))
    }

    fn value_of<'v>(
        &self,
        column: &ColumnDescriptor,
        values: &'v [RowValue],
    ) -> Result<&'v RowValue, XmlifyError> {
        values
            .get(column.position())
            .ok_or(XmlifyError::InputMismatch {
                expected: column.position() + 1,
                actual: values.len(),
            })
    }

    fn write_column(
        &self,
        writer: &mut Writer<Vec<u8>>,
        column: &ColumnDescriptor,
        value: &RowValue,
    ) -> Result<(), XmlifyError> {
        let mut element = BytesStart::new(checked_name(self.config.column_element_name())?);
        if self.config.include_column_name() {
            element.push_attribute((
                checked_name(self.config.name_attribute_name())?,
                column.name(),
            ));
        }

        match value.as_text() {
            Some(text) => {
                emit(writer, Event::Start(element))?;
                emit(writer, Event::Text(BytesText::new(text)))?;
                emit(
                    writer,
                    Event::End(BytesEnd::new(self.config.column_element_name())),
                )?;
            }
            None => {
                element.push_attribute((checked_name(self.config.null_attribute_name())?, "true"));
                emit(writer, Event::Empty(element))?;
            }
        }

        Ok(())
    }
}

impl ItemProcessor<Row, String> for RowXmlEncoder {
    fn process(&self, item: &Row) -> ItemProcessorResult<String> {
        self.encode_row(item)
    }
}

fn checked_name(name: &str) -> Result<&str, XmlifyError> {
    if is_valid_xml_name(name) {
        Ok(name)
    } else {
        Err(XmlifyError::MalformedName(name.to_string()))
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), XmlifyError> {
    writer
        .write_event(event)
        .map_err(|error| XmlifyError::ItemProcessor(error.to_string()))
}
