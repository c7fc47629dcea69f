/// XML output support for encoded rows.
///
/// The writer in this module is the natural sink for the row encoder: the
/// encoder turns each row into a standalone XML document string and the
/// writer appends those documents to a file or buffer, one per line,
/// optionally wrapped in a shared root element.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use xmlify_rs::core::{
///     config::EncoderConfigBuilder,
///     encoder::RowXmlEncoder,
///     item::ItemWriter,
///     row::{ColumnDescriptor, RowValue},
/// };
/// use xmlify_rs::item::xml::XmlDocumentWriterBuilder;
///
/// let encoder = RowXmlEncoder::new(
///     ColumnDescriptor::from_names(["id"]),
///     EncoderConfigBuilder::new()
///         .include_xml_declaration(false)
///         .build(),
/// );
///
/// let writer = XmlDocumentWriterBuilder::new()
///     .root_tag("rows")
///     .from_writer(Cursor::new(Vec::new()));
///
/// writer.open()?;
/// writer.write(&[encoder.encode_row(&[RowValue::text("42")])?])?;
/// writer.close()?;
///
/// let content = String::from_utf8(writer.into_inner()?.into_inner()).unwrap();
/// assert_eq!(content, "<rows>\n<row><col name=\"id\">42</col></row>\n</rows>\n");
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
pub mod xml_writer;

pub use xml_writer::XmlDocumentWriter;
pub use xml_writer::XmlDocumentWriterBuilder;
