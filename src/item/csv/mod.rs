/// CSV support for feeding tabular data into the row encoder.
///
/// The reader in this module turns CSV records into [`Row`] values and
/// derives the [`ColumnDescriptor`] list the encoder needs, either from the
/// header record or by synthesizing positional names. It reads from files,
/// strings or any source implementing the `Read` trait, one record per
/// `read` call, so arbitrarily large inputs stream without being loaded
/// into memory.
///
/// CSV has no way to express the difference between an empty field and a
/// missing value. The reader treats every field as text by default and can
/// optionally map empty fields to null values instead, which matters to the
/// encoder: null values are marked or skipped in the output while empty text
/// is emitted as empty content.
///
/// [`Row`]: crate::core::row::Row
/// [`ColumnDescriptor`]: crate::core::row::ColumnDescriptor
///
/// # Examples
///
/// ```
/// use xmlify_rs::core::{
///     config::EncoderConfigBuilder,
///     encoder::RowXmlEncoder,
///     item::ItemReader,
/// };
/// use xmlify_rs::item::csv::csv_reader::CsvRowReaderBuilder;
///
/// let data = "\
/// city,country,pop
/// Boston,United States,4628910
/// ";
///
/// let reader = CsvRowReaderBuilder::new().from_reader(data.as_bytes())?;
///
/// let encoder = RowXmlEncoder::new(
///     reader.columns().to_vec(),
///     EncoderConfigBuilder::new()
///         .include_xml_declaration(false)
///         .build(),
/// );
///
/// let row = reader.read()?.unwrap();
/// assert_eq!(
///     encoder.encode_row(&row)?,
///     "<row><col name=\"city\">Boston</col>\
///      <col name=\"country\">United States</col>\
///      <col name=\"pop\">4628910</col></row>"
/// );
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
pub mod csv_reader;
