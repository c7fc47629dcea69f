use crate::core::item::{ItemWriter, ItemWriterResult};
use crate::core::name::is_valid_xml_name;
use crate::error::XmlifyError;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A writer that collects encoded row documents into an XML file.
///
/// Each written item is expected to be one complete XML document, the way the
/// encoder produces them, and is placed on its own line. An optional root tag
/// wraps everything written between [`open`] and [`close`], turning the file
/// into a single well-formed document; in that case the per-row XML
/// declaration should be disabled on the encoder and, when wanted, enabled
/// here instead.
///
/// [`open`]: ItemWriter::open
/// [`close`]: ItemWriter::close
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use xmlify_rs::core::item::ItemWriter;
/// use xmlify_rs::item::xml::xml_writer::XmlDocumentWriterBuilder;
///
/// let writer = XmlDocumentWriterBuilder::new()
///     .root_tag("rows")
///     .from_writer(Cursor::new(Vec::new()));
///
/// writer.open()?;
/// writer.write(&[
///     r#"<row id="1"/>"#.to_string(),
///     r#"<row id="2"/>"#.to_string(),
/// ])?;
/// writer.close()?;
///
/// let buffer = writer.into_inner()?;
/// let content = String::from_utf8(buffer.into_inner()).unwrap();
/// assert_eq!(
///     content,
///     "<rows>\n<row id=\"1\"/>\n<row id=\"2\"/>\n</rows>\n"
/// );
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
///
/// Using a file as output:
///
/// ```no_run
/// use xmlify_rs::core::item::ItemWriter;
/// use xmlify_rs::item::xml::xml_writer::XmlDocumentWriterBuilder;
///
/// let writer = XmlDocumentWriterBuilder::new()
///     .root_tag("rows")
///     .include_declaration(true)
///     .from_path("rows.xml")?;
///
/// writer.open()?;
/// writer.write(&[r#"<row id="1"/>"#.to_string()])?;
/// writer.close()?;
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
pub struct XmlDocumentWriter<W: Write = File> {
    writer: RefCell<Writer<BufWriter<W>>>,
    root_tag: Option<String>,
    include_declaration: bool,
}

impl<W: Write> XmlDocumentWriter<W> {
    /// Unwraps the underlying destination, flushing pending output.
    ///
    /// # Errors
    ///
    /// Returns [`XmlifyError::ItemWriter`] when the final flush fails.
    pub fn into_inner(self) -> Result<W, XmlifyError> {
        self.writer
            .into_inner()
            .into_inner()
            .into_inner()
            .map_err(|e| XmlifyError::ItemWriter(format!("Failed to flush XML output: {}", e)))
    }
}

impl<W: Write> ItemWriter<String> for XmlDocumentWriter<W> {
    fn write(&self, items: &[String]) -> ItemWriterResult {
        let mut writer = self.writer.borrow_mut();
        for item in items {
            writer
                .get_mut()
                .write_all(item.as_bytes())
                .and_then(|()| writer.get_mut().write_all(b"\n"))
                .map_err(|e| {
                    XmlifyError::ItemWriter(format!("Failed to write XML document: {}", e))
                })?;
        }
        Ok(())
    }

    fn flush(&self) -> ItemWriterResult {
        self.writer
            .borrow_mut()
            .get_mut()
            .flush()
            .map_err(|e| XmlifyError::ItemWriter(format!("Failed to flush XML file: {}", e)))
    }

    fn open(&self) -> ItemWriterResult {
        // Reject a bad root tag before any bytes are written.
        if let Some(root_tag) = &self.root_tag {
            if !is_valid_xml_name(root_tag) {
                return Err(XmlifyError::MalformedName(root_tag.clone()));
            }
        }

        let mut writer = self.writer.borrow_mut();

        if self.include_declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
                .map_err(|e| {
                    XmlifyError::ItemWriter(format!("Failed to write XML declaration: {}", e))
                })?;
            writer.get_mut().write_all(b"\n").map_err(|e| {
                XmlifyError::ItemWriter(format!("Failed to write XML declaration: {}", e))
            })?;
        }

        if let Some(root_tag) = &self.root_tag {
            writer
                .write_event(Event::Start(BytesStart::new(root_tag.as_str())))
                .map_err(|e| {
                    XmlifyError::ItemWriter(format!("Failed to write XML root: {}", e))
                })?;
            writer
                .get_mut()
                .write_all(b"\n")
                .map_err(|e| XmlifyError::ItemWriter(format!("Failed to write XML root: {}", e)))?;
        }

        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        if let Some(root_tag) = &self.root_tag {
            let mut writer = self.writer.borrow_mut();
            writer
                .write_event(Event::End(BytesEnd::new(root_tag.as_str())))
                .map_err(|e| XmlifyError::ItemWriter(format!("Failed to write XML end: {}", e)))?;
            writer
                .get_mut()
                .write_all(b"\n")
                .map_err(|e| XmlifyError::ItemWriter(format!("Failed to write XML end: {}", e)))?;
        }
        self.flush()
    }
}

/// Builder for creating XML document writers.
///
/// By default the writer emits one document per line with no wrapping: no
/// root element and no document-level declaration.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use xmlify_rs::core::item::ItemWriter;
/// use xmlify_rs::item::xml::xml_writer::XmlDocumentWriterBuilder;
///
/// let writer = XmlDocumentWriterBuilder::new().from_writer(Cursor::new(Vec::new()));
///
/// writer.open()?;
/// writer.write(&[r#"<row id="1"/>"#.to_string()])?;
/// writer.close()?;
///
/// let content = String::from_utf8(writer.into_inner()?.into_inner()).unwrap();
/// assert_eq!(content, "<row id=\"1\"/>\n");
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
#[derive(Default)]
pub struct XmlDocumentWriterBuilder {
    root_tag: Option<String>,
    include_declaration: bool,
}

impl XmlDocumentWriterBuilder {
    /// Creates a builder with no root tag and no declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root tag wrapping everything the writer produces.
    pub fn root_tag(mut self, root_tag: &str) -> Self {
        self.root_tag = Some(root_tag.to_string());
        self
    }

    /// Sets whether a document-level XML declaration is written before the
    /// root tag.
    pub fn include_declaration(mut self, yes: bool) -> Self {
        self.include_declaration = yes;
        self
    }

    /// Creates an `XmlDocumentWriter` writing to the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`XmlifyError::ItemWriter`] when the file cannot be created.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<XmlDocumentWriter<File>, XmlifyError> {
        let file = File::create(path)
            .map_err(|e| XmlifyError::ItemWriter(format!("Failed to create XML file: {}", e)))?;

        Ok(XmlDocumentWriter {
            writer: RefCell::new(Writer::new(BufWriter::new(file))),
            root_tag: self.root_tag,
            include_declaration: self.include_declaration,
        })
    }

    /// Creates an `XmlDocumentWriter` writing to any `Write` destination,
    /// such as an in-memory buffer or a network stream.
    pub fn from_writer<W: Write>(self, wtr: W) -> XmlDocumentWriter<W> {
        XmlDocumentWriter {
            writer: RefCell::new(Writer::new(BufWriter::new(wtr))),
            root_tag: self.root_tag,
            include_declaration: self.include_declaration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn content_of(writer: XmlDocumentWriter<Cursor<Vec<u8>>>) -> String {
        String::from_utf8(writer.into_inner().unwrap().into_inner()).unwrap()
    }

    #[test]
    fn documents_are_written_one_per_line() {
        let writer = XmlDocumentWriterBuilder::new().from_writer(Cursor::new(Vec::new()));

        writer.open().unwrap();
        writer
            .write(&["<row id=\"1\"/>".to_string(), "<row id=\"2\"/>".to_string()])
            .unwrap();
        writer.close().unwrap();

        assert_eq!(content_of(writer), "<row id=\"1\"/>\n<row id=\"2\"/>\n");
    }

    #[test]
    fn root_tag_wraps_the_documents() {
        let writer = XmlDocumentWriterBuilder::new()
            .root_tag("rows")
            .from_writer(Cursor::new(Vec::new()));

        writer.open().unwrap();
        writer.write(&["<row/>".to_string()]).unwrap();
        writer.close().unwrap();

        assert_eq!(content_of(writer), "<rows>\n<row/>\n</rows>\n");
    }

    #[test]
    fn declaration_precedes_the_root_tag() {
        let writer = XmlDocumentWriterBuilder::new()
            .root_tag("rows")
            .include_declaration(true)
            .from_writer(Cursor::new(Vec::new()));

        writer.open().unwrap();
        writer.close().unwrap();

        assert_eq!(
            content_of(writer),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rows>\n</rows>\n"
        );
    }

    #[test]
    fn empty_run_with_root_produces_an_empty_document() {
        let writer = XmlDocumentWriterBuilder::new()
            .root_tag("rows")
            .from_writer(Cursor::new(Vec::new()));

        writer.open().unwrap();
        writer.write(&[]).unwrap();
        writer.close().unwrap();

        assert_eq!(content_of(writer), "<rows>\n</rows>\n");
    }

    #[test]
    fn malformed_root_tag_fails_on_open() {
        let writer = XmlDocumentWriterBuilder::new()
            .root_tag("my rows")
            .from_writer(Cursor::new(Vec::new()));

        let error = writer.open().unwrap_err();

        assert!(matches!(error, XmlifyError::MalformedName(name) if name == "my rows"));
    }

    #[test]
    fn failed_open_writes_no_bytes() {
        let writer = XmlDocumentWriterBuilder::new()
            .root_tag("my rows")
            .include_declaration(true)
            .from_writer(Cursor::new(Vec::new()));

        assert!(writer.open().is_err());

        assert_eq!(content_of(writer), "");
    }

    #[test]
    fn invalid_path_is_a_writer_error() {
        let result = XmlDocumentWriterBuilder::new()
            .root_tag("rows")
            .from_path("/nonexistent/directory/file.xml");

        let error = result.err().expect("creating the writer should fail");
        match error {
            XmlifyError::ItemWriter(message) => {
                assert!(message.contains("Failed to create XML file"));
            }
            other => panic!("Expected ItemWriter error, got {other:?}"),
        }
    }
}
