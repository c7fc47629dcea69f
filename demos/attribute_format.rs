use std::cell::RefCell;

use xmlify_rs::{
    core::{
        config::{EncoderConfigBuilder, XmlFormat},
        encoder::RowXmlEncoder,
        item::{ItemReader, ItemReaderResult},
        row::{ColumnDescriptor, Row, RowValue},
        step::{StepBuilder, StepInstance, StepStatus},
    },
    error::XmlifyError,
    item::logger::LoggerWriter,
};

struct RowReader {
    rows: RefCell<std::vec::IntoIter<Row>>,
}

impl ItemReader<Row> for RowReader {
    fn read(&self) -> ItemReaderResult<Row> {
        Ok(self.rows.borrow_mut().next())
    }
}

fn main() -> Result<(), XmlifyError> {
    env_logger::init();

    let rows: Vec<Row> = vec![
        vec![
            RowValue::text("1"),
            RowValue::text("Alice"),
            RowValue::text("admin"),
        ],
        vec![RowValue::text("2"), RowValue::text("Bob"), RowValue::null()],
    ];

    let reader = RowReader {
        rows: RefCell::new(rows.into_iter()),
    };

    // Null columns are left out entirely in attribute format
    let encoder = RowXmlEncoder::new(
        ColumnDescriptor::from_names(["id", "name", "role"]),
        EncoderConfigBuilder::new()
            .row_element_name("user")
            .format(XmlFormat::Attribute)
            .xml_namespace("urn:example:users")
            .include_xml_declaration(false)
            .build(),
    );

    let writer = LoggerWriter;

    let step: StepInstance<Row, String> = StepBuilder::new("attribute_format")
        .reader(&reader)
        .processor(&encoder)
        .writer(&writer)
        .chunk(10)
        .build();

    let execution = step.execute()?;

    assert!(StepStatus::Success == execution.status);
    assert_eq!(2, execution.write_count);

    Ok(())
}
