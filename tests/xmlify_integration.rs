use std::{
    env::temp_dir,
    fs::{self, read_to_string},
};

use rand::distr::{Alphanumeric, SampleString};
use xmlify_rs::{
    core::{
        config::{EncoderConfig, EncoderConfigBuilder, XmlFormat},
        encoder::RowXmlEncoder,
        row::{ColumnDescriptor, Row, RowValue},
        step::{StepBuilder, StepInstance, StepStatus},
    },
    item::csv::csv_reader::CsvRowReaderBuilder,
    item::xml::XmlDocumentWriterBuilder,
};

#[test]
fn transform_csv_file_to_xml_file_without_error() {
    // Create sample CSV data
    let csv_content = "year,make,model,description
1948,Porsche,356,Luxury sports car
1995,Peugeot,205,City car
2021,Mazda,CX-30,SUV Compact";

    // Create a temporary file with CSV content
    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    let input_path = temp_dir().join(format!("{}.csv", file_name));
    fs::write(&input_path, csv_content).expect("Failed to write CSV file");

    // Create CSV reader
    let reader = CsvRowReaderBuilder::new()
        .has_headers(true)
        .from_path(&input_path)
        .expect("Unable to open CSV file");

    // Create encoder rendering one document per row
    let encoder = RowXmlEncoder::new(
        reader.columns().to_vec(),
        EncoderConfigBuilder::new()
            .row_element_name("car")
            .include_xml_declaration(false)
            .build(),
    );

    // Create XML writer
    let output_path = temp_dir().join(format!("{}.xml", file_name));
    let writer = XmlDocumentWriterBuilder::new()
        .root_tag("cars")
        .include_declaration(true)
        .from_path(&output_path)
        .expect("Failed to create XML writer");

    // Build and run the step
    let step: StepInstance<Row, String> = StepBuilder::new("csv_to_xml")
        .reader(&reader)
        .processor(&encoder)
        .writer(&writer)
        .chunk(2)
        .build();

    let result = step.execute();

    // Verify step results
    assert!(result.is_ok());
    assert_eq!(step.get_status(), StepStatus::Success);
    assert_eq!(step.get_read_count(), 3);
    assert_eq!(step.get_write_count(), 3);
    assert_eq!(step.get_read_error_count(), 0);
    assert_eq!(step.get_write_error_count(), 0);

    // Read and verify the XML content
    let xml_content =
        read_to_string(&output_path).expect("Should have been able to read the XML file");

    assert_eq!(
        xml_content,
        r#"<?xml version="1.0" encoding="utf-8"?>
<cars>
<car><col name="year">1948</col><col name="make">Porsche</col><col name="model">356</col><col name="description">Luxury sports car</col></car>
<car><col name="year">1995</col><col name="make">Peugeot</col><col name="model">205</col><col name="description">City car</col></car>
<car><col name="year">2021</col><col name="make">Mazda</col><col name="model">CX-30</col><col name="description">SUV Compact</col></car>
</cars>
"#
    );

    // Clean up
    fs::remove_file(&input_path).ok();
    fs::remove_file(&output_path).ok();
}

#[test]
fn transform_csv_string_to_attribute_documents() {
    let csv = "id,name,note
1,Alice,first
2,Bob,";

    // Empty fields become nulls, and nulls are left out in attribute format
    let reader = CsvRowReaderBuilder::new()
        .has_headers(true)
        .empty_as_null(true)
        .from_reader(csv.as_bytes())
        .expect("Unable to read CSV input");

    let encoder = RowXmlEncoder::new(
        reader.columns().to_vec(),
        EncoderConfigBuilder::new()
            .row_element_name("entry")
            .format(XmlFormat::Attribute)
            .xml_namespace("urn:example:entries")
            .include_xml_declaration(false)
            .build(),
    );

    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    let output_path = temp_dir().join(format!("{}.xml", file_name));
    let writer = XmlDocumentWriterBuilder::new()
        .include_declaration(false)
        .from_path(&output_path)
        .expect("Failed to create XML writer");

    let step: StepInstance<Row, String> = StepBuilder::new("attribute_format")
        .reader(&reader)
        .processor(&encoder)
        .writer(&writer)
        .chunk(10)
        .build();

    let result = step.execute();

    assert!(result.is_ok());
    assert_eq!(step.get_status(), StepStatus::Success);
    assert_eq!(step.get_read_count(), 2);
    assert_eq!(step.get_write_count(), 2);

    let xml_content =
        read_to_string(&output_path).expect("Should have been able to read the XML file");

    assert_eq!(
        xml_content,
        r#"<entry xmlns="urn:example:entries" id="1" name="Alice" note="first"/>
<entry xmlns="urn:example:entries" id="2" name="Bob"/>
"#
    );

    fs::remove_file(&output_path).ok();
}

#[test]
fn build_encoder_from_textual_properties() -> anyhow::Result<()> {
    let config = EncoderConfig::from_properties([
        ("RowElementName", "product"),
        ("ColumnElementName", "value"),
        ("NameAttributeName", "column"),
        ("NullAttributeName", "missing"),
        ("IncludeXMLTag", "true"),
    ])?;

    let encoder = RowXmlEncoder::new(ColumnDescriptor::from_names(["sku", "price"]), config);

    let document = encoder.encode_row(&vec![RowValue::text("A-1"), RowValue::null()])?;

    assert_eq!(
        document,
        r#"<?xml version="1.0" encoding="utf-8"?><product><value column="sku">A-1</value><value column="price" missing="true"/></product>"#
    );

    Ok(())
}

#[test]
fn skip_limit_tolerates_a_malformed_csv_record() {
    // The second record misses a field, so reading it fails
    let csv = "id,name
1,one
2
3,three";

    let reader = CsvRowReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv.as_bytes())
        .expect("Unable to read CSV input");

    let encoder = RowXmlEncoder::new(
        reader.columns().to_vec(),
        EncoderConfigBuilder::new()
            .include_xml_declaration(false)
            .build(),
    );

    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    let output_path = temp_dir().join(format!("{}.xml", file_name));
    let writer = XmlDocumentWriterBuilder::new()
        .root_tag("rows")
        .include_declaration(true)
        .from_path(&output_path)
        .expect("Failed to create XML writer");

    let step: StepInstance<Row, String> = StepBuilder::new("tolerant")
        .reader(&reader)
        .processor(&encoder)
        .writer(&writer)
        .chunk(1)
        .skip_limit(1)
        .build();

    let result = step.execute();

    assert!(result.is_ok());
    assert_eq!(step.get_status(), StepStatus::Success);
    assert_eq!(step.get_read_count(), 2);
    assert_eq!(step.get_write_count(), 2);
    assert_eq!(step.get_read_error_count(), 1);

    let xml_content =
        read_to_string(&output_path).expect("Should have been able to read the XML file");

    assert_eq!(
        xml_content,
        r#"<?xml version="1.0" encoding="utf-8"?>
<rows>
<row><col name="id">1</col><col name="name">one</col></row>
<row><col name="id">3</col><col name="name">three</col></row>
</rows>
"#
    );

    fs::remove_file(&output_path).ok();
}
