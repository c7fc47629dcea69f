use std::env::temp_dir;

use log::info;
use xmlify_rs::{
    core::{
        config::EncoderConfigBuilder,
        encoder::RowXmlEncoder,
        row::Row,
        step::{StepBuilder, StepInstance, StepStatus},
    },
    error::XmlifyError,
    item::csv::csv_reader::CsvRowReaderBuilder,
    item::xml::XmlDocumentWriterBuilder,
};

fn main() -> Result<(), XmlifyError> {
    env_logger::init();

    let csv = "year,make,model,description
   1948,Porsche,356,Luxury sports car
   1995,Peugeot,205,City car
   2021,Mazda,CX-30,SUV Compact
   1967,Ford,Mustang fastback 1967,American car";

    let reader = CsvRowReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_reader(csv.as_bytes())?;

    let encoder = RowXmlEncoder::new(
        reader.columns().to_vec(),
        EncoderConfigBuilder::new()
            .row_element_name("car")
            .include_xml_declaration(false)
            .build(),
    );

    let output_path = temp_dir().join("cars.xml");
    let writer = XmlDocumentWriterBuilder::new()
        .root_tag("cars")
        .from_path(&output_path)?;

    let step: StepInstance<Row, String> = StepBuilder::new("csv_to_xml")
        .reader(&reader)
        .processor(&encoder)
        .writer(&writer)
        .chunk(2) // set commit interval
        .build();

    let execution = step.execute()?;

    assert!(StepStatus::Success == execution.status);
    info!(
        "Wrote {} car documents to {}",
        execution.write_count,
        output_path.display()
    );

    Ok(())
}
