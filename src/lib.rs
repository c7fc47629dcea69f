#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 <div align="center">
   <h1>Xmlify for Rust</h1>
   <h3>🧾 A toolkit for turning tabular rows into XML documents</h3>

   [![crate](https://img.shields.io/crates/v/xmlify-rs.svg)](https://crates.io/crates/xmlify-rs)
   [![docs](https://docs.rs/xmlify-rs/badge.svg)](https://docs.rs/xmlify-rs)
   [![build status](https://github.com/sboussekeyt/xmlify-rs/actions/workflows/test.yml/badge.svg)](https://github.com/sboussekeyt/xmlify-rs/actions/workflows/test.yml)
   ![license](https://shields.io/badge/license-MIT%2FApache--2.0-blue)

  </div>

 # Xmlify for Rust

 **Xmlify for Rust** turns tabular data into XML. It couples a small chunk-oriented pipeline with a configurable row encoder, so CSV files, database rows or any other columnar source can be rendered as XML fragments or complete documents without hand-writing serialization code. Every row becomes one self-contained document string, encoded deterministically from the column layout and the encoder configuration.

 ## Core Concepts

Understanding these core components will help you get started:

- **Step:** A domain object that encapsulates an independent, sequential phase of a pipeline. A `Step` typically involves reading rows, encoding them, and writing the resulting documents out.
- **ItemReader:** An abstraction that represents the retrieval of input for a `Step`, one item at a time.
- **ItemProcessor:** An abstraction that represents the business logic of processing an item. The item read by the `ItemReader` is passed to the `ItemProcessor`.
- **ItemWriter:** An abstraction that represents the output of a `Step`, one batch or chunk of items at a time.
- **RowXmlEncoder:** An `ItemProcessor` that renders a [`Row`](core::row::Row) as one XML document string, driven by the column layout and an [`EncoderConfig`](core::config::EncoderConfig).

 ## Features

The crate is modular, allowing you to enable only the features you need:

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| csv           | Enables a CSV `ItemReader` producing rows with named columns  |
| logger        | Enables a logger `ItemWriter`, useful for debugging purposes  |
| full          | Enables all available features                                |

 ## Roadmap

We are actively working on enhancing `xmlify-rs` with more features:

- [ ] JSON reader for columnar sources
- [ ] Streaming writer for documents larger than memory
- [ ] Advanced Retry/Skip policies for fault tolerance

 ## Getting Started
 Make sure you activated the suitable features crate on Cargo.toml:

```toml
[dependencies]
xmlify-rs = { version = "<version>", features = ["<full|csv|logger>"] }
```

Then, on your main.rs:

```rust
# use std::env::temp_dir;
# use xmlify_rs::{
#     core::{
#         config::EncoderConfigBuilder,
#         encoder::RowXmlEncoder,
#         row::Row,
#         step::{StepBuilder, StepInstance, StepStatus},
#     },
#     error::XmlifyError,
#     item::csv::csv_reader::CsvRowReaderBuilder,
#     item::xml::XmlDocumentWriterBuilder,
# };

fn main() -> Result<(), XmlifyError> {
    let csv = "year,make,model,description
   1948,Porsche,356,Luxury sports car
   1995,Peugeot,205,City car
   2021,Mazda,CX-30,SUV Compact
   1967,Ford,Mustang fastback 1967,American car";

    let reader = CsvRowReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_reader(csv.as_bytes())?;

    let encoder = RowXmlEncoder::new(
        reader.columns().to_vec(),
        EncoderConfigBuilder::new()
            .row_element_name("car")
            .include_xml_declaration(false)
            .build(),
    );

    let writer = XmlDocumentWriterBuilder::new()
        .root_tag("cars")
        .from_path(temp_dir().join("cars.xml"))?;

    let step: StepInstance<Row, String> = StepBuilder::new("csv_to_xml")
        .reader(&reader) // set csv reader
        .processor(&encoder) // set xml encoder
        .writer(&writer) // set xml writer
        .chunk(2) // set commit interval
        .build();

    let result = step.execute();

    assert!(result.is_ok());
    assert!(step.get_status() == StepStatus::Success);
    assert!(step.get_write_count() == 4);

    Ok(())
}
```

## Examples
+ [Generate XML file from CSV string](https://github.com/sboussekeyt/xmlify-rs/blob/main/demos/csv_to_xml.rs)
+ [Log rows in attribute format](https://github.com/sboussekeyt/xmlify-rs/blob/main/demos/attribute_format.rs)

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.

 ## Contribution
 Unless you explicitly state otherwise, any contribution intentionally submitted
 for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
 dual licensed as above, without any additional terms or conditions

 */

/// Core module for pipeline operations
pub mod core;

/// Error types for pipeline operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of item readers / writers (for example: csv reader and xml writer)
pub mod item;
