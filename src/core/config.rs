use serde::{Deserialize, Serialize};

use crate::{core::name::is_valid_xml_name, error::XmlifyError};

/// Property keys understood by [`EncoderConfig::from_properties`].
///
/// The keys mirror the names used by configuration front-ends, so a host can
/// forward its property bag without renaming anything.
pub mod property {
    /// Name of the element wrapping a single column value. Element format only.
    pub const COLUMN_ELEMENT_NAME: &str = "ColumnElementName";
    /// Name of the element wrapping a single row.
    pub const ROW_ELEMENT_NAME: &str = "RowElementName";
    /// Name of the attribute marking a null column value. Element format only.
    pub const NULL_ATTRIBUTE_NAME: &str = "NullAttributeName";
    /// Name of the attribute carrying the column name. Element format only.
    pub const NAME_ATTRIBUTE_NAME: &str = "NameAttributeName";
    /// Namespace of the row element. Empty means no namespace.
    pub const XML_NAMESPACE: &str = "XMLNamespace";
    /// Whether column elements carry the column name. Element format only.
    pub const INCLUDE_COLUMN_NAME: &str = "IncludeColumnName";
    /// `true` selects the element format, `false` the attribute format.
    pub const ELEMENT_FORMAT: &str = "ElementFormat";
    /// Whether the document starts with an XML declaration.
    pub const INCLUDE_XML_TAG: &str = "IncludeXMLTag";
}

/// Layout of the generated XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XmlFormat {
    /// Every column becomes a child element of the row element. Null values
    /// are kept as empty elements marked with the null attribute.
    #[default]
    Element,
    /// Every non-null column becomes an attribute of the row element. Null
    /// values leave no trace in the output.
    Attribute,
}

/// Configuration of the row encoder.
///
/// A config is immutable once built. Programmatic callers go through
/// [`EncoderConfigBuilder`], hosts with a textual property bag through
/// [`EncoderConfig::from_properties`].
///
/// # Defaults
///
/// | Option | Default |
/// |--------|---------|
/// | row element name | `row` |
/// | column element name | `col` |
/// | name attribute name | `name` |
/// | null attribute name | `null` |
/// | XML namespace | none |
/// | include column name | `true` |
/// | include XML declaration | `true` |
/// | format | [`XmlFormat::Element`] |
///
/// # Examples
///
/// ```
/// use xmlify_rs::core::config::{EncoderConfig, EncoderConfigBuilder, XmlFormat};
///
/// let config = EncoderConfigBuilder::new()
///     .row_element_name("person")
///     .format(XmlFormat::Attribute)
///     .include_xml_declaration(false)
///     .build();
///
/// assert_eq!(config.row_element_name(), "person");
/// assert_eq!(config.format(), XmlFormat::Attribute);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    row_element_name: String,
    column_element_name: String,
    name_attribute_name: String,
    null_attribute_name: String,
    xml_namespace: String,
    include_column_name: bool,
    include_xml_declaration: bool,
    format: XmlFormat,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            row_element_name: "row".to_string(),
            column_element_name: "col".to_string(),
            name_attribute_name: "name".to_string(),
            null_attribute_name: "null".to_string(),
            xml_namespace: String::new(),
            include_column_name: true,
            include_xml_declaration: true,
            format: XmlFormat::Element,
        }
    }
}

impl EncoderConfig {
    /// Builds a config from a textual property bag.
    ///
    /// Unlisted properties keep their defaults. Boolean values are parsed
    /// case-insensitively. The assembled config is validated before it is
    /// returned, so a host failing to supply a usable configuration finds out
    /// here rather than on the first row.
    ///
    /// # Errors
    ///
    /// Returns [`XmlifyError::InvalidProperty`] for unknown keys, unparsable
    /// boolean values and empty name properties, and
    /// [`XmlifyError::MalformedName`] when a name property is not a
    /// well-formed XML name.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlify_rs::core::config::{EncoderConfig, XmlFormat};
    ///
    /// let config = EncoderConfig::from_properties([
    ///     ("RowElementName", "person"),
    ///     ("ElementFormat", "false"),
    ///     ("IncludeXMLTag", "False"),
    /// ])?;
    ///
    /// assert_eq!(config.row_element_name(), "person");
    /// assert_eq!(config.format(), XmlFormat::Attribute);
    /// assert!(!config.include_xml_declaration());
    /// # Ok::<(), xmlify_rs::XmlifyError>(())
    /// ```
    pub fn from_properties<I, K, V>(properties: I) -> Result<EncoderConfig, XmlifyError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = EncoderConfig::default();

        for (key, value) in properties {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                property::COLUMN_ELEMENT_NAME => config.column_element_name = value.to_string(),
                property::ROW_ELEMENT_NAME => config.row_element_name = value.to_string(),
                property::NULL_ATTRIBUTE_NAME => config.null_attribute_name = value.to_string(),
                property::NAME_ATTRIBUTE_NAME => config.name_attribute_name = value.to_string(),
                property::XML_NAMESPACE => config.xml_namespace = value.to_string(),
                property::INCLUDE_COLUMN_NAME => {
                    config.include_column_name = parse_bool(key, value)?;
                }
                property::ELEMENT_FORMAT => {
                    config.format = if parse_bool(key, value)? {
                        XmlFormat::Element
                    } else {
                        XmlFormat::Attribute
                    };
                }
                property::INCLUDE_XML_TAG => {
                    config.include_xml_declaration = parse_bool(key, value)?;
                }
                unknown => {
                    return Err(XmlifyError::InvalidProperty(format!(
                        "unrecognized property '{unknown}'"
                    )));
                }
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Checks that every configured name is usable.
    ///
    /// The namespace is exempt: it is an attribute value, not a name, and may
    /// be empty.
    ///
    /// # Errors
    ///
    /// Returns [`XmlifyError::InvalidProperty`] when a name property is empty
    /// and [`XmlifyError::MalformedName`] when one is not a well-formed XML
    /// name.
    pub fn validate(&self) -> Result<(), XmlifyError> {
        let names = [
            (property::ROW_ELEMENT_NAME, &self.row_element_name),
            (property::COLUMN_ELEMENT_NAME, &self.column_element_name),
            (property::NAME_ATTRIBUTE_NAME, &self.name_attribute_name),
            (property::NULL_ATTRIBUTE_NAME, &self.null_attribute_name),
        ];

        for (key, name) in names {
            if name.is_empty() {
                return Err(XmlifyError::InvalidProperty(format!(
                    "the {key} property must not be empty"
                )));
            }
            if !is_valid_xml_name(name) {
                return Err(XmlifyError::MalformedName(name.clone()));
            }
        }

        Ok(())
    }

    /// Name of the element wrapping a single row.
    pub fn row_element_name(&self) -> &str {
        &self.row_element_name
    }

    /// Name of the element wrapping a single column value.
    pub fn column_element_name(&self) -> &str {
        &self.column_element_name
    }

    /// Name of the attribute carrying the column name.
    pub fn name_attribute_name(&self) -> &str {
        &self.name_attribute_name
    }

    /// Name of the attribute marking a null column value.
    pub fn null_attribute_name(&self) -> &str {
        &self.null_attribute_name
    }

    /// The configured namespace, or `None` when it is unset.
    ///
    /// A namespace consisting only of whitespace counts as unset. A set
    /// namespace is returned verbatim.
    pub fn namespace(&self) -> Option<&str> {
        if self.xml_namespace.trim().is_empty() {
            None
        } else {
            Some(&self.xml_namespace)
        }
    }

    /// Whether column elements carry the column name.
    pub fn include_column_name(&self) -> bool {
        self.include_column_name
    }

    /// Whether the document starts with an XML declaration.
    pub fn include_xml_declaration(&self) -> bool {
        self.include_xml_declaration
    }

    /// Layout of the generated XML.
    pub fn format(&self) -> XmlFormat {
        self.format
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, XmlifyError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(XmlifyError::InvalidProperty(format!(
            "the {key} property expects 'true' or 'false', got '{value}'"
        )))
    }
}

/// A builder for configuring the row encoder.
///
/// Starts out with the defaults documented on [`EncoderConfig`]; every method
/// overrides one option.
///
/// # Examples
///
/// ```
/// use xmlify_rs::core::config::EncoderConfigBuilder;
///
/// let config = EncoderConfigBuilder::new()
///     .row_element_name("record")
///     .column_element_name("field")
///     .xml_namespace("urn:example:rows")
///     .build();
///
/// assert_eq!(config.namespace(), Some("urn:example:rows"));
/// ```
#[derive(Default)]
pub struct EncoderConfigBuilder {
    config: EncoderConfig,
}

impl EncoderConfigBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the element wrapping a single row.
    pub fn row_element_name(mut self, name: &str) -> Self {
        self.config.row_element_name = name.to_string();
        self
    }

    /// Sets the name of the element wrapping a single column value.
    pub fn column_element_name(mut self, name: &str) -> Self {
        self.config.column_element_name = name.to_string();
        self
    }

    /// Sets the name of the attribute carrying the column name.
    pub fn name_attribute_name(mut self, name: &str) -> Self {
        self.config.name_attribute_name = name.to_string();
        self
    }

    /// Sets the name of the attribute marking a null column value.
    pub fn null_attribute_name(mut self, name: &str) -> Self {
        self.config.null_attribute_name = name.to_string();
        self
    }

    /// Sets the namespace of the row element.
    pub fn xml_namespace(mut self, namespace: &str) -> Self {
        self.config.xml_namespace = namespace.to_string();
        self
    }

    /// Sets whether column elements carry the column name.
    pub fn include_column_name(mut self, yes: bool) -> Self {
        self.config.include_column_name = yes;
        self
    }

    /// Sets whether the document starts with an XML declaration.
    pub fn include_xml_declaration(mut self, yes: bool) -> Self {
        self.config.include_xml_declaration = yes;
        self
    }

    /// Sets the layout of the generated XML.
    pub fn format(mut self, format: XmlFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Finalizes the configuration.
    pub fn build(self) -> EncoderConfig {
        self.config
    }
}
