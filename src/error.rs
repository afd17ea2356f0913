use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Error returned when reading GPX or writing CSV fails.
#[derive(Debug, Error)]
pub enum Gpx2CsvError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),
    #[error("invalid UTF-8 in text content: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("invalid escape in attribute value: {0}")]
    Escape(#[from] EscapeError),
    #[error("undefined entity '&{0};'")]
    UndefinedEntity(String),
    #[error("malformed document: {0}")]
    Malformed(&'static str),
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Input { path: PathBuf, source: io::Error },
    #[error("failed to open {} for writing: {source}", .path.display())]
    Output { path: PathBuf, source: io::Error },
    #[error("writing CSV failed: {0}")]
    Csv(#[from] csv::Error),
}

impl Gpx2CsvError {
    /// Whether the error stems from the GPX document itself rather than from
    /// the file system.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::XmlParse(_)
                | Self::Attribute(_)
                | Self::Utf8(_)
                | Self::Escape(_)
                | Self::UndefinedEntity(_)
                | Self::Malformed(_)
                | Self::MissingAttribute { .. }
        )
    }
}

impl From<Gpx2CsvError> for JsValue {
    fn from(e: Gpx2CsvError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Error ending a command-line conversion run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("You must supply an input and output!")]
    Usage,
    #[error("The input GPX file {} does not exist", .0.display())]
    InputNotFound(PathBuf),
    #[error("reading the overwrite confirmation failed: {0}")]
    Confirm(#[source] io::Error),
    #[error(transparent)]
    Convert(#[from] Gpx2CsvError),
}
