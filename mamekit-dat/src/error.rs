/// Errors that can occur while reading or writing catalogs, record sets, and
/// DAT archives.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unrecognized record-set shape: {0}")]
    UnrecognizedShape(String),

    #[error("DAT encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("DAT decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("DAT has {0} trailing bytes after the last record")]
    TrailingBytes(usize),
}

impl DatError {
    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }

    pub fn unrecognized_shape(msg: impl Into<String>) -> Self {
        Self::UnrecognizedShape(msg.into())
    }
}
