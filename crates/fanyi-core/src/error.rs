use std::num::ParseIntError;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Invalid version string: {version:?}")]
    InvalidVersion {
        version: String,
        #[source]
        source: ParseIntError,
    },
}
