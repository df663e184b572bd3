use thiserror::Error;

use crate::{cfg::Error as ConfigError, tle::ParsingError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// One element set could not be parsed nor initialized.
    /// Only this object is skipped, the batch proceeds.
    #[error("element set #{index} ({name}): {source}")]
    Parsing {
        /// Position in the batch
        index: usize,
        /// Object name
        name: String,
        source: ParsingError,
    },

    /// Invalid observer or search parameters: nothing can be predicted.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}
