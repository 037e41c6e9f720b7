//! Error types for template matching.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or matching templates.
///
/// Matching itself has a single hard failure, [`Error::EmptyCandidateSet`].
/// The remaining variants belong to the input backends (PPTX archives,
/// content files) that feed the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// There were no templates to score.
    #[error("No candidate templates to score in collection '{collection}'")]
    EmptyCandidateSet {
        /// Name of the template collection that came back empty.
        collection: String,
    },

    /// Content could not be decoded into a content record.
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// The archive is not a PPTX package.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX).
    #[error("XML parsing error: {0}")]
    XmlError(String),
}

impl Error {
    /// Create an [`Error::EmptyCandidateSet`] for the named collection.
    pub fn empty_candidates(collection: impl Into<String>) -> Self {
        Self::EmptyCandidateSet {
            collection: collection.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_candidate_set_names_collection() {
        let err = Error::empty_candidates("deck-42");
        assert_eq!(
            err.to_string(),
            "No candidate templates to score in collection 'deck-42'"
        );
    }
}
