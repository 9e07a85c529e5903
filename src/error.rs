// =============================================================================
// error.rs - WHEN THE DATA FIGHTS BACK
// =============================================================================
//
// Dirty values (a numeric business name, a null confidence) are not errors.
// They get a definite "no" from the stage that looks at them. A field the
// schema needs but the data lacks entirely (a name at the relevance stage, a
// confidence column no record has) means the caller handed us the wrong
// schema, and guessing would quietly poison the filter result.
// =============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The pipeline stage that was running when something happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Numeric threshold on `confidence`
    Confidence,
    /// Keyword classification of `business_name`
    Relevance,
    /// First-address country check
    Country,
    /// Display cleanup of `business_name`
    Cleaning,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Confidence => write!(f, "confidence"),
            Stage::Relevance => write!(f, "relevance"),
            Stage::Country => write!(f, "country"),
            Stage::Cleaning => write!(f, "cleaning"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{stage} stage: record {index} is missing required field `{field}`")]
    MissingField {
        stage: Stage,
        field: &'static str,
        index: usize,
    },

    #[error("{stage} stage: no record carries required field `{field}`")]
    MissingColumn { stage: Stage, field: &'static str },

    #[error("failed to build keyword matcher: {0}")]
    Keywords(#[from] aho_corasick::BuildError),
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_stage_field_and_record() {
        let err = FilterError::MissingField {
            stage: Stage::Country,
            field: "addresses",
            index: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("country"));
        assert!(msg.contains("addresses"));
        assert!(msg.contains("record 7"));
    }

    #[test]
    fn test_missing_column_message_names_stage_and_field() {
        let err = FilterError::MissingColumn {
            stage: Stage::Confidence,
            field: "confidence",
        };
        assert_eq!(
            err.to_string(),
            "confidence stage: no record carries required field `confidence`"
        );
    }
}
