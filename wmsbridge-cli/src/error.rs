//! CLI error type.

use thiserror::Error;
use wmsbridge::featureinfo::FeatureInfoError;

#[derive(Debug, Error)]
pub enum CliError {
    /// An argument could not be parsed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The feature query failed.
    #[error(transparent)]
    FeatureInfo(#[from] FeatureInfoError),
}
