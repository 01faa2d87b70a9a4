//! Configuration errors raised while assembling a mission path.

use thiserror::Error;

use crate::model::NodeCategory;
use crate::outline::Theme;

/// Fatal generation errors. None of these are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("no generator registered for node category {0}")]
    MissingGenerator(NodeCategory),

    #[error("{category} generator has no entry for theme {theme}")]
    MissingTheme { category: NodeCategory, theme: Theme },

    #[error("invalid path config: {0}")]
    InvalidConfig(String),
}

pub type PathResult<T> = Result<T, PathError>;
