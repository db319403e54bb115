use crate::core::models::annotation::AnnotationError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid annotation type: {source}")]
    InvalidType {
        #[from]
        source: AnnotationError,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}
