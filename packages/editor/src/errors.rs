//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] diff_suggestion_markup::ParseError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Schema error: {0}")]
    Schema(#[from] crate::schema::SchemaError),

    #[error("Transaction was built against a different document")]
    StaleTransaction,
}
