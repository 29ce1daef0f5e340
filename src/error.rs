//! Errors surfaced by the application model

use thiserror::Error;

use crate::content::UnknownWindowType;
use crate::layout::LayoutError;
use crate::persistence::PersistenceError;
use crate::tree::TreeError;

#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    UnknownWindowType(#[from] UnknownWindowType),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}
