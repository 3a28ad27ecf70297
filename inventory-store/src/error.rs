use thiserror::Error;
use validator::ValidationErrors;

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Coarse classification callers map onto responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Storage,
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Inventory storage failure: {0}")]
    Storage(String),

    #[error("Failed to read or write the inventory document")]
    Io(#[from] std::io::Error),

    #[error("Inventory document is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("An error occurred in the embedded inventory database")]
    Rocks(#[from] rocksdb::Error),
}

impl InventoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::NotFound(_) => ErrorKind::NotFound,
            InventoryError::Validation(_) => ErrorKind::Validation,
            InventoryError::Storage(_)
            | InventoryError::Io(_)
            | InventoryError::Json(_)
            | InventoryError::Rocks(_) => ErrorKind::Storage,
        }
    }
}

impl From<ValidationErrors> for InventoryError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: invalid value", field),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        InventoryError::Validation(message)
    }
}
