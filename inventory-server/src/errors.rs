use actix_multipart::MultipartError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use blob_store::BlobError;
use inventory_store::{ErrorKind, InventoryError};
use serde_json::json;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum InventoryErr {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Image(#[from] BlobError),

    #[error("Failed to read multipart upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Document not found: {0}")]
    DocumentMissing(String),

    #[error("Failed to render document {0}")]
    DocumentInvalid(String),
}

impl ResponseError for InventoryErr {
    fn status_code(&self) -> StatusCode {
        match self {
            InventoryErr::Inventory(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
            },
            InventoryErr::Image(BlobError::NotFound(_)) => StatusCode::NOT_FOUND,
            InventoryErr::Image(BlobError::Validation(_)) => StatusCode::BAD_REQUEST,
            InventoryErr::Image(BlobError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            InventoryErr::Multipart(_) | InventoryErr::BadRequest(_) => StatusCode::BAD_REQUEST,
            InventoryErr::DocumentMissing(_) => StatusCode::NOT_FOUND,
            InventoryErr::DocumentInvalid(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}: {:?}", self, self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        HttpResponse::build(status).json(json!({ "detail": self.to_string() }))
    }
}
