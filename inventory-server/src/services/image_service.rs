use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{get, post, web, HttpResponse};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use crate::errors::InventoryErr;
use crate::services::{absolute_url, AppState, APP_TYPE_JSON};

const FILE_FIELD: &str = "file";

#[derive(Serialize, Deserialize)]
struct UploadImageResponse {
    filename: String,
    image_url: String,
    url: Option<String>,
}

#[post("/images/upload")]
async fn upload_image(
    mut payload: Multipart,
    shared_state: Data<AppState>,
) -> Result<HttpResponse, InventoryErr> {
    while let Some(mut field) = payload.try_next().await? {
        let disposition = field.content_disposition();
        let is_file = disposition.get_name() == Some(FILE_FIELD);
        let filename = disposition.get_filename().unwrap_or_default().to_string();
        let content_type = field
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        // Unrelated parts still have to be drained before the next one.
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if is_file {
                bytes.extend_from_slice(&chunk);
            }
        }
        if !is_file {
            continue;
        }

        let stored = shared_state.images.store(&bytes, &content_type, &filename).await?;
        let url = match &shared_state.base_url {
            Some(base) => Some(
                absolute_url(base, &stored.reference)
                    .map_err(|e| InventoryErr::BadRequest(format!("Cannot build image URL: {}", e)))?
                    .to_string(),
            ),
            None => None,
        };
        let resp = UploadImageResponse {
            filename: stored.storage_filename,
            image_url: stored.reference,
            url,
        };
        return Ok(HttpResponse::Created().content_type(APP_TYPE_JSON).json(resp));
    }

    Err(InventoryErr::BadRequest(format!("Missing multipart field '{}'", FILE_FIELD)))
}

#[get("/images/{filename}")]
async fn serve_image(
    filename: web::Path<String>,
    shared_state: Data<AppState>,
) -> Result<HttpResponse, InventoryErr> {
    let blob = shared_state.images.retrieve(&filename).await?;
    Ok(HttpResponse::Ok().content_type(blob.media_type).body(blob.bytes))
}
