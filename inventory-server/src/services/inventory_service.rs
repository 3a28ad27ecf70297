use actix_web::{delete, get, post, put, web, HttpResponse};
use actix_web::web::Data;
use inventory_store::ItemFields;
use serde::{Deserialize, Serialize};
use crate::errors::InventoryErr;
use crate::services::{AppState, APP_TYPE_JSON};

#[derive(Serialize, Deserialize)]
struct DeleteItemResponse {
    id: String,
    detail: String,
}

#[get("/inventory")]
async fn list_items(shared_state: Data<AppState>) -> Result<HttpResponse, InventoryErr> {
    let items = shared_state.inventory.list().await?;
    Ok(HttpResponse::Ok().content_type(APP_TYPE_JSON).json(items))
}

#[get("/inventory/{id}")]
async fn get_item(
    id: web::Path<String>,
    shared_state: Data<AppState>
) -> Result<HttpResponse, InventoryErr> {
    let item = shared_state.inventory.get(&id).await?;
    Ok(HttpResponse::Ok().content_type(APP_TYPE_JSON).json(item))
}

#[post("/inventory")]
async fn create_item(
    form: web::Form<ItemFields>,
    shared_state: Data<AppState>,
) -> Result<HttpResponse, InventoryErr> {
    let item = shared_state.inventory.create(form.into_inner()).await?;
    Ok(HttpResponse::Created().content_type(APP_TYPE_JSON).json(item))
}

#[put("/inventory/{id}")]
async fn update_item(
    id: web::Path<String>,
    form: web::Form<ItemFields>,
    shared_state: Data<AppState>,
) -> Result<HttpResponse, InventoryErr> {
    let item = shared_state.inventory.update(&id, form.into_inner()).await?;
    Ok(HttpResponse::Ok().content_type(APP_TYPE_JSON).json(item))
}

#[delete("/inventory/{id}")]
async fn delete_item(
    id: web::Path<String>,
    shared_state: Data<AppState>
) -> Result<HttpResponse, InventoryErr> {
    let item = shared_state.inventory.delete(&id).await?;
    let resp = DeleteItemResponse { id: item.id, detail: "Item deleted".to_string() };
    Ok(HttpResponse::Ok().content_type(APP_TYPE_JSON).json(resp))
}
