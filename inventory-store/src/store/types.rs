use std::borrow::Cow;
use blob_store::IMAGE_REFERENCE_PREFIX;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// One record of the inventory document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
}

/// The caller-controlled part of an item, used by create and update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub category: String,
    #[validate(custom(function = "validate_image_reference"))]
    pub image_url: String,
}

impl InventoryItem {
    pub fn new(id: String, fields: ItemFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            category: fields.category,
            image_url: fields.image_url,
        }
    }

    /// Replaces every field except the id.
    pub fn apply(&mut self, fields: ItemFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.category = fields.category;
        self.image_url = fields.image_url;
    }
}

fn validate_image_reference(image_url: &str) -> Result<(), ValidationError> {
    if image_url.starts_with(IMAGE_REFERENCE_PREFIX) {
        return Ok(());
    }
    let mut error = ValidationError::new("image_reference");
    error.message = Some(Cow::Owned(format!("must start with '{}'", IMAGE_REFERENCE_PREFIX)));
    Err(error)
}
