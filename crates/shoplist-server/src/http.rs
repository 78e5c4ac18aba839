//! HTTP endpoint handlers
//!
//! Every handler receives the caller's email resolved by the identity
//! middleware and scopes its work to that owner. By-id operations load the
//! record first and reject cross-owner access with 403, not 404.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoplist_core::{CategoryCount, Item};

use crate::auth::CallerEmail;
use crate::error::ApiError;
use crate::AppState;

/// Request body for create and update
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Response carrying a single item
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub message: String,
    pub item: Item,
}

/// Response carrying a list of items
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub message: String,
    pub items: Vec<Item>,
}

/// Response carrying only a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for the count-by-category aggregate
#[derive(Debug, Serialize)]
pub struct CountsResponse {
    pub message: String,
    pub data: Vec<CategoryCount>,
}

/// Reject the request unless the caller owns the record
fn ensure_owner(item: &Item, caller: &str) -> Result<(), ApiError> {
    if item.is_owned_by(caller) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Require both payload fields to be present and non-blank. Submitted text
/// is stored verbatim; trimming happens only for the emptiness check.
fn validate_payload(payload: &ItemPayload, message: &str) -> Result<(String, String), ApiError> {
    let name = payload.name.as_deref().unwrap_or_default();
    let category = payload.category.as_deref().unwrap_or_default();

    if name.trim().is_empty() || category.trim().is_empty() {
        return Err(ApiError::Validation(message.to_string()));
    }

    Ok((name.to_string(), category.to_string()))
}

/// Parse the path id. Blank ids are a validation error; an id that is not a
/// UUID cannot name any stored item and reads as not found.
fn parse_item_id(raw: &str) -> Result<Uuid, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::Validation("Item ID is required.".to_string()));
    }

    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Item not found".to_string()))
}

/// Load an item and check ownership, the shared prologue of every by-id
/// handler
fn load_owned(
    state: &AppState,
    id: &Uuid,
    caller: &str,
    context: &str,
    missing: impl Into<String>,
) -> Result<Item, ApiError> {
    let item = state
        .repo()?
        .get_item(id)
        .map_err(|e| ApiError::store(context, e))?
        .ok_or_else(|| ApiError::NotFound(missing.into()))?;

    ensure_owner(&item, caller)?;
    Ok(item)
}

/// Create a new item owned by the caller
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Extension(CallerEmail(email)): Extension<CallerEmail>,
    Json(payload): Json<ItemPayload>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let (name, category) = validate_payload(&payload, "All fields are required")?;

    let item = Item::new(name, category, email);
    state
        .repo()?
        .create_item(&item)
        .map_err(|e| ApiError::store("Error creating item", e))?;

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            message: "Item created successfully".to_string(),
            item,
        }),
    ))
}

fn list_by_status(
    state: &AppState,
    owner: &str,
    purchased: bool,
) -> Result<Json<ItemsResponse>, ApiError> {
    let label = if purchased { "purchased" } else { "unpurchased" };

    let items = state
        .repo()?
        .items_by_status(owner, purchased)
        .map_err(|e| ApiError::store(&format!("Error fetching {} items", label), e))?;

    // Empty-but-valid results surface as 404; this is the published contract
    if items.is_empty() {
        return Err(ApiError::NotFound(format!("No {} items found", label)));
    }

    let message = if purchased {
        "Purchased items fetched successfully"
    } else {
        "Unpurchased items fetched successfully"
    };

    Ok(Json(ItemsResponse {
        message: message.to_string(),
        items,
    }))
}

/// Get the caller's items still to be purchased
pub async fn unpurchased_items(
    State(state): State<Arc<AppState>>,
    Extension(CallerEmail(email)): Extension<CallerEmail>,
) -> Result<Json<ItemsResponse>, ApiError> {
    list_by_status(&state, &email, false)
}

/// Get the caller's already purchased items
pub async fn purchased_items(
    State(state): State<Arc<AppState>>,
    Extension(CallerEmail(email)): Extension<CallerEmail>,
) -> Result<Json<ItemsResponse>, ApiError> {
    list_by_status(&state, &email, true)
}

/// Get a single item by id
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Extension(CallerEmail(email)): Extension<CallerEmail>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = parse_item_id(&id)?;
    let item = load_owned(&state, &id, &email, "Error fetching item", "Item not found")?;

    Ok(Json(ItemResponse {
        message: "Item fetched successfully".to_string(),
        item,
    }))
}

/// Count the caller's purchased items per category, most frequent first
pub async fn items_count_by_category(
    State(state): State<Arc<AppState>>,
    Extension(CallerEmail(email)): Extension<CallerEmail>,
) -> Result<Json<CountsResponse>, ApiError> {
    let data = state
        .repo()?
        .count_by_category(&email)
        .map_err(|e| ApiError::store("Error getting items count by category", e))?;

    if data.is_empty() {
        return Err(ApiError::NotFound("No items found".to_string()));
    }

    Ok(Json(CountsResponse {
        message: "data fetched successfully".to_string(),
        data,
    }))
}

/// Overwrite an item's name and category; the purchased flag and owner are
/// untouched
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Extension(CallerEmail(email)): Extension<CallerEmail>,
    Path(id): Path<String>,
    Json(payload): Json<ItemPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (name, category) = validate_payload(&payload, "Name and category are required.")?;
    let id = parse_item_id(&id)?;

    load_owned(&state, &id, &email, "Error updating item", "Item not found")?;

    state
        .repo()?
        .update_item(&id, &name, &category)
        .map_err(|e| ApiError::store("Error updating item", e))?;

    Ok(Json(MessageResponse {
        message: "Item updated successfully".to_string(),
    }))
}

/// Mark an item as purchased. Applying it to an already purchased item is a
/// no-op success.
pub async fn mark_item_purchased(
    State(state): State<Arc<AppState>>,
    Extension(CallerEmail(email)): Extension<CallerEmail>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_item_id(&id)?;

    load_owned(&state, &id, &email, "Error updating item", "Item not found")?;

    state
        .repo()?
        .mark_purchased(&id)
        .map_err(|e| ApiError::store("Error updating item", e))?;

    Ok(Json(MessageResponse {
        message: "Item updated successfully".to_string(),
    }))
}

/// Delete an item permanently
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Extension(CallerEmail(email)): Extension<CallerEmail>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let parsed = parse_item_id(&id)?;

    load_owned(
        &state,
        &parsed,
        &email,
        "Error deleting item",
        format!("No item found with id: {}", id),
    )?;

    state
        .repo()?
        .delete_item(&parsed)
        .map_err(|e| ApiError::store("Error deleting item", e))?;

    Ok(Json(MessageResponse {
        message: "Item deleted successfully".to_string(),
    }))
}
