//! HTTP handlers for store endpoints.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::store::{
    CreatePurchaseCommand, CreateStoreItemCommand, DeleteStoreItemCommand, GetPurchaseQuery,
    GetStoreItemQuery, ListStoreItemsQuery, UpdateStoreItemCommand, VerifyPurchaseCommand,
};
use crate::domain::foundation::{Money, PurchaseId, StoreItemId};
use crate::domain::store::StoreItemChanges;

use super::super::error::ApiError;
use super::super::extract::{AppJson, AppPath, AppQuery};
use super::super::middleware::{RequireAdmin, RequireAuth, RequireClient};
use super::super::multipart::FormData;
use super::super::state::AppState;
use super::dto::{CreatePurchaseRequest, ListItemsParams, VerifyPurchaseRequest};

const IMAGE_FIELD: &str = "image";

fn price_field(form: &FormData) -> Result<Option<Money>, ApiError> {
    form.parsed::<f64>("price")?
        .map(|naira| {
            Money::from_major(naira)
                .map_err(|e| ApiError::bad_request(e.to_string()).with_detail("field", "price"))
        })
        .transpose()
}

// ════════════════════════════════════════════════════════════════════════════════
// Catalogue
// ════════════════════════════════════════════════════════════════════════════════

/// POST /store/items - multipart: name, description?, price, quantity, is_active?, image?
pub async fn create_item(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = FormData::read(multipart, IMAGE_FIELD).await?;
    let price = price_field(&form)?.ok_or_else(|| {
        ApiError::bad_request("Field 'price' is required").with_detail("field", "price")
    })?;
    let quantity = form.parsed::<i32>("quantity")?.ok_or_else(|| {
        ApiError::bad_request("Field 'quantity' is required").with_detail("field", "quantity")
    })?;

    let cmd = CreateStoreItemCommand {
        name: form.required("name")?,
        description: form.text("description"),
        price,
        quantity,
        is_active: form.flag("is_active")?,
        image: form.take_file(),
    };

    let item = state.create_item_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /store/items
pub async fn list_items(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListItemsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state
        .list_items_handler()
        .handle(ListStoreItemsQuery {
            include_inactive: params.include_inactive,
        })
        .await?;
    Ok(Json(items))
}

/// GET /store/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<StoreItemId>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.get_item_handler().handle(GetStoreItemQuery { id }).await?;
    Ok(Json(item))
}

/// PATCH /store/items/:id - multipart, every field optional
pub async fn update_item(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<StoreItemId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = FormData::read(multipart, IMAGE_FIELD).await?;
    let changes = StoreItemChanges {
        name: form.text("name"),
        description: form.text("description"),
        price: price_field(&form)?,
        quantity: form.parsed::<i32>("quantity")?,
        is_active: form.flag("is_active")?,
        image_url: None,
    };

    let item = state
        .update_item_handler()
        .handle(UpdateStoreItemCommand {
            id,
            changes,
            image: form.take_file(),
        })
        .await?;
    Ok(Json(item))
}

/// DELETE /store/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<StoreItemId>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .delete_item_handler()
        .handle(DeleteStoreItemCommand { id })
        .await?;
    Ok(Json(result))
}

// ════════════════════════════════════════════════════════════════════════════════
// Purchases
// ════════════════════════════════════════════════════════════════════════════════

/// POST /store/purchase
pub async fn create_purchase(
    State(state): State<AppState>,
    RequireClient(client_id): RequireClient,
    AppJson(request): AppJson<CreatePurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_purchase_handler()
        .handle(CreatePurchaseCommand {
            client_id,
            items: request.items,
            delivery_option: request.delivery_option,
            delivery_address: request.delivery_address,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// POST /store/verify-purchase
pub async fn verify_purchase(
    State(state): State<AppState>,
    _client: RequireClient,
    AppJson(request): AppJson<VerifyPurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .verify_purchase_handler()
        .handle(VerifyPurchaseCommand {
            reference: request.reference,
        })
        .await?;
    Ok(Json(result))
}

/// GET /store/purchases
pub async fn list_purchases(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let purchases = state.list_purchases_handler().handle().await?;
    Ok(Json(purchases))
}

/// GET /store/purchases/:id
pub async fn get_purchase(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    AppPath(purchase_id): AppPath<PurchaseId>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = state
        .get_purchase_handler()
        .handle(GetPurchaseQuery { actor, purchase_id })
        .await?;
    Ok(Json(purchase))
}
