use anyhow::{Context, Result};
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::{QueryDsl, QueryResult};
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use crate::auth::CurrentUser;
use crate::cart::{Cart, CartItem, CartLine};
use crate::core::aliases::DieselError;
use crate::core::app_error::{AppError, StdResponse};
use crate::core::app_state::AppState;
use crate::models::FoodItemEntity;
use crate::schema::food_items;

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/carts",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_my_cart))
            .routes(utoipa_axum::routes!(add_cart_item))
            .routes(utoipa_axum::routes!(update_cart_item))
            .routes(utoipa_axum::routes!(remove_cart_item))
            .routes(utoipa_axum::routes!(clear_cart)),
    )
}

#[derive(Serialize, ToSchema)]
struct GetCartRes {
    pub lines: Vec<CartLine>,
    pub total: f32,
    pub item_count: i32,
}

impl From<Cart> for GetCartRes {
    fn from(cart: Cart) -> Self {
        Self {
            total: cart.total(),
            item_count: cart.count(),
            lines: cart.lines().to_vec(),
        }
    }
}

/// Fetch the authenticated user's cart.
#[utoipa::path(
    get,
    path = "/my-cart",
    tags = ["Carts"],
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Get cart successfully", body = StdResponse<GetCartRes, String>)
    )
)]
async fn get_my_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let cart = state.carts.snapshot(user.id);

    Ok(StdResponse {
        data: Some(GetCartRes::from(cart)),
        message: Some("Get cart successfully"),
    })
}

#[derive(Deserialize, ToSchema)]
struct AddCartItemReq {
    pub food_item_id: i32,
}

/// Add one unit of a menu item to the cart. Re-adding an item already in
/// the cart increments its quantity instead of creating a second line.
#[utoipa::path(
    post,
    path = "/items",
    tags = ["Carts"],
    security(("bearerAuth" = [])),
    request_body = AddCartItemReq,
    responses(
        (status = 200, description = "Added item successfully", body = StdResponse<GetCartRes, String>)
    )
)]
async fn add_cart_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<AddCartItemReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    // A line is only ever created from a real catalog row.
    let food: QueryResult<FoodItemEntity> = food_items::table
        .find(body.food_item_id)
        .get_result(conn)
        .await;

    let food = match food {
        Ok(food) => food,
        Err(DieselError::NotFound) => return Err(AppError::NotFound),
        Err(err) => return Err(AppError::Other(err.into())),
    };

    let cart = state.carts.add_item(user.id, CartItem::from(&food));

    Ok(StdResponse {
        data: Some(GetCartRes::from(cart)),
        message: Some("Added item successfully"),
    })
}

#[derive(Deserialize, ToSchema)]
struct UpdateCartItemReq {
    pub quantity: i32,
}

/// Set a line's quantity. A quantity of zero or less removes the line; an
/// item that is not in the cart is left untouched.
#[utoipa::path(
    patch,
    path = "/items/{food_item_id}",
    tags = ["Carts"],
    security(("bearerAuth" = [])),
    params(
        ("food_item_id" = i32, Path, description = "Food item ID to update")
    ),
    request_body = UpdateCartItemReq,
    responses(
        (status = 200, description = "Updated item successfully", body = StdResponse<GetCartRes, String>)
    )
)]
async fn update_cart_item(
    Path(food_item_id): Path<i32>,
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdateCartItemReq>,
) -> Result<impl IntoResponse, AppError> {
    let cart = state.carts.set_quantity(user.id, food_item_id, body.quantity);

    Ok(StdResponse {
        data: Some(GetCartRes::from(cart)),
        message: Some("Updated item successfully"),
    })
}

/// Remove a line from the cart.
#[utoipa::path(
    delete,
    path = "/items/{food_item_id}",
    tags = ["Carts"],
    security(("bearerAuth" = [])),
    params(
        ("food_item_id" = i32, Path, description = "Food item ID to remove")
    ),
    responses(
        (status = 200, description = "Removed item successfully", body = StdResponse<GetCartRes, String>)
    )
)]
async fn remove_cart_item(
    Path(food_item_id): Path<i32>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let cart = state.carts.remove_item(user.id, food_item_id);

    Ok(StdResponse {
        data: Some(GetCartRes::from(cart)),
        message: Some("Removed item successfully"),
    })
}

/// Empty the authenticated user's cart.
#[utoipa::path(
    delete,
    path = "/",
    tags = ["Carts"],
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Cleared cart successfully", body = StdResponse<GetCartRes, String>)
    )
)]
async fn clear_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let cart = state.carts.clear(user.id);

    Ok(StdResponse {
        data: Some(GetCartRes::from(cart)),
        message: Some("Cleared cart successfully"),
    })
}
