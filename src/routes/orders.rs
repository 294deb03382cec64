use anyhow::{Context, Result};
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::{ExpressionMethods, QueryDsl, QueryResult, SelectableHelper};
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::checkout::{self, CustomerDetails, OrderLine};
use crate::core::aliases::DieselError;
use crate::core::app_error::{AppError, StdResponse};
use crate::core::app_state::AppState;
use crate::models::{CreateOrderEntity, OrderEntity};
use crate::schema::orders;

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/orders",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(create_order))
            .routes(utoipa_axum::routes!(get_my_orders))
            .routes(utoipa_axum::routes!(get_order)),
    )
}

/// Place an order from the authenticated user's cart.
///
/// Validation failures (blank required contact fields, empty cart) are
/// rejected before anything is written. The cart is only cleared once the
/// order row is committed, so a failed write leaves it intact for a retry.
#[utoipa::path(
    post,
    path = "/",
    tags = ["Orders"],
    security(("bearerAuth" = [])),
    request_body = CustomerDetails,
    responses(
        (status = 200, description = "Created order successfully", body = StdResponse<OrderEntity, String>),
        (status = 400, description = "Missing required fields or empty cart")
    )
)]
async fn create_order(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(details): Json<CustomerDetails>,
) -> Result<impl IntoResponse, AppError> {
    let cart = state.carts.snapshot(user.id);
    checkout::validate_order(&details, cart.lines())?;

    let totals = checkout::compute_totals(cart.lines());
    let lines: Vec<OrderLine> = cart.lines().iter().map(OrderLine::from).collect();
    let items = serde_json::to_value(&lines).context("Failed to serialize order lines")?;

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let order: OrderEntity = diesel::insert_into(orders::table)
        .values(CreateOrderEntity {
            user_id: user.id,
            full_name: details.full_name,
            phone_number: details.phone_number,
            email_address: details.email_address,
            delivery_address: details.delivery_address,
            special_instructions: details.special_instructions,
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            status: "PENDING".into(),
        })
        .returning(OrderEntity::as_returning())
        .get_result(conn)
        .await
        .context("Failed to create order")?;

    state.carts.clear(user.id);
    tracing::info!("Order {} placed by user {}", order.id, user.id);

    Ok(StdResponse {
        data: Some(order),
        message: Some("Created order successfully"),
    })
}

/// Fetch a specific order belonging to the authenticated user, as shown on
/// the confirmation page.
#[utoipa::path(
    get,
    path = "/{id}",
    tags = ["Orders"],
    security(("bearerAuth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID to fetch")
    ),
    responses(
        (status = 200, description = "Get order successfully", body = StdResponse<OrderEntity, String>)
    )
)]
async fn get_order(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let order: QueryResult<OrderEntity> = orders::table
        .find(id)
        .filter(orders::user_id.eq(user.id))
        .get_result(conn)
        .await;

    match order {
        Ok(order) => Ok(StdResponse {
            data: Some(order),
            message: Some("Get order successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

/// Fetch all orders belonging to the authenticated user, newest first.
#[utoipa::path(
    get,
    path = "/my-orders",
    tags = ["Orders"],
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "List my orders", body = StdResponse<Vec<OrderEntity>, String>)
    )
)]
async fn get_my_orders(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let orders: Vec<OrderEntity> = orders::table
        .filter(orders::user_id.eq(user.id))
        .order_by(orders::created_at.desc())
        .get_results(conn)
        .await
        .context("Failed to get my orders")?;

    Ok(StdResponse {
        data: Some(orders),
        message: Some("Get my orders successfully"),
    })
}
