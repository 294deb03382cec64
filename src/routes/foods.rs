use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use diesel::{QueryDsl, QueryResult};
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;

use crate::catalog::{self, CatalogQuery};
use crate::core::aliases::DieselError;
use crate::core::app_error::{AppError, StdResponse};
use crate::core::app_state::AppState;
use crate::models::FoodItemEntity;
use crate::schema::food_items;

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/foods",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_foods))
            .routes(utoipa_axum::routes!(get_food)),
    )
}

/// List menu items, filtered and sorted by the caller's controls.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Foods"],
    params(CatalogQuery),
    responses(
        (status = 200, description = "List matching food items", body = StdResponse<Vec<FoodItemEntity>, String>)
    )
)]
async fn get_foods(
    Query(query): Query<CatalogQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let foods: Vec<FoodItemEntity> = food_items::table
        .get_results(conn)
        .await
        .context("Failed to get food items")?;

    let foods = catalog::filter_and_sort(foods, &query);

    Ok(StdResponse {
        data: Some(foods),
        message: Some("Get foods successfully"),
    })
}

/// Fetch a single menu item.
#[utoipa::path(
    get,
    path = "/{id}",
    tags = ["Foods"],
    params(
        ("id" = i32, Path, description = "Food item ID to fetch")
    ),
    responses(
        (status = 200, description = "Get food item successfully", body = StdResponse<FoodItemEntity, String>)
    )
)]
async fn get_food(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let food: QueryResult<FoodItemEntity> = food_items::table.find(id).get_result(conn).await;

    match food {
        Ok(food) => Ok(StdResponse {
            data: Some(food),
            message: Some("Get food successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}
