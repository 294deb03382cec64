use anyhow::{Context, Result};
use axum::{Json, extract::State, response::IntoResponse};
use diesel::SelectableHelper;
use diesel_async::RunQueryDsl;
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use crate::auth::CurrentUser;
use crate::core::app_error::{AppError, StdResponse};
use crate::core::app_state::AppState;
use crate::models::{CreateInquiryEntity, InquiryEntity};
use crate::schema::inquiries;

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/inquiries",
        OpenApiRouter::new().routes(utoipa_axum::routes!(create_inquiry)),
    )
}

#[derive(Deserialize, ToSchema)]
struct CreateInquiryReq {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Submit a contact-form inquiry. All fields are required; validation
/// failures are rejected before anything is written.
#[utoipa::path(
    post,
    path = "/",
    tags = ["Inquiries"],
    security(("bearerAuth" = [])),
    request_body = CreateInquiryReq,
    responses(
        (status = 200, description = "Created inquiry successfully", body = StdResponse<InquiryEntity, String>),
        (status = 400, description = "Missing required fields")
    )
)]
async fn create_inquiry(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateInquiryReq>,
) -> Result<impl IntoResponse, AppError> {
    let required = [
        ("name", &body.name),
        ("email", &body.email),
        ("message", &body.message),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let inquiry: InquiryEntity = diesel::insert_into(inquiries::table)
        .values(CreateInquiryEntity {
            user_id: user.id,
            name: body.name,
            email: body.email,
            message: body.message,
            status: "NEW".into(),
        })
        .returning(InquiryEntity::as_returning())
        .get_result(conn)
        .await
        .context("Failed to create inquiry")?;

    Ok(StdResponse {
        data: Some(inquiry),
        message: Some("Created inquiry successfully"),
    })
}
