use anyhow::{Context, Result};
use axum::{Json, extract::State, response::IntoResponse};
use diesel::result::DatabaseErrorKind;
use diesel::{ExpressionMethods, QueryDsl, QueryResult, SelectableHelper};
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use crate::auth::{self, CurrentUser};
use crate::core::aliases::DieselError;
use crate::core::app_error::{AppError, StdResponse};
use crate::core::app_state::AppState;
use crate::models::{CreateUserEntity, UserEntity};
use crate::schema::users;

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/auth",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(register))
            .routes(utoipa_axum::routes!(login))
            .routes(utoipa_axum::routes!(me)),
    )
}

#[derive(Deserialize, ToSchema)]
struct CredentialsReq {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
struct UserInfo {
    pub id: i32,
    pub email: String,
}

#[derive(Serialize, ToSchema)]
struct AuthRes {
    pub token: String,
    pub user: UserInfo,
}

fn validate_credentials(body: &CredentialsReq) -> Result<(), AppError> {
    if body.email.trim().is_empty() {
        return Err(AppError::BadRequest("email is required".into()));
    }
    if body.password.len() < 6 {
        return Err(AppError::BadRequest(
            "password must be at least 6 characters".into(),
        ));
    }
    Ok(())
}

/// Create an account and sign the caller in.
#[utoipa::path(
    post,
    path = "/register",
    tags = ["Auth"],
    request_body = CredentialsReq,
    responses(
        (status = 200, description = "Registered successfully", body = StdResponse<AuthRes, String>),
        (status = 400, description = "Invalid credentials or email already registered")
    )
)]
async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsReq>,
) -> Result<impl IntoResponse, AppError> {
    validate_credentials(&body)?;

    let password_hash = auth::hash_password(&body.password)
        .map_err(|err| anyhow::anyhow!("Failed to hash password: {err}"))?;

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let user: QueryResult<UserEntity> = diesel::insert_into(users::table)
        .values(CreateUserEntity {
            email: body.email.trim().to_lowercase(),
            password_hash,
        })
        .returning(UserEntity::as_returning())
        .get_result(conn)
        .await;

    let user = match user {
        Ok(user) => user,
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(AppError::BadRequest("Email already registered".into()));
        }
        Err(err) => return Err(AppError::Other(err.into())),
    };

    let token = state.auth.issue_token(user.id, &user.email)?;
    tracing::info!("Registered user {}", user.id);

    Ok(StdResponse {
        data: Some(AuthRes {
            token,
            user: UserInfo {
                id: user.id,
                email: user.email,
            },
        }),
        message: Some("Registered successfully"),
    })
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    tags = ["Auth"],
    request_body = CredentialsReq,
    responses(
        (status = 200, description = "Signed in successfully", body = StdResponse<AuthRes, String>),
        (status = 401, description = "Invalid email or password")
    )
)]
async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let user: QueryResult<UserEntity> = users::table
        .filter(users::email.eq(body.email.trim().to_lowercase()))
        .get_result(conn)
        .await;

    // The same message either way so a caller cannot probe for accounts.
    let user = match user {
        Ok(user) => user,
        Err(DieselError::NotFound) => {
            return Err(AppError::Unauthorized("Invalid email or password".into()));
        }
        Err(err) => return Err(AppError::Other(err.into())),
    };

    let password_valid = auth::verify_password(&body.password, &user.password_hash)
        .map_err(|err| anyhow::anyhow!("Password verification failed: {err}"))?;
    if !password_valid {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let token = state.auth.issue_token(user.id, &user.email)?;

    Ok(StdResponse {
        data: Some(AuthRes {
            token,
            user: UserInfo {
                id: user.id,
                email: user.email,
            },
        }),
        message: Some("Signed in successfully"),
    })
}

/// Fetch the authenticated user's handle.
#[utoipa::path(
    get,
    path = "/me",
    tags = ["Auth"],
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Current user", body = StdResponse<UserInfo, String>)
    )
)]
async fn me(user: CurrentUser) -> Result<impl IntoResponse, AppError> {
    Ok(StdResponse {
        data: Some(UserInfo {
            id: user.id,
            email: user.email,
        }),
        message: Some("Get current user successfully"),
    })
}
