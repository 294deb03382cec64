use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::auth::AuthService;
use crate::core::app_error::AppError;
use crate::core::app_state::AppState;

/// The authenticated caller, extracted from the bearer token. Use this in
/// handlers that must be scoped to a signed-in user.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse an extraction done earlier in the same request.
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

        let token = AuthService::extract_from_header(auth_header)
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".into()))?;

        let claims = state.auth.verify_token(token)?;
        let user = CurrentUser {
            id: claims.sub,
            email: claims.email,
        };
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
