use axum::{extract::State, Json};
use redb::Database;
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_INVALID_EMAIL, ERR_PASSWORD_REQUIRED};
use crate::db::users::find_user_by_email;
use crate::error::{AppError, Result};
use crate::models::user::normalize_email;
use crate::models::User;
use crate::routes::validation::{Constraints, FieldViolation, Validate, ValidatedJson};
use crate::security::{issue_token, verify_decoy_password, verify_password, Claims};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn violations(&self) -> Vec<FieldViolation> {
        Constraints::new()
            .email("email", &self.email, ERR_INVALID_EMAIL)
            .non_empty("password", &self.password, ERR_PASSWORD_REQUIRED)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// Exchange email + password for a one-hour bearer token
///
/// Unknown email and wrong password produce the same `InvalidCredentials`
/// error so the response does not reveal which accounts exist.
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let db = state.db.clone();
    let cost = state.config.bcrypt_cost;

    let user = tokio::task::spawn_blocking(move || {
        authenticate(&db, &payload.email, &payload.password, cost)
    })
    .await??;

    let claims = Claims::new(user.id.as_str(), user.role.as_str());
    let token = issue_token(&claims, &state.config.jwt_secret).map_err(AppError::TokenIssue)?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

/// Check credentials; CPU-bound, call from `spawn_blocking`
///
/// An unknown email still pays for one bcrypt verification.
fn authenticate(db: &Database, email: &str, password: &str, cost: u32) -> Result<User> {
    let Some(user) = find_user_by_email(db, &normalize_email(email))? else {
        verify_decoy_password(password, cost);
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}
