use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ERR_INVALID_EMAIL, ERR_NAME_REQUIRED, ERR_PASSWORD_TOO_SHORT, MIN_PASSWORD_LEN,
};
use crate::db::users::insert_user;
use crate::error::Result;
use crate::models::User;
use crate::routes::validation::{Constraints, FieldViolation, Validate, ValidatedJson};
use crate::security::hash_password;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn violations(&self) -> Vec<FieldViolation> {
        Constraints::new()
            .non_empty("name", &self.name, ERR_NAME_REQUIRED)
            .email("email", &self.email, ERR_INVALID_EMAIL)
            .min_len("password", &self.password, MIN_PASSWORD_LEN, ERR_PASSWORD_TOO_SHORT)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// Register a new user
///
/// The password is bcrypt-hashed before storage and never echoed back.
/// A duplicate email surfaces as a generic 500, not a dedicated conflict.
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let db = state.db.clone();
    let cost = state.config.bcrypt_cost;

    let user_id = tokio::task::spawn_blocking(move || -> Result<String> {
        let password_hash = hash_password(&payload.password, cost)?;
        let user = User::new(&payload.name, &payload.email, password_hash);
        insert_user(&db, &user)?;
        Ok(user.id)
    })
    .await??;

    tracing::info!("New user registered: {}", user_id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully".to_string(),
        }),
    ))
}
