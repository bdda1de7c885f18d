use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ERR_PLATFORM_NAME_REQUIRED, MAX_RECOMMENDATIONS};
use crate::db::platforms::{find_platform, insert_platform, recommend_platforms, search_platforms};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::platform::deserialize_rate;
use crate::models::Platform;
use crate::routes::validation::{
    Constraints, FieldViolation, PathParams, QueryParams, Validate, ValidatedJson,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlatformRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub niches: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_rate")]
    pub commission_rate: String,
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub join_steps: Vec<String>,
}

impl Validate for CreatePlatformRequest {
    fn violations(&self) -> Vec<FieldViolation> {
        Constraints::new()
            .non_empty("name", &self.name, ERR_PLATFORM_NAME_REQUIRED)
            .finish()
    }
}

impl From<CreatePlatformRequest> for Platform {
    fn from(req: CreatePlatformRequest) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: req.name,
            description: req.description,
            niches: req.niches,
            commission_rate: req.commission_rate,
            api_url: req.api_url,
            join_steps: req.join_steps,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePlatformResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub niche: Option<String>,
}

/// Create a platform (bearer token required)
///
/// Stored as submitted: no ownership or duplicate checks.
pub async fn create_platform(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreatePlatformRequest>,
) -> Result<(StatusCode, Json<CreatePlatformResponse>)> {
    let platform = Platform::from(payload);
    let id = platform.id.clone();
    let db = state.db.clone();

    tokio::task::spawn_blocking(move || insert_platform(&db, &platform)).await??;

    tracing::info!("Platform {} created by user {} ({})", id, auth.id, auth.role);

    Ok((
        StatusCode::CREATED,
        Json(CreatePlatformResponse {
            success: true,
            message: "Platform created successfully".to_string(),
            id,
        }),
    ))
}

/// List platforms, optionally filtered by `?search=` against name or niches
pub async fn list_platforms(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<Vec<Platform>>> {
    let db = state.db.clone();

    let platforms =
        tokio::task::spawn_blocking(move || search_platforms(&db, params.search.as_deref()))
            .await??;

    Ok(Json(platforms))
}

/// Top platforms by commission rate, optionally within `?niche=`
pub async fn recommendations(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<RecommendationParams>,
) -> Result<Json<Vec<Platform>>> {
    let db = state.db.clone();

    let platforms = tokio::task::spawn_blocking(move || {
        recommend_platforms(&db, params.niche.as_deref(), MAX_RECOMMENDATIONS)
    })
    .await??;

    Ok(Json(platforms))
}

/// Ordered enrollment steps for one platform
pub async fn join_steps(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<Vec<String>>> {
    let db = state.db.clone();

    let platform = tokio::task::spawn_blocking(move || find_platform(&db, &id))
        .await??
        .ok_or(AppError::PlatformNotFound)?;

    Ok(Json(platform.join_steps))
}
