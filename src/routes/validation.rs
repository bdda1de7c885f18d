use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppError;
use crate::models::user::is_valid_email;

/// One failed constraint on one request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Per-route input constraints, checked before the handler runs
pub trait Validate {
    /// Every violated constraint; empty when the input is acceptable
    fn violations(&self) -> Vec<FieldViolation>;
}

/// Collects violations across all fields instead of stopping at the first
#[derive(Debug, Default)]
pub struct Constraints {
    violations: Vec<FieldViolation>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn non_empty(mut self, field: &str, value: &str, message: &str) -> Self {
        if value.trim().is_empty() {
            self.violations.push(FieldViolation::new(field, message));
        }
        self
    }

    pub fn email(mut self, field: &str, value: &str, message: &str) -> Self {
        if !is_valid_email(value) {
            self.violations.push(FieldViolation::new(field, message));
        }
        self
    }

    /// Length in characters, not bytes
    pub fn min_len(mut self, field: &str, value: &str, min: usize, message: &str) -> Self {
        if value.chars().count() < min {
            self.violations.push(FieldViolation::new(field, message));
        }
        self
    }

    pub fn finish(self) -> Vec<FieldViolation> {
        self.violations
    }
}

/// JSON body extractor that rejects input failing `Validate`
///
/// The handler body never runs for a rejected request.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        let violations = value.violations();
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        Ok(Self(value))
    }
}

/// Query string extractor whose failures render as `AppError`
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}

/// Path parameter extractor whose failures render as `AppError`
#[derive(Debug)]
pub struct PathParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| AppError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_aggregate() {
        let violations = Constraints::new()
            .non_empty("name", " ", "Name is required")
            .email("email", "nope", "Please include a valid email")
            .min_len("password", "abc", 6, "Password too short")
            .finish();

        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, ["name", "email", "password"]);
    }

    #[test]
    fn test_constraints_pass() {
        let violations = Constraints::new()
            .non_empty("name", "A", "Name is required")
            .email("email", "a@x.com", "Please include a valid email")
            .min_len("password", "secret1", 6, "Password too short")
            .finish();

        assert!(violations.is_empty());
    }

    #[test]
    fn test_min_len_counts_characters() {
        // Six characters, thirteen bytes
        let violations = Constraints::new()
            .min_len("password", "ééééé€", 6, "Password too short")
            .finish();

        assert!(violations.is_empty());
    }
}
