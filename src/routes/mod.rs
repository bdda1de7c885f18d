pub mod health;
pub mod login;
pub mod platforms;
pub mod register;
pub mod validation;

pub use health::health_check;
pub use login::login_user;
pub use platforms::{create_platform, join_steps, list_platforms, recommendations};
pub use register::register_user;
pub use validation::{FieldViolation, PathParams, QueryParams, Validate, ValidatedJson};
