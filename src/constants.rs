/// Lifetime of an issued bearer token in seconds (1 hour)
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Maximum number of platforms returned by the recommendations endpoint
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Minimum accepted password length at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Role assigned to every newly registered user
pub const DEFAULT_ROLE: &str = "user";

/// Maximum accepted JSON request body (100KB)
pub const MAX_BODY_BYTES: usize = 102_400;

/// Work factors bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Limiter key used when the peer address is unknown
pub const SHARED_LIMITER_KEY: &str = "global";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_NAME_REQUIRED: &str = "Name is required";

pub const ERR_INVALID_EMAIL: &str = "Please include a valid email";

pub const ERR_PASSWORD_TOO_SHORT: &str = "Please enter a password with 6 or more characters";

pub const ERR_PASSWORD_REQUIRED: &str = "Password is required";

pub const ERR_PLATFORM_NAME_REQUIRED: &str = "Platform name is required";

/// Shared by "unknown email" and "wrong password" so callers cannot enumerate accounts
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";

pub const ERR_NO_TOKEN: &str = "No token, authorization denied";

pub const ERR_INVALID_TOKEN: &str = "Token is not valid";

pub const ERR_PLATFORM_NOT_FOUND: &str = "Platform not found";

pub const ERR_RATE_LIMITED: &str = "Too many requests, please try again later";

pub const ERR_INTERNAL: &str = "Server error";
