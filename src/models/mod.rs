pub mod affiliate_link;
pub mod metric;
pub mod platform;
pub mod rate_limit;
pub mod user;

pub use affiliate_link::AffiliateLink;
pub use metric::PerformanceMetric;
pub use platform::Platform;
pub use rate_limit::{RateLimitWindow, RateLimiter};
pub use user::User;
