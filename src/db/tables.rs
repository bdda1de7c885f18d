use redb::TableDefinition;

/// Users table: user id -> User document (JSON)
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Email index: normalized email -> user id
/// Enforces email uniqueness inside the registering write transaction
pub const USER_EMAILS: TableDefinition<&str, &str> = TableDefinition::new("user_emails");

/// Platforms table: platform id (UUID v7, insertion ordered) -> Platform document (JSON)
pub const PLATFORMS: TableDefinition<&str, &[u8]> = TableDefinition::new("platforms");

/// Affiliate links table: link id -> AffiliateLink document (JSON)
pub const AFFILIATE_LINKS: TableDefinition<&str, &[u8]> = TableDefinition::new("affiliate_links");

/// Performance metrics table: metric id -> PerformanceMetric document (JSON)
pub const PERFORMANCE_METRICS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("performance_metrics");
