/// Catalog identifiers are MyAnimeList ids, assigned upstream and never
/// generated locally.
pub type MalId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
