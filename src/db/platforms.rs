//! Catalog store: platform documents and the queries over them.

use redb::{Database, ReadableTable};

use crate::db::tables;
use crate::error::Result;
use crate::models::platform::{sort_by_commission_desc, Platform};

/// Persist a platform (no ownership or duplicate checks)
pub fn insert_platform(db: &Database, platform: &Platform) -> Result<()> {
    let doc = serde_json::to_vec(platform)?;

    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(tables::PLATFORMS)?;
        table.insert(platform.id.as_str(), doc.as_slice())?;
    }
    write_txn.commit()?;

    Ok(())
}

/// Fetch one platform by id
pub fn find_platform(db: &Database, id: &str) -> Result<Option<Platform>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::PLATFORMS)?;

    let platform = table
        .get(id)?
        .map(|doc| serde_json::from_slice(doc.value()))
        .transpose()?;

    Ok(platform)
}

/// All platforms in insertion order
pub fn all_platforms(db: &Database) -> Result<Vec<Platform>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::PLATFORMS)?;

    let mut platforms = Vec::new();
    for entry in table.iter()? {
        let (_, doc) = entry?;
        platforms.push(serde_json::from_slice(doc.value())?);
    }

    Ok(platforms)
}

/// Platforms whose name or any niche contains `term`, ignoring case
///
/// A missing or blank term matches everything. No result limit.
pub fn search_platforms(db: &Database, term: Option<&str>) -> Result<Vec<Platform>> {
    let platforms = all_platforms(db)?;

    let needle = match normalized_needle(term) {
        Some(needle) => needle,
        None => return Ok(platforms),
    };

    Ok(platforms
        .into_iter()
        .filter(|p| p.matches_search(&needle))
        .collect())
}

/// Up to `limit` platforms, optionally restricted to a niche, highest commission first
pub fn recommend_platforms(
    db: &Database,
    niche: Option<&str>,
    limit: usize,
) -> Result<Vec<Platform>> {
    let mut platforms = all_platforms(db)?;

    if let Some(needle) = normalized_needle(niche) {
        platforms.retain(|p| p.has_niche(&needle));
    }

    sort_by_commission_desc(&mut platforms);
    platforms.truncate(limit);

    Ok(platforms)
}

fn normalized_needle(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}
