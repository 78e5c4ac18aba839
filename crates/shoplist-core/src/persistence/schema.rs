//! SQLite schema for item storage

/// Schema version for migrations
pub const SCHEMA_VERSION: u32 = 1;

/// SQLite schema definition
pub struct Schema;

impl Schema {
    /// Get the complete schema SQL
    pub fn create_tables() -> &'static str {
        r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Items table
CREATE TABLE IF NOT EXISTS items (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    purchased INTEGER NOT NULL DEFAULT 0,
    user_email TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_items_owner_status ON items(user_email, purchased);
CREATE INDEX IF NOT EXISTS idx_items_category ON items(category);
"#
    }

    /// Get migration SQL for a specific version
    pub fn migration(from_version: u32, to_version: u32) -> Option<&'static str> {
        match (from_version, to_version) {
            // Add migrations here as the schema evolves
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_sql_valid() {
        let sql = Schema::create_tables();
        assert!(sql.contains("CREATE TABLE"));
        assert!(sql.contains("items"));
    }
}
