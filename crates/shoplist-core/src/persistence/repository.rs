//! Repository for CRUD operations on shopping-list items

use std::path::Path;

use uuid::Uuid;

use super::schema::{Schema, SCHEMA_VERSION};
use crate::error::{Result, StoreError};
use crate::item::{CategoryCount, Item};

/// Repository for persisting items
pub struct Repository {
    conn: rusqlite::Connection,
}

impl Repository {
    /// Create a new repository with the given database path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = rusqlite::Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Create an in-memory repository (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Initialize the database schema
    fn initialize(&self) -> Result<()> {
        let current_version = self.get_schema_version().unwrap_or(0);

        if current_version == 0 {
            // Fresh database, create all tables
            self.conn.execute_batch(Schema::create_tables())?;
            self.set_schema_version(SCHEMA_VERSION)?;
        } else if current_version < SCHEMA_VERSION {
            for version in current_version..SCHEMA_VERSION {
                if let Some(migration) = Schema::migration(version, version + 1) {
                    self.conn.execute_batch(migration)?;
                }
            }
            self.set_schema_version(SCHEMA_VERSION)?;
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Option<u32> {
        self.conn
            .query_row(
                "SELECT version FROM schema_version ORDER BY applied_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .ok()
    }

    fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
        Ok(())
    }

    // ==================== Item Operations ====================

    /// Insert a newly created item
    pub fn create_item(&self, item: &Item) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO items (id, name, category, purchased, user_email)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            rusqlite::params![
                item.id.to_string(),
                item.name,
                item.category,
                item.purchased,
                item.user_email,
            ],
        )?;

        Ok(())
    }

    /// Get an item by id
    pub fn get_item(&self, id: &Uuid) -> Result<Option<Item>> {
        let result = self.conn.query_row(
            "SELECT id, name, category, purchased, user_email FROM items WHERE id = ?1",
            [id.to_string()],
            Self::row_to_item,
        );

        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::from(e)),
        }
    }

    /// Get all items of an owner with the given purchased flag
    pub fn items_by_status(&self, owner: &str, purchased: bool) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category, purchased, user_email FROM items WHERE user_email = ?1 AND purchased = ?2",
        )?;

        let items = stmt
            .query_map(rusqlite::params![owner, purchased], Self::row_to_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Overwrite an item's name and category; the purchased flag and owner
    /// are untouched. Returns false when no row matched.
    pub fn update_item(&self, id: &Uuid, name: &str, category: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE items SET name = ?2, category = ?3 WHERE id = ?1",
            rusqlite::params![id.to_string(), name, category],
        )?;

        Ok(changed > 0)
    }

    /// Set an item's purchased flag to true. Setting it again is a no-op
    /// success. Returns false when no row matched.
    pub fn mark_purchased(&self, id: &Uuid) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE items SET purchased = 1 WHERE id = ?1",
            [id.to_string()],
        )?;

        Ok(changed > 0)
    }

    /// Remove an item permanently. Returns false when no row matched.
    pub fn delete_item(&self, id: &Uuid) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1", [id.to_string()])?;

        Ok(changed > 0)
    }

    /// Count an owner's purchased items per category, most frequent first.
    /// Ties break alphabetically so the ordering is stable.
    pub fn count_by_category(&self, owner: &str) -> Result<Vec<CategoryCount>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT category, COUNT(*) AS count
            FROM items
            WHERE user_email = ?1 AND purchased = 1
            GROUP BY category
            ORDER BY count DESC, category ASC
            "#,
        )?;

        let counts = stmt
            .query_map([owner], |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(counts)
    }

    fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
        let id_str: String = row.get(0)?;

        Ok(Item {
            id: Uuid::parse_str(&id_str).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            name: row.get(1)?,
            category: row.get(2)?,
            purchased: row.get(3)?,
            user_email: row.get(4)?,
        })
    }
}
