use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Database wrapper for pressdesk
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Create in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS contents (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('draft', 'ready', 'published', 'archived')),
                content_type TEXT NOT NULL CHECK (content_type IN ('article', 'video', 'infographic')),
                source_type TEXT NOT NULL CHECK (source_type IN ('manual', 'file', 'rss', 'url', 'ai')),
                categories TEXT NOT NULL DEFAULT '[]',
                language TEXT NOT NULL,
                word_count INTEGER NOT NULL DEFAULT 0 CHECK (word_count >= 0),
                seo_score INTEGER NOT NULL DEFAULT 0 CHECK (seo_score >= 0 AND seo_score <= 100),
                created_at TEXT NOT NULL,
                published_at TEXT
            );

            CREATE TABLE IF NOT EXISTS websites (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                group_id TEXT NOT NULL,
                group_name TEXT NOT NULL,
                platform TEXT NOT NULL CHECK (platform IN ('wordpress', 'blogger', 'joomla', 'custom')),
                status TEXT NOT NULL CHECK (status IN ('active', 'inactive', 'error')),
                health_status TEXT NOT NULL CHECK (health_status IN ('healthy', 'warning', 'critical')),
                health_score INTEGER NOT NULL DEFAULT 0 CHECK (health_score >= 0 AND health_score <= 100),
                uptime REAL NOT NULL DEFAULT 0,
                response_time_ms INTEGER NOT NULL DEFAULT 0,
                total_posts INTEGER NOT NULL DEFAULT 0,
                failed_posts INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_contents_status ON contents(status);
            CREATE INDEX IF NOT EXISTS idx_websites_group ON websites(group_id);
            "#,
        )?;
        Ok(())
    }

    /// Get a reference to the underlying connection (for testing)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction for bulk operations
    pub fn begin_transaction(&self) -> Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    /// Commit the current transaction
    pub fn commit(&self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    /// Rollback the current transaction
    pub fn rollback(&self) -> Result<()> {
        self.conn.execute("ROLLBACK", [])?;
        Ok(())
    }

    /// Run `f` inside a transaction. Any error rolls back everything `f` did.
    pub fn in_transaction<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        self.begin_transaction()?;
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(err) => {
                debug!(error = %err, "rolling back transaction");
                self.rollback()?;
                Err(err)
            }
        }
    }
}
