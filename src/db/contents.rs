use anyhow::{bail, Context, Result};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use super::Database;
use crate::listing::{Dimension, Record};

/// A content item (article, video or infographic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    pub title: String,
    pub status: String,
    pub content_type: String,
    pub source_type: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub language: String,
    #[serde(default)]
    pub word_count: i64,
    #[serde(default)]
    pub seo_score: i64,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl Record for Content {
    const DIMENSIONS: &'static [Dimension] = &[
        Dimension {
            key: "status",
            label: "Status",
            values: &["draft", "ready", "published", "archived"],
        },
        Dimension {
            key: "type",
            label: "Type",
            values: &["article", "video", "infographic"],
        },
        Dimension {
            key: "source",
            label: "Source",
            values: &["manual", "file", "rss", "url", "ai"],
        },
        Dimension {
            key: "language",
            label: "Language",
            values: &["vi", "en", "ja", "ko", "zh"],
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "status" => Some(&self.status),
            "type" => Some(&self.content_type),
            "source" => Some(&self.source_type),
            "language" => Some(&self.language),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title]
    }

    fn describe_value(key: &str, value: &str) -> String {
        let label = match (key, value) {
            ("status", "draft") => "Draft",
            ("status", "ready") => "Ready",
            ("status", "published") => "Published",
            ("status", "archived") => "Archived",
            ("type", "article") => "Article",
            ("type", "video") => "Video",
            ("type", "infographic") => "Infographic",
            ("source", "manual") => "Manual",
            ("source", "file") => "File",
            ("source", "rss") => "RSS",
            ("source", "url") => "URL",
            ("source", "ai") => "AI",
            ("language", "vi") => "Vietnamese",
            ("language", "en") => "English",
            ("language", "ja") => "Japanese",
            ("language", "ko") => "Korean",
            ("language", "zh") => "Chinese",
            _ => value,
        };
        label.to_string()
    }
}

const CONTENT_COLUMNS: &str = "id, title, status, content_type, source_type, categories, language,
     word_count, seo_score, created_at, published_at";

fn content_from_row(row: &Row) -> rusqlite::Result<Content> {
    let categories: String = row.get(5)?;
    Ok(Content {
        id: row.get(0)?,
        title: row.get(1)?,
        status: row.get(2)?,
        content_type: row.get(3)?,
        source_type: row.get(4)?,
        categories: serde_json::from_str(&categories).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?,
        language: row.get(6)?,
        word_count: row.get(7)?,
        seo_score: row.get(8)?,
        created_at: row.get(9)?,
        published_at: row.get(10)?,
    })
}

impl Database {
    /// Insert a content item
    pub fn insert_content(&self, content: &Content) -> Result<()> {
        let categories = serde_json::to_string(&content.categories)?;
        self.connection()
            .execute(
                &format!(
                    "INSERT INTO contents ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    CONTENT_COLUMNS
                ),
                params![
                    content.id,
                    content.title,
                    content.status,
                    content.content_type,
                    content.source_type,
                    categories,
                    content.language,
                    content.word_count,
                    content.seo_score,
                    content.created_at,
                    content.published_at,
                ],
            )
            .with_context(|| format!("Failed to insert content '{}'", content.id))?;
        Ok(())
    }

    /// Get all content items in insertion order
    pub fn get_all_contents(&self) -> Result<Vec<Content>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {} FROM contents ORDER BY rowid",
            CONTENT_COLUMNS
        ))?;

        let rows = stmt.query_map([], content_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn count_contents(&self) -> Result<i64> {
        let count = self
            .connection()
            .query_row("SELECT COUNT(*) FROM contents", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Update a content item's status. Fails if the id does not exist.
    pub fn set_content_status(&self, id: &str, status: &str) -> Result<()> {
        let changed = self
            .connection()
            .execute(
                "UPDATE contents SET status = ?1 WHERE id = ?2",
                params![status, id],
            )
            .with_context(|| format!("Failed to set status '{}' on content '{}'", status, id))?;
        if changed == 0 {
            bail!("Content '{}' not found", id);
        }
        Ok(())
    }

    /// Delete a content item. Fails if the id does not exist.
    pub fn delete_content(&self, id: &str) -> Result<()> {
        let changed = self
            .connection()
            .execute("DELETE FROM contents WHERE id = ?1", [id])?;
        if changed == 0 {
            bail!("Content '{}' not found", id);
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::Content;

    pub fn content(id: &str, title: &str, status: &str, content_type: &str) -> Content {
        Content {
            id: id.to_string(),
            title: title.to_string(),
            status: status.to_string(),
            content_type: content_type.to_string(),
            source_type: "manual".to_string(),
            categories: vec!["Marketing".to_string()],
            language: "en".to_string(),
            word_count: 1200,
            seo_score: 80,
            created_at: "2024-01-15".to_string(),
            published_at: None,
        }
    }
}
