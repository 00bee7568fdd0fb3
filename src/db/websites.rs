use anyhow::{bail, Context, Result};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use super::Database;
use crate::listing::{Dimension, Record};

/// A connected publishing website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Website {
    pub id: String,
    pub name: String,
    pub url: String,
    pub group_id: String,
    pub group_name: String,
    pub platform: String,
    pub status: String,
    pub health_status: String,
    #[serde(default)]
    pub health_score: i64,
    /// Percentage
    #[serde(default)]
    pub uptime: f64,
    #[serde(default, alias = "response_time")]
    pub response_time_ms: i64,
    #[serde(default)]
    pub total_posts: i64,
    #[serde(default)]
    pub failed_posts: i64,
    pub created_at: String,
}

impl Record for Website {
    const DIMENSIONS: &'static [Dimension] = &[
        // Groups are user-defined, so their values come from the data
        Dimension { key: "group", label: "Group", values: &[] },
        Dimension {
            key: "platform",
            label: "Platform",
            values: &["wordpress", "blogger", "joomla", "custom"],
        },
        Dimension {
            key: "status",
            label: "Status",
            values: &["active", "inactive", "error"],
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "group" => Some(&self.group_id),
            "platform" => Some(&self.platform),
            "status" => Some(&self.status),
            _ => None,
        }
    }

    /// Name or URL
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.url]
    }

    /// Groups filter on the id but display the group name
    fn field_label(&self, key: &str) -> Option<String> {
        match key {
            "group" if !self.group_name.is_empty() => Some(self.group_name.clone()),
            _ => self.field(key).map(|value| Self::describe_value(key, value)),
        }
    }

    fn describe_value(key: &str, value: &str) -> String {
        let label = match (key, value) {
            ("platform", "wordpress") => "WordPress",
            ("platform", "blogger") => "Blogger",
            ("platform", "joomla") => "Joomla",
            ("platform", "custom") => "Custom",
            ("status", "active") => "Active",
            ("status", "inactive") => "Inactive",
            ("status", "error") => "Error",
            _ => value,
        };
        label.to_string()
    }
}

const WEBSITE_COLUMNS: &str = "id, name, url, group_id, group_name, platform, status, health_status,
     health_score, uptime, response_time_ms, total_posts, failed_posts, created_at";

fn website_from_row(row: &Row) -> rusqlite::Result<Website> {
    Ok(Website {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        group_id: row.get(3)?,
        group_name: row.get(4)?,
        platform: row.get(5)?,
        status: row.get(6)?,
        health_status: row.get(7)?,
        health_score: row.get(8)?,
        uptime: row.get(9)?,
        response_time_ms: row.get(10)?,
        total_posts: row.get(11)?,
        failed_posts: row.get(12)?,
        created_at: row.get(13)?,
    })
}

impl Database {
    /// Insert a website
    pub fn insert_website(&self, website: &Website) -> Result<()> {
        self.connection()
            .execute(
                &format!(
                    "INSERT INTO websites ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                    WEBSITE_COLUMNS
                ),
                params![
                    website.id,
                    website.name,
                    website.url,
                    website.group_id,
                    website.group_name,
                    website.platform,
                    website.status,
                    website.health_status,
                    website.health_score,
                    website.uptime,
                    website.response_time_ms,
                    website.total_posts,
                    website.failed_posts,
                    website.created_at,
                ],
            )
            .with_context(|| format!("Failed to insert website '{}'", website.id))?;
        Ok(())
    }

    /// Get all websites in insertion order
    pub fn get_all_websites(&self) -> Result<Vec<Website>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {} FROM websites ORDER BY rowid",
            WEBSITE_COLUMNS
        ))?;

        let rows = stmt.query_map([], website_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn count_websites(&self) -> Result<i64> {
        let count = self
            .connection()
            .query_row("SELECT COUNT(*) FROM websites", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Activate, deactivate or flag a website. Fails if the id does not exist.
    pub fn set_website_status(&self, id: &str, status: &str) -> Result<()> {
        let changed = self
            .connection()
            .execute(
                "UPDATE websites SET status = ?1 WHERE id = ?2",
                params![status, id],
            )
            .with_context(|| format!("Failed to set status '{}' on website '{}'", status, id))?;
        if changed == 0 {
            bail!("Website '{}' not found", id);
        }
        Ok(())
    }

    /// Disconnect a website. Fails if the id does not exist.
    pub fn delete_website(&self, id: &str) -> Result<()> {
        let changed = self
            .connection()
            .execute("DELETE FROM websites WHERE id = ?1", [id])?;
        if changed == 0 {
            bail!("Website '{}' not found", id);
        }
        Ok(())
    }
}
