use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, instrument};

use super::open_workspace;
use crate::db::{Content, Website};

/// Seed data file: `{ "contents": [...], "websites": [...] }`
#[derive(Debug, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(default)]
    pub websites: Vec<Website>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub contents: usize,
    pub websites: usize,
}

/// Load a fixtures file into the workspace. One bad record aborts the whole import.
#[instrument(skip_all, fields(file = %file.display()))]
pub fn run_import(workspace: &Path, file: &Path) -> Result<ImportStats> {
    let db = open_workspace(workspace)?;

    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let fixtures: Fixtures = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let stats = db.in_transaction(|db| {
        for content in &fixtures.contents {
            db.insert_content(content)?;
        }
        for website in &fixtures.websites {
            db.insert_website(website)?;
        }
        Ok(ImportStats {
            contents: fixtures.contents.len(),
            websites: fixtures.websites.len(),
        })
    })?;

    info!(contents = stats.contents, websites = stats.websites, "import complete");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{run_init, DB_FILENAME};
    use crate::db::Database;
    use tempfile::TempDir;

    const FIXTURES: &str = r#"{
        "contents": [
            {"id": "1", "title": "SEO Guide", "status": "draft", "content_type": "article",
             "source_type": "manual", "categories": ["SEO"], "language": "en",
             "word_count": 1500, "seo_score": 85, "created_at": "2024-01-15"}
        ],
        "websites": [
            {"id": "w1", "name": "Tech Blog", "url": "https://tech.example.com",
             "group_id": "g1", "group_name": "Tech", "platform": "wordpress",
             "status": "active", "health_status": "healthy", "created_at": "2024-01-01"}
        ]
    }"#;

    #[test]
    fn test_import_fixtures() {
        let temp = TempDir::new().unwrap();
        run_init(temp.path()).unwrap();
        let file = temp.path().join("seed.json");
        fs::write(&file, FIXTURES).unwrap();

        let stats = run_import(temp.path(), &file).unwrap();

        assert_eq!(stats, ImportStats { contents: 1, websites: 1 });
        let db = Database::open(&temp.path().join(DB_FILENAME)).unwrap();
        assert_eq!(db.get_all_contents().unwrap()[0].categories, vec!["SEO"]);
    }

    #[test]
    fn test_import_with_invalid_record_inserts_nothing() {
        let temp = TempDir::new().unwrap();
        run_init(temp.path()).unwrap();
        let file = temp.path().join("seed.json");
        let bad = FIXTURES.replace("\"wordpress\"", "\"ghost\"");
        fs::write(&file, bad).unwrap();

        assert!(run_import(temp.path(), &file).is_err());

        let db = Database::open(&temp.path().join(DB_FILENAME)).unwrap();
        assert_eq!(db.count_contents().unwrap(), 0);
        assert_eq!(db.count_websites().unwrap(), 0);
    }

    #[test]
    fn test_import_missing_sections_default_to_empty() {
        let temp = TempDir::new().unwrap();
        run_init(temp.path()).unwrap();
        let file = temp.path().join("seed.json");
        fs::write(&file, "{}").unwrap();

        let stats = run_import(temp.path(), &file).unwrap();
        assert_eq!(stats, ImportStats::default());
    }

    #[test]
    fn test_import_requires_init() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("seed.json");
        fs::write(&file, FIXTURES).unwrap();

        assert!(run_import(temp.path(), &file).is_err());
    }
}
