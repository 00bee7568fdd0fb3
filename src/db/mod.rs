mod contents;
mod mutations;
mod schema;
mod websites;

pub use contents::Content;
pub use mutations::export_records;
pub use schema::Database;
pub use websites::Website;

#[cfg(test)]
pub(crate) use contents::test_fixtures::content;
#[cfg(test)]
pub(crate) use websites::test_fixtures::website;
