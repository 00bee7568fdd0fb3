pub mod cli;
pub mod db;
pub mod listing;
pub mod logging;
pub mod tui;
