mod filter_bar;
mod filter_dialog;
mod list_table;
mod status_bar;

pub use filter_bar::render_filter_bar;
pub use filter_dialog::render_filter_dialog;
pub use list_table::render_list_table;
pub use status_bar::render_status_bar;
