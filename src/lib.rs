pub mod app;
pub mod challenge;
pub mod errors;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod storage;
pub mod streak;
pub mod ui;
pub mod state;

pub use app::router;
pub use heatmap::build_layout;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
