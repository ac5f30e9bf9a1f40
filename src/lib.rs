pub mod app;
pub mod config;
pub mod day;
pub mod display;
pub mod errors;
pub mod handlers;
pub mod keywords;
pub mod models;
pub mod pipeline;
pub mod state;
pub mod stats;
pub mod store;
pub mod submit;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
