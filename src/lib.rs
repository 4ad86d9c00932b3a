pub mod answer;
pub mod citations;
pub mod compose;
pub mod config;
pub mod models;
pub mod render;
pub mod sanitize;
pub mod server;
pub mod upstream;

pub use config::AppConfig;
pub use server::run_server;
