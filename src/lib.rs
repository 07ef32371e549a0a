pub mod assistant_core;
pub mod config;
mod frontend;

pub use config::Config;
pub use frontend::{build_resolver, start_server};
