//! Configuration loading, application, and validation.
mod apply;
mod loader;
mod settings;
pub mod types;


pub use apply::apply_config;
pub use loader::{load_config, load_config_file};
pub use settings::{PingSettings, validate_base_url};
