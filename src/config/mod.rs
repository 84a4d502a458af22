//! Config module.
//! Provides configuration types, default paths and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path};
pub use types::{Config, LogLevel};
pub use xml::{LoadResult, create_template_config, load_config_from_xml_path, load_or_init};

/// Environment variable naming an explicit config file (or a directory holding `config.xml`).
pub const CONFIG_ENV: &str = "FILESTAMP_CONFIG";
