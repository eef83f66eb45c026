//! Configuration file parsing for linkbio
//!
//! Supports `.linkbio/config.toml` - project settings

pub mod settings;
pub mod types;

pub use settings::{config_path, init_config_dir, load_settings, save_settings, LINKBIO_DIR};
pub use types::*;
