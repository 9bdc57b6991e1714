//! Config module.
//! Provides configuration types, default paths, XML loading, root resolution and validation.

pub mod paths;
pub mod resolve;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use resolve::{ROOT_ENV, RootCandidate, RootSetting, TargetRoot, classify, resolve_root};
pub use types::{Config, LogLevel};
pub use validate::prepare_root;
pub use xml::{LoadResult, create_template_config, load_config_from_xml_path, load_or_init};
