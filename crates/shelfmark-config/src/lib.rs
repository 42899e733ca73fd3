pub mod config;
pub mod paths;

pub use config::{default_column_mapping, default_date_format, ColumnMapping, Config, ImportConfig};
pub use paths::PathManager;
