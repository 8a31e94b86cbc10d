use std::path::{Path, PathBuf};

use autoflow_core::store::DB_FILE;

/// Bundled default pipeline, relative to the process working directory.
pub const DEFAULT_PIPELINE_FILE: &str = "configs/concesionarias.json";

pub fn autoflow_root(home: &Path) -> PathBuf {
    home.join(".autoflow")
}

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

/// Default data directory: `<home>/.autoflow/`.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| autoflow_root(&home))
}
