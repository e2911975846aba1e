use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const STORE_FILE: &str = "gamideck.json";
pub const BACKUPS_DIR: &str = "backups";

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "gamideck", "GamiDeck") {
        pd.data_dir().to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Store file and backups directory under `root`.
pub fn store_files(root: &Path) -> (PathBuf, PathBuf) {
    (root.join(STORE_FILE), root.join(BACKUPS_DIR))
}

pub fn default_store_file() -> (PathBuf, PathBuf) {
    store_files(&data_root())
}
