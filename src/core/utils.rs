use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".finsight";
const LEDGER_FILE: &str = "transactions.csv";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.finsight`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FINSIGHT_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Absolute path to the transaction ledger file.
pub fn ledger_file() -> PathBuf {
    app_data_dir().join(LEDGER_FILE)
}

/// Path to the configuration file inside a given base directory.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
