use log::*;
use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, prelude::*, SeekFrom};
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();
static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// Settings for the block framework, read from a JSON file.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(default)]
pub struct Config {
    /// Dumps every block type's properties when it is defined, defaults to false.
    pub debug_state: bool,
    /// Only debug output from modules under this path is logged, defaults to "modbase".
    pub log_filter: String,
    /// The directory log files are written to, defaults to "logs".
    pub log_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug_state: false,
            log_filter: "modbase".to_owned(),
            log_directory: PathBuf::from("logs"),
        }
    }
}

/// Installs the process-wide config. Fails, handing the config back, if one is already installed.
pub fn init_config(config: Config) -> Result<(), Config> {
    CONFIG.set(config)
}

/// The installed config, or the defaults if none has been installed.
pub fn config() -> &'static Config {
    CONFIG.get().unwrap_or(&DEFAULT_CONFIG)
}

/// Attempts to parse the config at the given path. A missing or malformed file is replaced with
/// the default config, which is then returned.
pub fn load_config(path: &Path) -> io::Result<Config> {
    if path.exists() {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;

        let mut json = String::new();
        file.read_to_string(&mut json)?;

        match serde_json::from_str(&json) {
            Ok(config) => Ok(config),
            Err(e) => {
                error!("Invalid config JSON: {}", e);
                use_default(&mut file)
            }
        }
    } else {
        info!("Config file not found, creating file");
        use_default(&mut File::create(path)?)
    }
}

fn use_default(file: &mut File) -> io::Result<Config> {
    info!("Using default configurations");

    let default = Config::default();
    let json = serde_json::to_string_pretty(&default)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let bytes = json.as_bytes();

    file.seek(SeekFrom::Start(0))?;
    file.write_all(bytes)?;
    file.set_len(bytes.len() as u64)?;

    Ok(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, process};

    fn scratch_file(name: &str) -> PathBuf {
        env::temp_dir().join(format!("modbase-{}-{}.json", name, process::id()))
    }

    #[test]
    fn partial_config_uses_defaults() {
        let path = scratch_file("partial");
        fs::write(&path, r#"{ "debug_state": true }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.debug_state);
        assert_eq!(config.log_filter, "modbase");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_or_invalid_config_is_replaced() {
        let path = scratch_file("missing");
        let _ = fs::remove_file(&path);

        assert_eq!(load_config(&path).unwrap(), Config::default());
        assert!(path.exists(), "Default config was not written");

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
        let rewritten: Config = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(rewritten, Config::default());

        fs::remove_file(&path).unwrap();
    }
}
