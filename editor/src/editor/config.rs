use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use super::options::{EditorOptions, WindowOptions};
use crate::error::EditorError;

pub(crate) const CONFIG_DIR: &str = "hexe";
pub(crate) const CONFIG_FILE: &str = "config.toml";

/// Editor configuration, read from a toml file.
/// Every section and field is optional and falls back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorOptions,
    pub window: WindowOptions,
    pub theme: ThemeOptions,
    /// Key binding overrides per mode name, applied on top of the defaults
    pub keymap: HashMap<String, Vec<Mapping>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Mapping {
    /// Key presses separated by spaces, for example `ctrl+s` or `g g`
    pub key: String,
    /// Action name
    pub action: String,
}

/// Styles of the drawn elements in form `bg,fg,attr[,attr]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeOptions {
    pub default: String,
    pub offset: String,
    pub cursor: String,
    pub edited: String,
    pub statusline: String,
    pub info: String,
    pub error: String,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        ThemeOptions {
            default: String::new(),
            offset: ",#5c6370,".into(),
            cursor: ",,reverse".into(),
            edited: ",#e5c07b,bold".into(),
            statusline: "#3e4451,#abb2bf,".into(),
            info: String::new(),
            error: ",#e06c75,bold".into(),
        }
    }
}

impl Config {
    /// `<config_dir>/hexe/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        Some(path)
    }

    /// Read configuration from `path`, a missing file gives the default
    /// configuration.
    pub fn load(path: &Path) -> Result<Config, EditorError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .build()?;

        let config = config.try_deserialize::<Config>()?;
        log::info!("Read configuration from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(WindowOptions::default(), config.window);
        assert_eq!(1000, config.editor.history_size);
        assert!(config.keymap.is_empty());
    }

    #[test]
    fn partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[window]
bytes_per_row = 8

[[keymap.normal]]
key = "ctrl+s"
action = "save"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(8, config.window.bytes_per_row);
        assert_eq!(1, config.window.group_size);
        assert_eq!(
            vec![Mapping {
                key: "ctrl+s".into(),
                action: "save".into()
            }],
            config.keymap["normal"]
        );
        assert_eq!(",,reverse", config.theme.cursor);
    }

    #[test]
    fn invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[window]\nbytes_per_row = \"many\"\n").unwrap();
        assert!(matches!(Config::load(&path), Err(EditorError::Config(_))));
    }
}
