use anyhow::Context as _;
use directories::ProjectDirs;
use flow_library::settings::PickerSettings;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub picker: PickerSettings,
    /// Project opened on startup instead of the demo project.
    pub last_project: Option<PathBuf>,
}

fn get_config_path() -> Option<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("me", "liesegang", "flow_editor") {
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            if let Err(e) = fs::create_dir_all(config_dir) {
                error!("Failed to create config directory: {}", e);
                return None;
            }
        }
        return Some(config_dir.join("picker.toml"));
    }
    None
}

pub fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let toml_str = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = toml::from_str(&toml_str)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

pub fn write_config(path: &Path, config: &AppConfig) -> anyhow::Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    fs::write(path, toml_str).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn save_config(config: &AppConfig) {
    if let Some(path) = get_config_path() {
        match write_config(&path, config) {
            Ok(()) => info!("Config saved to {}", path.display()),
            Err(e) => error!("Failed to save config: {:#}", e),
        }
    }
}

pub fn load_config() -> AppConfig {
    if let Some(path) = get_config_path() {
        if path.exists() {
            match read_config(&path) {
                Ok(config) => return config,
                Err(e) => warn!("Failed to load config, using defaults: {:#}", e),
            }
        }
    }
    AppConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [picker]
            layout_padding = 12.0

            [picker.labels]
            select_asset = "Choose asset"
            "#,
        )
        .unwrap();
        assert_eq!(config.picker.layout_padding, 12.0);
        assert_eq!(config.picker.labels.select_asset, "Choose asset");
        assert_eq!(config.picker.labels.assets_header, "Assets");
        assert_eq!(config.picker.meta_keys.rule_state, "ruleState");
        assert!(config.last_project.is_none());
    }

    #[test]
    fn written_config_reads_back() {
        let path = std::env::temp_dir().join(format!("picker-{}.toml", uuid::Uuid::new_v4()));
        let mut config = AppConfig::default();
        config.picker.meta_keys.agent_link = "linkedAgent".to_string();
        config.last_project = Some(PathBuf::from("/tmp/rules.json"));

        write_config(&path, &config).unwrap();
        let read = read_config(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(read, config);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let path = std::env::temp_dir().join("does-not-exist-picker.toml");
        assert!(read_config(&path).is_err());
    }
}
