//! User settings for the command-line front end.
//!
//! Settings live in `settings.toml` in the platform config directory (or a
//! file given with `--config`). Problems with the file are reported as
//! warnings and the defaults are used instead.

use directories::ProjectDirs;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use gridcalc_core::Spreadsheet;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upper-case cell names, so `a1` and `A1` are the same cell.
    pub case_insensitive: bool,
    /// Optional pattern that (normalized) cell names must fully match.
    pub name_pattern: Option<String>,
    pub version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            case_insensitive: true,
            name_pattern: None,
            version: "default".to_string(),
        }
    }
}

impl Settings {
    /// Build an empty spreadsheet with these naming rules.
    ///
    /// An invalid `name_pattern` is reported as a warning and ignored.
    pub fn spreadsheet(&self, warnings: &mut Vec<String>) -> Spreadsheet {
        let pattern = self.name_pattern.as_deref().and_then(|p| {
            match Regex::new(&format!("^(?:{})$", p)) {
                Ok(re) => Some(re),
                Err(err) => {
                    warnings.push(format!("Ignoring name_pattern {:?}: {}", p, err));
                    None
                }
            }
        });
        let is_valid = move |name: &str| pattern.as_ref().is_none_or(|re| re.is_match(name));

        if self.case_insensitive {
            Spreadsheet::with_rules(is_valid, |name| name.to_ascii_uppercase(), &self.version)
        } else {
            Spreadsheet::with_rules(is_valid, str::to_string, &self.version)
        }
    }
}

/// Load settings from `settings_file`, or from the user config dir unless
/// `skip_user` is set.
pub fn load_settings(settings_file: Option<&PathBuf>, skip_user: bool) -> (Settings, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let path = match settings_file {
        Some(path) => Some(path.clone()),
        None if skip_user => None,
        None => user_settings_path(),
    };

    let Some(path) = path else {
        return (Settings::default(), warnings);
    };
    if !path.exists() {
        if settings_file.is_some() {
            warnings.push(format!("Settings file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    let settings = match read_settings(&path) {
        Ok(settings) => settings,
        Err(err) => {
            warnings.push(err);
            Settings::default()
        }
    };
    (settings, warnings)
}

fn read_settings(path: &Path) -> Result<Settings, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str::<Settings>(&content)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn user_settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("settings.toml");
    Some(path)
}
