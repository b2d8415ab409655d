//! User settings from `config.toml`.
//!
//! A missing file is not an error. Problems with an existing file become
//! warnings and the defaults are used instead.

use directories::ProjectDirs;
use gridfill_core::{DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;
const MIN_COLUMN_WIDTH: usize = 3;
const MAX_COLUMN_WIDTH: usize = 40;
pub const DEFAULT_COLUMN_WIDTH: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    grid: Option<GridSection>,
    view: Option<ViewSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridSection {
    initial_rows: Option<usize>,
    initial_cols: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewSection {
    column_width: Option<usize>,
}

/// Resolved settings, always within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub initial_rows: usize,
    pub initial_cols: usize,
    pub column_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            initial_rows: DEFAULT_ROWS,
            initial_cols: DEFAULT_COLS,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl Settings {
    /// Apply `--rows` / `--cols` from the command line.
    pub fn with_overrides(mut self, rows: Option<usize>, cols: Option<usize>, warnings: &mut Vec<String>) -> Self {
        if let Some(rows) = rows {
            self.initial_rows = clamp_setting("--rows", rows, 1, MAX_ROWS, warnings);
        }
        if let Some(cols) = cols {
            self.initial_cols = clamp_setting("--cols", cols, 1, MAX_COLS, warnings);
        }
        self
    }
}

/// Load settings from `config_file`, or the user config path when `None`.
pub fn load_settings(config_file: Option<&PathBuf>) -> (Settings, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (Settings::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    let settings = match read_config(&path) {
        Ok(file) => resolve(file, &mut warnings),
        Err(warning) => {
            warnings.push(warning);
            Settings::default()
        }
    };
    (settings, warnings)
}

fn read_config(path: &Path) -> Result<ConfigFile, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    parse_config(&content).map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str::<ConfigFile>(content)
}

fn resolve(file: ConfigFile, warnings: &mut Vec<String>) -> Settings {
    let mut settings = Settings::default();
    if let Some(grid) = file.grid {
        if let Some(rows) = grid.initial_rows {
            settings.initial_rows = clamp_setting("grid.initial_rows", rows, 1, MAX_ROWS, warnings);
        }
        if let Some(cols) = grid.initial_cols {
            settings.initial_cols = clamp_setting("grid.initial_cols", cols, 1, MAX_COLS, warnings);
        }
    }
    if let Some(width) = file.view.and_then(|v| v.column_width) {
        settings.column_width =
            clamp_setting("view.column_width", width, MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH, warnings);
    }
    settings
}

fn clamp_setting(name: &str, value: usize, min: usize, max: usize, warnings: &mut Vec<String>) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warnings.push(format!("{} = {} out of range, using {}", name, value, clamped));
    }
    clamped
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridfill")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("gridfill_config_{}_{}.toml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parses_all_sections() {
        let path = temp_config(
            "full",
            "[grid]\ninitial_rows = 50\ninitial_cols = 12\n\n[view]\ncolumn_width = 8\n",
        );
        let (settings, warnings) = load_settings(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert!(warnings.is_empty(), "{:?}", warnings);
        assert_eq!(
            settings,
            Settings {
                initial_rows: 50,
                initial_cols: 12,
                column_width: 8,
            }
        );
    }

    #[test]
    fn out_of_range_values_are_clamped_with_warning() {
        let path = temp_config("clamp", "[grid]\ninitial_rows = 5000\n[view]\ncolumn_width = 1\n");
        let (settings, warnings) = load_settings(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.initial_rows, 1000);
        assert_eq!(settings.column_width, 3);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn unknown_fields_fall_back_to_defaults() {
        let path = temp_config("unknown", "[grid]\ninitial_rowz = 5\n");
        let (settings, warnings) = load_settings(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings, Settings::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse"));
    }

    #[test]
    fn missing_explicit_file_warns() {
        let path = PathBuf::from("/nonexistent/gridfill/config.toml");
        let (settings, warnings) = load_settings(Some(&path));
        assert_eq!(settings, Settings::default());
        assert!(warnings[0].starts_with("Config file not found"));
    }

    #[test]
    fn cli_overrides_win() {
        let mut warnings = Vec::new();
        let settings = Settings::default().with_overrides(Some(7), Some(0), &mut warnings);
        assert_eq!((settings.initial_rows, settings.initial_cols), (7, 1));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file = parse_config("").unwrap();
        let mut warnings = Vec::new();
        assert_eq!(resolve(file, &mut warnings), Settings::default());
    }
}
