use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "quizsheet.toml";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub convert: ConvertSection,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ConvertSection {
    /// Default level specification, e.g. "A=35,B=50,C=35".
    #[serde(default)]
    pub levels: Option<String>,

    /// Worksheet name inside each generated workbook.
    #[serde(default)]
    pub sheet_name: Option<String>,

    /// Directory where generated .xlsx files land. When unset, each workbook
    /// is written next to its source document.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

pub fn find_file_upwards(start_dir: &Path, filename: &str, max_levels: usize) -> Option<PathBuf> {
    let mut dir = start_dir;
    for _ in 0..=max_levels {
        let candidate = dir.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
    None
}

/// Search for quizsheet.toml upwards from the current directory, then from the
/// executable's directory (drag-and-drop runs start in odd places).
pub fn find_default_config() -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(p) = find_file_upwards(&cwd, CONFIG_FILE_NAME, 8) {
            return Some(p);
        }
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            if let Some(p) = find_file_upwards(dir, CONFIG_FILE_NAME, 8) {
                return Some(p);
            }
        }
    }
    None
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: AppConfig = toml::from_str(&text).context("parse config toml")?;
    Ok(cfg)
}

pub fn init_default_config(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create config dir: {}", dir.display()))?;
    let cfg_path = dir.join(CONFIG_FILE_NAME);
    if cfg_path.exists() && !force {
        return Ok(cfg_path);
    }
    std::fs::write(&cfg_path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("write config: {}", cfg_path.display()))?;
    Ok(cfg_path)
}

const DEFAULT_CONFIG_TOML: &str = r#"[convert]
# Level specification applied to extracted questions by 1-based ordinal.
# "A=35,B=50,C=35" assigns questions 1..35 to A, 36..85 to B, 86..120 to C.
# Questions past the last range get an empty level.
levels = "A=35,B=50,C=35"

# Worksheet name inside each generated workbook.
sheet_name = "Тест"

# Where generated .xlsx files are written. When unset, each workbook lands
# next to its source document.
# output_dir = "converted"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips() {
        let cfg: AppConfig = toml::from_str(DEFAULT_CONFIG_TOML).expect("parse default config");
        assert_eq!(cfg.convert.levels.as_deref(), Some("A=35,B=50,C=35"));
        assert_eq!(cfg.convert.sheet_name.as_deref(), Some("Тест"));
        assert!(cfg.convert.output_dir.is_none());
    }

    #[test]
    fn missing_sections_default() {
        let cfg: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(cfg.convert.levels.is_none());
    }

    #[test]
    fn init_writes_once_unless_forced() {
        let dir = std::env::temp_dir().join(format!("quizsheet-cfg-{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();

        let path = init_default_config(&dir, false).expect("init config");
        std::fs::write(&path, "[convert]\nlevels = \"X=1\"\n").expect("overwrite");

        // Without force the edited file survives.
        init_default_config(&dir, false).expect("init again");
        let kept = std::fs::read_to_string(&path).expect("read");
        assert!(kept.contains("X=1"));

        // With force the template is restored.
        init_default_config(&dir, true).expect("init forced");
        let restored = std::fs::read_to_string(&path).expect("read");
        assert!(restored.contains("A=35,B=50,C=35"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
