//! Level list configuration
//!
//! ```json
//! { "levels": { "levels/1.bmp": { "enemies": { "speed": [1.5, 2] } } } }
//! ```
//!
//! Keys of `levels` are bitmap paths. Play order is the byte-wise sorted key
//! order, not document order, so `10.bmp` comes before `2.bmp`. Each value
//! lists one patrol speed per enemy, in the order the segmenter emits enemy
//! rectangles.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Problems reading the level list
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read level config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level config: {context} is missing `{key}`")]
    MissingKey { context: String, key: &'static str },
    #[error("level config: {context} must be {expected}")]
    WrongType {
        context: String,
        expected: &'static str,
    },
    #[error("level config: level {level} speed #{index} is not a finite number")]
    InvalidSpeed { level: String, index: usize },
    #[error("level config lists no levels")]
    NoLevels,
}

/// A single configured level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelEntry {
    /// Key as written in the config file
    pub name: String,
    /// Bitmap location (relative keys resolved against the config directory)
    pub path: PathBuf,
    /// Patrol speed per enemy, in segmentation order
    pub enemy_speeds: Vec<f32>,
}

/// Ordered list of levels
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub levels: Vec<LevelEntry>,
}

impl LevelConfig {
    /// Read and parse a config file; relative level paths are resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::parse(&text, base)?;
        log::info!(
            "Loaded {} levels from {}",
            config.levels.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse config text, leaving level paths exactly as written
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, Path::new(""))
    }

    fn parse(text: &str, base: &Path) -> Result<Self, ConfigError> {
        let root: Value = serde_json::from_str(text)?;
        let root = as_object(&root, "document root")?;
        let levels = root.get("levels").ok_or_else(|| ConfigError::MissingKey {
            context: "document root".to_string(),
            key: "levels",
        })?;
        let levels = as_object(levels, "`levels`")?;

        let mut entries = levels.iter().collect::<Vec<_>>();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        let levels = entries
            .into_iter()
            .map(|(name, body)| parse_level(name, body, base))
            .collect::<Result<Vec<_>, _>>()?;

        if levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelEntry> {
        self.levels.get(index)
    }
}

fn as_object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>, ConfigError> {
    value.as_object().ok_or_else(|| ConfigError::WrongType {
        context: context.to_string(),
        expected: "an object",
    })
}

fn parse_level(name: &str, body: &Value, base: &Path) -> Result<LevelEntry, ConfigError> {
    let context = format!("level `{name}`");
    let enemies = as_object(body, &context)?
        .get("enemies")
        .ok_or_else(|| ConfigError::MissingKey {
            context: context.clone(),
            key: "enemies",
        })?;

    let enemies_context = format!("{context} `enemies`");
    let speeds = as_object(enemies, &enemies_context)?
        .get("speed")
        .ok_or_else(|| ConfigError::MissingKey {
            context: enemies_context.clone(),
            key: "speed",
        })?
        .as_array()
        .ok_or_else(|| ConfigError::WrongType {
            context: format!("{enemies_context} `speed`"),
            expected: "an array of numbers",
        })?;

    let enemy_speeds = speeds
        .iter()
        .enumerate()
        .map(|(index, speed)| {
            speed
                .as_f64()
                .map(|s| s as f32)
                .filter(|s| s.is_finite())
                .ok_or_else(|| ConfigError::InvalidSpeed {
                    level: name.to_string(),
                    index,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LevelEntry {
        name: name.to_string(),
        path: base.join(name),
        enemy_speeds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_play_in_sorted_key_order() {
        let config = LevelConfig::from_json_str(
            r#"{
                "levels": {
                    "zeta.bmp": { "enemies": { "speed": [1, 2.5] } },
                    "alpha.bmp": { "enemies": { "speed": [] } }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.len(), 2);
        assert_eq!(config.levels[0].path, PathBuf::from("alpha.bmp"));
        assert!(config.levels[0].enemy_speeds.is_empty());
        assert_eq!(config.levels[1].name, "zeta.bmp");
        assert_eq!(config.levels[1].enemy_speeds, vec![1.0, 2.5]);
    }

    #[test]
    fn test_numeric_names_sort_as_text() {
        let config = LevelConfig::from_json_str(
            r#"{
                "levels": {
                    "levels/2.bmp": { "enemies": { "speed": [2] } },
                    "levels/10.bmp": { "enemies": { "speed": [10] } },
                    "levels/1.bmp": { "enemies": { "speed": [1] } }
                }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = config.levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["levels/1.bmp", "levels/10.bmp", "levels/2.bmp"]);
        assert_eq!(config.levels[1].enemy_speeds, vec![10.0]);
    }

    #[test]
    fn test_missing_levels_key() {
        let err = LevelConfig::from_json_str(r#"{ "stages": {} }"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "levels", .. }));
    }

    #[test]
    fn test_missing_speed_names_the_level() {
        let err = LevelConfig::from_json_str(r#"{ "levels": { "a.bmp": { "enemies": {} } } }"#)
            .unwrap_err();
        match err {
            ConfigError::MissingKey { context, key } => {
                assert_eq!(key, "speed");
                assert!(context.contains("a.bmp"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_speed_must_be_array() {
        let err = LevelConfig::from_json_str(
            r#"{ "levels": { "a.bmp": { "enemies": { "speed": 3 } } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::WrongType { .. }));
    }

    #[test]
    fn test_non_numeric_speed() {
        let err = LevelConfig::from_json_str(
            r#"{ "levels": { "a.bmp": { "enemies": { "speed": [1, "fast"] } } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeed { index: 1, .. }));
    }

    #[test]
    fn test_syntax_errors_surface_as_parse() {
        for text in [
            r#"{ "levels": { "a.bmp": "#,
            r#"{ "levels": { "a.bmp: {} } }"#,
            r#"{ levels: {} }"#,
            r#"{ "levels": [ } "#,
        ] {
            let err = LevelConfig::from_json_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Parse(_)), "{text}: {err}");
        }
    }

    #[test]
    fn test_empty_level_list() {
        let err = LevelConfig::from_json_str(r#"{ "levels": {} }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoLevels));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "levels": { "maps/1.bmp": { "enemies": { "speed": [2] } } } }"#,
        )
        .unwrap();

        let config = LevelConfig::load(&path).unwrap();
        assert_eq!(config.levels[0].path, dir.path().join("maps/1.bmp"));
        assert_eq!(config.levels[0].name, "maps/1.bmp");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LevelConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
