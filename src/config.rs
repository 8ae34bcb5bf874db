//! Settings file handling.
//!
//! The settings live in a `key = value` text file; `#`-prefixed lines and
//! blank lines are ignored. Lookup order is the user config directory, then
//! a read-only system-wide fallback. A missing file is synthesized from the
//! defaults and written back so there is always something to edit. Shader
//! sources resolve against the same two directories.
//!
//! Unknown keys and unparsable numbers are fatal; an unrecognized boolean
//! value only logs a warning and keeps the prior setting.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

const APP_DIR: &str = "loupe";
const CONFIG_FILE: &str = "loupe.conf";
const SYSTEM_DATA_DIR: &str = "/usr/share/loupe";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub min_scale: f32,
    pub max_scale: f32,
    pub drag_friction: f32,
    pub scale_friction: f32,
    pub scroll_speed: f32,
    pub key_move_speed: f32,
    pub windowed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 6.0,
            drag_friction: 6.0,
            scale_friction: 4.0,
            scroll_speed: 1.5,
            key_move_speed: 400.0,
            windowed: false,
        }
    }
}

impl Config {
    /// Load the settings, searching the user config directory first and the
    /// system fallback second. When neither exists, the defaults are written
    /// back to the user path and used as-is.
    pub fn load() -> Result<Self, Error> {
        let user_path = user_config_dir().map(|dir| dir.join(CONFIG_FILE));

        if let Some(path) = user_path.as_deref().filter(|p| p.is_file()) {
            return Self::load_file(path);
        }

        let system_path = Path::new(SYSTEM_DATA_DIR).join(CONFIG_FILE);
        if system_path.is_file() {
            return Self::load_file(&system_path);
        }

        if let Some(path) = &user_path {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).map_err(|source| Error::Io {
                    context: format!("creating {}", dir.display()),
                    source,
                })?;
            }
            fs::write(path, default_file_contents()).map_err(|source| Error::Io {
                context: format!("writing default config to {}", path.display()),
                source,
            })?;
            log::info!("wrote default config to {}", path.display());
        }

        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            context: format!("reading {}", path.display()),
            source,
        })?;
        let config = Self::parse(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse settings text on top of the defaults.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut config = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| {
                Error::Config(format!("line {}: expected 'key = value', got '{line}'", index + 1))
            })?;
            let key = key.trim();
            let value = value.trim();

            match key {
                "min_scale" => config.min_scale = parse_float(key, value)?,
                "max_scale" => config.max_scale = parse_float(key, value)?,
                "scroll_speed" => config.scroll_speed = parse_float(key, value)?,
                "drag_friction" => config.drag_friction = parse_float(key, value)?,
                "scale_friction" => config.scale_friction = parse_float(key, value)?,
                "key_move_speed" => config.key_move_speed = parse_float(key, value)?,
                "windowed" => match parse_bool(value) {
                    Some(windowed) => config.windowed = windowed,
                    None => log::warn!(
                        "unrecognized boolean '{value}' for windowed, keeping {}",
                        config.windowed
                    ),
                },
                _ => {
                    return Err(Error::Config(format!(
                        "line {}: unexpected configuration key '{key}'",
                        index + 1
                    )))
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// The zoom clamp divides by `scale`, so the lower bound must stay
    /// strictly positive.
    fn validate(&self) -> Result<(), Error> {
        if self.min_scale <= 0.0 {
            return Err(Error::Config(format!(
                "min_scale must be > 0 (got {})",
                self.min_scale
            )));
        }
        if self.min_scale > self.max_scale {
            return Err(Error::Config(format!(
                "min_scale ({}) must not exceed max_scale ({})",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }
}

fn parse_float(key: &str, value: &str) -> Result<f32, Error> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("invalid value '{value}' for {key}")))
}

/// Lenient boolean parser: `true/t/yes/y/1` and `false/f/no/n/0`, any case.
/// Anything else is `None`, which callers treat as "keep the prior value".
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Settings text written back when no config file exists.
pub fn default_file_contents() -> String {
    concat!(
        "# loupe settings. Lines starting with '#' are ignored.\n",
        "min_scale      = 0.1\n",
        "max_scale      = 6.0\n",
        "scroll_speed   = 1.5\n",
        "drag_friction  = 6.0\n",
        "scale_friction = 4.0\n",
        "key_move_speed = 400.0\n",
        "windowed       = false\n",
    )
    .to_string()
}

fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Resolve a shader source against the user config directory and the system
/// fallback; a shader that is nowhere to be found is fatal.
pub fn load_shader_source(name: &str) -> Result<String, Error> {
    let mut searched = Vec::new();

    if let Some(dir) = user_config_dir() {
        searched.push(dir.join(name));
    }
    searched.push(Path::new(SYSTEM_DATA_DIR).join(name));

    for path in &searched {
        if path.is_file() {
            return fs::read_to_string(path).map_err(|source| Error::Io {
                context: format!("reading shader {}", path.display()),
                source,
            });
        }
    }

    Err(Error::ShaderNotFound {
        name: name.to_string(),
        searched: searched
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_parser_accepts_documented_synonyms() {
        for value in ["true", "T", "yes", "Y", "1"] {
            assert_eq!(parse_bool(value), Some(true), "{value}");
        }
        for value in ["false", "F", "no", "N", "0"] {
            assert_eq!(parse_bool(value), Some(false), "{value}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn unrecognized_bool_keeps_prior_value_without_error() {
        let config = Config::parse("windowed = yes\nwindowed = maybe").unwrap();
        assert!(config.windowed);

        let config = Config::parse("windowed = maybe").unwrap();
        assert!(!config.windowed);
    }

    #[test]
    fn parse_overrides_every_key() {
        let config = Config::parse(
            "min_scale = 0.25\n\
             max_scale = 8.0\n\
             scroll_speed = 2.0\n\
             drag_friction = 3.0\n\
             scale_friction = 5.0\n\
             key_move_speed = 250.0\n\
             windowed = true\n",
        )
        .unwrap();

        assert_eq!(config.min_scale, 0.25);
        assert_eq!(config.max_scale, 8.0);
        assert_eq!(config.scroll_speed, 2.0);
        assert_eq!(config.drag_friction, 3.0);
        assert_eq!(config.scale_friction, 5.0);
        assert_eq!(config.key_move_speed, 250.0);
        assert!(config.windowed);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let config = Config::parse(
            "# a comment\n\
             \n\
             min_scale = 0.5\n\
             \t\n\
             # windowed = true\n",
        )
        .unwrap();

        assert_eq!(config.min_scale, 0.5);
        assert!(!config.windowed);
    }

    #[test]
    fn unknown_key_is_fatal() {
        assert!(Config::parse("zoom_speed = 1.0").is_err());
    }

    #[test]
    fn missing_value_is_fatal() {
        assert!(Config::parse("min_scale").is_err());
    }

    #[test]
    fn unparsable_float_is_fatal() {
        assert!(Config::parse("min_scale = fast").is_err());
    }

    #[test]
    fn zero_or_negative_min_scale_is_rejected() {
        assert!(Config::parse("min_scale = 0").is_err());
        assert!(Config::parse("min_scale = -1.0").is_err());
    }

    #[test]
    fn inverted_scale_bounds_are_rejected() {
        assert!(Config::parse("min_scale = 3.0\nmax_scale = 2.0").is_err());
    }

    #[test]
    fn default_file_parses_back_to_defaults() {
        let config = Config::parse(&default_file_contents()).unwrap();
        assert_eq!(config, Config::default());
    }
}
