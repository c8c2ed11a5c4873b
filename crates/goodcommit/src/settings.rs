//! Runtime settings resolved from defaults, environment and flags.
//!
//! Layers, lowest priority first:
//! 1. **Compiled defaults** — [`Settings::default()`]
//! 2. **Environment** — `GOODCOMMIT_CONFIG_PATH`, `ACCESSIBLE`, `EDITOR`
//! 3. **Flags** — `--config`, `--accessible`

use std::path::PathBuf;

use tracing::warn;

use crate::cli::Args;

/// Activation config used when nothing else is given.
pub const DEFAULT_CONFIG_PATH: &str = "./configs/config.example.json";

/// Editor used for `--edit` when `EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "vim";

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Module activation config.
    pub config_path: PathBuf,
    /// Plain prompts.
    pub accessible: bool,
    /// Editor for the saved message.
    pub editor: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            accessible: false,
            editor: DEFAULT_EDITOR.to_string(),
        }
    }
}

impl Settings {
    /// Resolve all layers against the process environment.
    pub fn resolve(args: &Args) -> Self {
        let mut settings = Self::default();
        settings.apply_env(|key| std::env::var(key).ok());
        settings.apply_args(args);
        settings
    }

    /// Apply environment overrides read through `env`.
    ///
    /// Empty values are ignored, as are unparseable booleans.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let read = |key: &str| env(key).filter(|v| !v.is_empty());

        if let Some(path) = read("GOODCOMMIT_CONFIG_PATH") {
            self.config_path = PathBuf::from(path);
        }
        if let Some(raw) = read("ACCESSIBLE") {
            match parse_bool(&raw) {
                Some(accessible) => self.accessible = accessible,
                None => warn!(key = "ACCESSIBLE", value = %raw, "invalid boolean env var, ignoring"),
            }
        }
        if let Some(editor) = read("EDITOR") {
            self.editor = editor;
        }
    }

    /// Apply command-line flags.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(path) = &args.config {
            self.config_path.clone_from(path);
        }
        if args.accessible {
            self.accessible = true;
        }
    }
}

/// Parse a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("goodcommit").chain(argv.iter().copied()))
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!s.accessible);
        assert_eq!(s.editor, "vim");
    }

    #[test]
    fn env_overrides_defaults() {
        let mut s = Settings::default();
        s.apply_env(env(&[
            ("GOODCOMMIT_CONFIG_PATH", "/etc/goodcommit.json"),
            ("ACCESSIBLE", "TRUE"),
            ("EDITOR", "nano"),
        ]));
        assert_eq!(s.config_path, PathBuf::from("/etc/goodcommit.json"));
        assert!(s.accessible);
        assert_eq!(s.editor, "nano");
    }

    #[test]
    fn invalid_or_empty_env_is_ignored() {
        let mut s = Settings::default();
        s.apply_env(env(&[("ACCESSIBLE", "maybe"), ("EDITOR", "")]));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn flags_override_env() {
        let mut s = Settings::default();
        s.apply_env(env(&[("GOODCOMMIT_CONFIG_PATH", "/etc/goodcommit.json")]));
        s.apply_args(&args(&["--config", "./mine.json", "--accessible"]));
        assert_eq!(s.config_path, PathBuf::from("./mine.json"));
        assert!(s.accessible);
    }

    #[test]
    fn absent_flag_keeps_env_accessibility() {
        let mut s = Settings::default();
        s.apply_env(env(&[("ACCESSIBLE", "1")]));
        s.apply_args(&args(&[]));
        assert!(s.accessible);
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
