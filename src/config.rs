//! Process-level configuration: where sessions live and which export
//! toggles the interactive browser starts with.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::render::RenderOptions;

/// Root of the assistant's state directory: `$CODEX_HOME` when set,
/// otherwise `~/.codex`.
pub fn codex_home() -> Result<PathBuf> {
    if let Ok(dir) = env::var("CODEX_HOME")
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".codex"))
}

/// Directory holding dated session files (`sessions/YYYY/MM/DD/rollout-*.jsonl`).
pub fn sessions_root() -> Result<PathBuf> {
    Ok(codex_home()?.join("sessions"))
}

/// Mutable export preferences carried by the interactive browser.
#[derive(Debug, Clone)]
pub struct Settings {
    pub include_tools: bool,
    pub include_reasoning: bool,
    pub redact_paths: bool,
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { include_tools: false, include_reasoning: true, redact_paths: false, output_dir: None }
    }
}

impl Settings {
    /// Resolve the settings into renderer options, attaching the home path
    /// only when redaction is on.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_tools: self.include_tools,
            include_reasoning: self.include_reasoning,
            redact_home: self.redact_paths,
            home_path: if self.redact_paths { dirs::home_dir() } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codex_home_env_override() {
        // SAFETY: tests in this module run on one thread per test binary
        // invocation of this case; the variable is restored afterwards.
        let original = env::var("CODEX_HOME").ok();
        unsafe {
            env::set_var("CODEX_HOME", "/tmp/custom-codex");
        }

        let home = codex_home().unwrap();
        assert_eq!(home, PathBuf::from("/tmp/custom-codex"));
        assert_eq!(sessions_root().unwrap(), PathBuf::from("/tmp/custom-codex/sessions"));

        unsafe {
            match original {
                Some(value) => env::set_var("CODEX_HOME", value),
                None => env::remove_var("CODEX_HOME"),
            }
        }
    }

    #[test]
    fn test_default_settings_match_render_defaults() {
        let settings = Settings::default();
        let options = settings.render_options();
        assert!(!options.include_tools);
        assert!(options.include_reasoning);
        assert!(!options.redact_home);
        assert!(options.home_path.is_none());
    }

    #[test]
    fn test_redaction_setting_attaches_home_path() {
        let settings = Settings { redact_paths: true, ..Default::default() };
        let options = settings.render_options();
        assert!(options.redact_home);
    }
}
