//! # Terminal Output
//!
//! Controls how the CLI decorates its reports. Status lines get an emoji when
//! color is enabled and a bracketed tag otherwise, so logs captured from CI
//! stay readable.
//!
//! Color is decided by, in order:
//! - `--color=always|never`
//! - `NO_COLOR` (any value disables, see https://no-color.org/)
//! - `CLICOLOR=0` disables, `CLICOLOR_FORCE=1` enables
//! - `TERM=dumb` disables
//! - whether stdout is a color-capable terminal

use std::env;

use console::style;

/// Output configuration for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

/// Kinds of status line printed by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Scan,
    Ok,
    Warn,
    Error,
    Remove,
    Copy,
    DryRun,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Status::Scan => "🔍",
            Status::Ok => "✅",
            Status::Warn => "⚠️",
            Status::Error => "❌",
            Status::Remove => "🗑️",
            Status::Copy => "📦",
            Status::DryRun => "🔎",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Status::Scan => "[SCAN]",
            Status::Ok => "[OK]",
            Status::Warn => "[WARN]",
            Status::Error => "[ERR]",
            Status::Remove => "[DEL]",
            Status::Copy => "[COPY]",
            Status::DryRun => "[DRY RUN]",
        }
    }
}

impl OutputConfig {
    /// Build the configuration from the `--color` flag value and environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Leading marker for a status line.
    pub fn marker(&self, status: Status) -> &'static str {
        if self.use_color {
            status.emoji()
        } else {
            status.tag()
        }
    }

    /// Render a path for display, dimmed when color is on.
    pub fn path(&self, path: &str) -> String {
        if self.use_color {
            style(path).dim().force_styling(true).to_string()
        } else {
            path.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_flag_overrides_detection() {
        assert!(OutputConfig::from_env_and_flag("always").use_color);
        assert!(!OutputConfig::from_env_and_flag("never").use_color);
        assert!(OutputConfig::from_env_and_flag("ALWAYS").use_color);
    }

    #[test]
    fn test_marker_with_color() {
        let out = OutputConfig { use_color: true };
        assert_eq!(out.marker(Status::Ok), "✅");
    }

    #[test]
    fn test_marker_without_color() {
        let out = OutputConfig { use_color: false };
        assert_eq!(out.marker(Status::Remove), "[DEL]");
        assert_eq!(out.marker(Status::DryRun), "[DRY RUN]");
        assert_eq!(out.path("foo/a.txt"), "foo/a.txt");
    }

    #[test]
    fn test_path_styling_with_color() {
        let out = OutputConfig { use_color: true };
        let rendered = out.path("foo/a.txt");
        assert!(rendered.contains("foo/a.txt"));
        assert_ne!(rendered, "foo/a.txt");
    }
}
