//! Packaging description for the native mobile shell.
//!
//! The shell wraps the built web output in a native application. The
//! packaging tool reads this record as JSON, so the serialized field names are
//! camelCase.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// How built web output is packaged into a native application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    /// Reverse-domain application identifier
    pub app_id: &'static str,
    /// Human readable display name
    pub app_name: &'static str,
    /// Directory holding the built web assets, relative to the project root
    pub web_dir: &'static str,
    /// Whether the shell bundles its own copy of the web runtime
    pub bundled_web_runtime: bool,
}

pub const SHELL_CONFIG: ShellConfig = ShellConfig {
    app_id: "com.services.portal",
    app_name: "Services Portal",
    web_dir: "out",
    bundled_web_runtime: false,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("appId {app_id:?} is not a reverse-domain identifier")]
    NotReverseDomain { app_id: String },
    #[error("webDir {web_dir:?} must be a relative path")]
    AbsoluteWebDir { web_dir: String },
}

impl ShellConfig {
    pub fn validate(&self) -> Result<(), ShellConfigError> {
        for (field, value) in [
            ("appId", self.app_id),
            ("appName", self.app_name),
            ("webDir", self.web_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ShellConfigError::Empty { field });
            }
        }

        if !is_reverse_domain(self.app_id) {
            return Err(ShellConfigError::NotReverseDomain {
                app_id: self.app_id.to_string(),
            });
        }

        if self.web_dir().has_root() {
            return Err(ShellConfigError::AbsoluteWebDir {
                web_dir: self.web_dir.to_string(),
            });
        }

        Ok(())
    }

    pub fn web_dir(&self) -> &'static Path {
        Path::new(self.web_dir)
    }

    /// Pretty JSON in the layout the packaging tool expects
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `com.example.app` style: two or more dot separated segments, each starting
/// with a letter.
fn is_reverse_domain(id: &str) -> bool {
    fn is_segment(segment: &str) -> bool {
        let mut chars = segment.chars();

        matches!(chars.next(), Some(first) if first.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    id.split('.').count() >= 2 && id.split('.').all(is_segment)
}
