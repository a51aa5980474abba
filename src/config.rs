// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! Startup file layout.
//!
//! `gi` reads one optional TOML startup file that tunes process-wide
//! settings and registers user-defined aliases. The file is located through
//! the `GI_STARTUP` environment variable (shell-expanded), falling back to
//! `$XDG_CONFIG_HOME/gi/config.toml` when that exists. Without either, the
//! built-in defaults apply.
//!
//! ```toml
//! [config]
//! prompt = "[gi]$ "
//! default_action = "status:here"
//! initial_branch = "main"
//!
//! [alias]
//! br = ["branch:create", "-w"]
//! ```
//!
//! Aliases registered here are consulted before the built-in alias table of
//! [`crate::router`] and may point at built-in aliases.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    env,
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    path::PathBuf,
    str::FromStr,
};
use tracing::debug;

/// Environment variable naming the startup file.
pub const ENVVAR_STARTUP: &str = "GI_STARTUP";

/// Parsed startup file.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Startup {
    /// Process-wide settings.
    #[serde(default, rename = "config")]
    pub settings: Settings,

    /// User-defined aliases: shorthand name to action name plus fixed
    /// arguments.
    #[serde(default, rename = "alias")]
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl Startup {
    /// Load the startup file for this process.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::StartupFileMissing`] when `GI_STARTUP` names
    ///   a file that does not exist.
    /// - Return [`ConfigError::Deserialize`] on malformed TOML.
    pub fn load() -> Result<Self> {
        if let Ok(value) = env::var(ENVVAR_STARTUP) {
            if !value.is_empty() {
                let path = PathBuf::from(
                    shellexpand::full(&value)
                        .map_err(ConfigError::ShellExpansion)?
                        .into_owned(),
                );
                if !path.is_file() {
                    return Err(ConfigError::StartupFileMissing(path));
                }
                debug!("loading startup file {:?}", path.display());
                return fs::read_to_string(&path)
                    .map_err(|source| ConfigError::ReadStartupFile { source, path })?
                    .parse();
            }
        }

        if let Some(path) = default_startup_path() {
            if path.is_file() {
                debug!("loading startup file {:?}", path.display());
                return fs::read_to_string(&path)
                    .map_err(|source| ConfigError::ReadStartupFile { source, path })?
                    .parse();
            }
        }

        Ok(Self::default())
    }
}

impl FromStr for Startup {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Ok(toml::de::from_str(data).map_err(ConfigError::Deserialize)?)
    }
}

impl Display for Startup {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        let rendered = toml::ser::to_string_pretty(self).map_err(|_| std::fmt::Error)?;
        fmt.write_str(&rendered)
    }
}

/// Process-wide settings read once at startup.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Prompt string used for command echoback.
    pub prompt: String,

    /// Action to run when no action name is given.
    pub default_action: String,

    /// Branch name used by `repo:init`.
    pub initial_branch: String,

    /// Message of the empty initial commit created by `repo:init`.
    pub initial_commit_message: String,

    /// Entries written to a generated `.gitignore`.
    pub gitignore: Vec<String>,

    /// Log format used by `history:show -F graph`.
    pub history_graph_format: String,

    /// Extra log options used by `history:show -F graph`.
    pub history_graph_options: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: "[gi]$ ".to_owned(),
            default_action: "status:here".to_owned(),
            initial_branch: "main".to_owned(),
            initial_commit_message: "Initial commit (empty)".to_owned(),
            gitignore: ["*~", "*.DS_Store", "tmp", "*.pyc"]
                .map(ToOwned::to_owned)
                .to_vec(),
            history_graph_format: "%C(auto)%h %ad <%al> | %d %s".to_owned(),
            history_graph_options: ["--graph", "--date=short", "--decorate"]
                .map(ToOwned::to_owned)
                .to_vec(),
        }
    }
}

/// Default startup file location under the XDG config directory.
pub fn default_startup_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gi").join("config.toml"))
}

/// Commented startup file template for `misc:startupfile`.
pub fn startup_template() -> String {
    let defaults = Settings::default();
    format!(
        r##"## Startup file for the 'gi' command.
##
## This file is loaded when ${ENVVAR_STARTUP} points at it, or when it sits
## at $XDG_CONFIG_HOME/gi/config.toml. Every entry is optional.

[config]
#prompt = "{prompt}"
#default_action = "{default_action}"   # or: "status:info"
#initial_branch = "{initial_branch}"
#initial_commit_message = "{initial_commit_message}"
#gitignore = ["*~", "*.DS_Store", "tmp", "*.pyc"]
#history_graph_format = "{history_graph_format}"
#history_graph_options = ["--graph", "--date=short", "--decorate"]

## Custom aliases: name = [action, fixed arguments...]
[alias]
#br = ["branch:create", "-w"]
"##,
        prompt = defaults.prompt,
        default_action = defaults.default_action,
        initial_branch = defaults.initial_branch,
        initial_commit_message = defaults.initial_commit_message,
        history_graph_format = defaults.history_graph_format,
    )
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `GI_STARTUP` named a file that does not exist.
    #[error("{}: Setup file specified but not exist.", .0.display())]
    StartupFileMissing(PathBuf),

    /// Startup file exists but cannot be read.
    #[error("{}: cannot read setup file", .path.display())]
    ReadStartupFile {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to deserialize startup file.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to perform shell expansion on startup file path.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

/// Friendly result alias :3
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_startup_file_means_defaults() {
        let startup: Startup = "".parse().unwrap();
        assert_eq!(startup.settings, Settings::default());
        assert!(startup.aliases.is_empty());
    }

    #[test]
    fn partial_settings_keep_remaining_defaults() {
        let startup: Startup = indoc! {r#"
            [config]
            prompt = "(gi) "
            initial_branch = "trunk"
        "#}
        .parse()
        .unwrap();

        assert_eq!(startup.settings.prompt, "(gi) ");
        assert_eq!(startup.settings.initial_branch, "trunk");
        assert_eq!(startup.settings.default_action, "status:here");
        assert_eq!(
            startup.settings.gitignore,
            vec!["*~", "*.DS_Store", "tmp", "*.pyc"]
        );
    }

    #[test]
    fn aliases_deserialize_as_token_vectors() {
        let startup: Startup = indoc! {r#"
            [alias]
            br = ["branch:create", "-w"]
            s = ["sw"]
        "#}
        .parse()
        .unwrap();

        assert_eq!(
            startup.aliases.get("br"),
            Some(&vec!["branch:create".to_owned(), "-w".to_owned()])
        );
        assert_eq!(startup.aliases.get("s"), Some(&vec!["sw".to_owned()]));
    }

    #[test]
    fn template_parses_back_with_defaults() {
        let startup: Startup = startup_template().parse().unwrap();
        assert_eq!(startup.settings, Settings::default());
    }
}
