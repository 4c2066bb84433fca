//! Fixed workspace layout relative to the project root.

use std::path::{Path, PathBuf};

/// Working directories the assistant expects, in creation order.
pub const DIRECTORIES: [&str; 8] = [
    "config", "data", "logs", "models", "backtest", "monitor", "learning", "utils",
];

/// Configuration document path relative to the root.
pub const CONFIG_FILE: &str = "config/config.json";

/// Optional bootstrapper settings file relative to the root.
pub const SETTINGS_FILE: &str = "setup.toml";

/// Entry point of the downstream program, shown in the final hint.
pub const NEXT_STEP: &str = "python start.py";

/// Resolves layout paths under a project root.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    /// Absolute-or-relative paths of every working directory.
    pub fn directories(&self) -> impl Iterator<Item = PathBuf> + '_ {
        DIRECTORIES.iter().map(|name| self.root.join(name))
    }

    /// Resolve a document-relative path such as `database.path`.
    #[must_use]
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_in_config_directory() {
        let layout = Layout::new("/srv/assistant");
        assert_eq!(
            layout.config_file(),
            PathBuf::from("/srv/assistant/config/config.json")
        );
        assert!(DIRECTORIES.contains(&"config"));
    }

    #[test]
    fn directories_are_rooted() {
        let layout = Layout::new("root");
        let dirs: Vec<PathBuf> = layout.directories().collect();
        assert_eq!(dirs.len(), 8);
        assert!(dirs.iter().all(|d| d.starts_with("root")));
        assert_eq!(dirs[0], PathBuf::from("root/config"));
    }
}
