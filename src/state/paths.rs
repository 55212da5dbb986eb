use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// On-disk locations the organizer works with.
///
/// Everything lives under a single application data directory:
/// - Linux: ~/.local/share/gdd-organizer/
/// - macOS: ~/Library/Application Support/gdd-organizer/
/// - Windows: %APPDATA%\gdd-organizer\
///
/// `assets/` holds the managed copies of imported files and
/// `organizer.json` is the persisted store.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub config_file: PathBuf,
}

impl StorePaths {
    /// Paths rooted at the user's data directory.
    pub fn default_location() -> Self {
        let mut root = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");
        root.push("gdd-organizer");
        Self::at(&root)
    }

    /// Paths rooted at an arbitrary directory (used by tests).
    pub fn at(root: &Path) -> Self {
        StorePaths {
            data_dir: root.to_path_buf(),
            assets_dir: root.join("assets"),
            config_file: root.join("organizer.json"),
        }
    }

    /// Create the data and asset directories if they are missing.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(&self.assets_dir)?;
        Ok(())
    }
}
