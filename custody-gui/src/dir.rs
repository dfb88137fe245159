use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub struct CustodyDirectory(PathBuf);

impl CustodyDirectory {
    pub fn new(p: PathBuf) -> Self {
        CustodyDirectory(p)
    }
    pub fn new_default() -> Result<Self, Box<dyn std::error::Error>> {
        default_datadir().map(CustodyDirectory::new)
    }
}

impl CustodyDirectory {
    pub fn exists(&self) -> bool {
        self.0.as_path().exists()
    }
    pub fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        create_directory(self.0.as_path())
    }
    pub fn path(&self) -> &Path {
        self.0.as_path()
    }
    pub fn config_file(&self) -> PathBuf {
        self.0.join(crate::app::config::DEFAULT_FILE_NAME)
    }
}

/// Get the absolute path to the custody configuration folder.
///
/// It's `~/.custody` on Linux and a "Custody" directory in the standard
/// configuration directory elsewhere.
fn default_datadir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    #[cfg(target_os = "linux")]
    let configs_dir = dirs::home_dir();

    #[cfg(not(target_os = "linux"))]
    let configs_dir = dirs::config_dir();

    if let Some(mut path) = configs_dir {
        #[cfg(target_os = "linux")]
        path.push(".custody");

        #[cfg(not(target_os = "linux"))]
        path.push("Custody");

        return Ok(path);
    }

    Err("Failed to get default data directory".into())
}

fn create_directory(datadir_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    return {
        use std::fs::DirBuilder;
        use std::os::unix::fs::DirBuilderExt;

        let mut builder = DirBuilder::new();
        builder
            .mode(0o700)
            .recursive(true)
            .create(datadir_path)
            .map_err(|e| e.into())
    };

    #[cfg(not(unix))]
    return std::fs::create_dir_all(datadir_path).map_err(|e| e.into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_the_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = CustodyDirectory::new(tmp.path().join("nested").join("custody"));
        assert!(!dir.exists());
        dir.init().unwrap();
        assert!(dir.exists());
        assert_eq!(dir.config_file(), dir.path().join("gui.toml"));
    }
}
