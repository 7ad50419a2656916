//! Configuration file discovery.
//!
//! Discovers `.sift.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.sift.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::{ConfigError, parse::is_root_config};

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".sift.toml";

/// Lists the configuration files that apply in `cwd`, highest precedence first.
///
/// Every ancestor of `cwd` (itself included) is checked for a `.sift.toml`. The walk ends
/// early at a file with `root = true`; otherwise `~/.sift.toml` is appended last.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let path = dir.join(CONFIG_FILENAME);
        if !path.is_file() {
            continue;
        }
        let is_root = is_root_config(&path);
        debug!(path = %path.display(), is_root, "found config file");
        configs.push(path);
        if is_root {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        debug!(path = %global.display(), "found global config file");
        configs.push(global);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.sift.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Returns where `sift init` writes: the global file, or `.sift.toml` in `cwd`.
///
/// Initializing from the home directory always targets the global file.
pub fn init_config_path(cwd: &Path, global: bool) -> Result<PathBuf, ConfigError> {
    let global_path = global_config_path();
    let in_home = global_path
        .as_deref()
        .and_then(Path::parent)
        .is_some_and(|home| home == cwd);
    if global || in_home {
        global_path.ok_or(ConfigError::NoHomeDirectory)
    } else {
        Ok(cwd.join(CONFIG_FILENAME))
    }
}

/// Formats a path for display.
///
/// Paths inside `base` are shown relative to it, paths under the home directory with a `~`
/// prefix. Anything else is shown relative to `base` if given, else as is.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    let relative = base.and_then(|base| pathdiff::diff_paths(path, base));
    if let Some(relative) = &relative
        && !relative.starts_with("..")
    {
        return relative.display().to_string();
    }
    if let Some(dirs) = BaseDirs::new()
        && let Ok(rest) = path.strip_prefix(dirs.home_dir())
    {
        return Path::new("~").join(rest).display().to_string();
    }
    relative.unwrap_or_else(|| path.to_path_buf()).display().to_string()
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::TestDir;

    /// Discovered files minus the developer's own global config.
    fn local(cwd: &Path) -> Vec<PathBuf> {
        discover_config_files(cwd)
            .into_iter()
            .filter(|p| !is_global_config(p))
            .collect()
    }

    #[test]
    fn test_discover_nothing() {
        let dir = TestDir::new();
        let cwd = dir.create_dir("a/b/c");
        assert!(local(&cwd).is_empty());
    }

    #[test]
    fn test_discover_closest_first() {
        let dir = TestDir::new();
        let top = dir.create_config_at_root();
        let mid = dir.create_config("a/b");
        let leaf = dir.create_config("a/b/c/d");
        let cwd = dir.create_dir("a/b/c/d/e");

        assert_eq!(local(&cwd), vec![leaf, mid, top.clone()]);
        assert_eq!(local(dir.path()), vec![top]);
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let dir = TestDir::new();
        fs::create_dir_all(dir.path().join(CONFIG_FILENAME)).unwrap();
        let cwd = dir.create_dir("sub");
        assert!(local(&cwd).is_empty());
    }

    #[test]
    fn test_root_config_stops_discovery() {
        let dir = TestDir::new();
        dir.create_config_at_root();
        let root = dir.create_root_config("project");
        let child = dir.create_config("project/sub");

        // No parent and no global file past a root config.
        assert_eq!(
            discover_config_files(&dir.create_dir("project/src")),
            vec![root.clone()]
        );
        assert_eq!(
            discover_config_files(&dir.create_dir("project/sub/deep")),
            vec![child, root]
        );
    }

    #[test]
    fn test_root_false_does_not_stop_discovery() {
        let dir = TestDir::new();
        let top = dir.create_config_at_root();
        let mid = dir.create_config_with_content("project", "root = false\n");
        let cwd = dir.create_dir("project/src");
        assert_eq!(local(&cwd), vec![mid, top]);
    }

    #[test]
    fn test_init_config_path() {
        let dir = TestDir::new();
        assert_eq!(
            init_config_path(dir.path(), false).unwrap(),
            dir.path().join(CONFIG_FILENAME)
        );
        assert_eq!(
            init_config_path(dir.path(), true).unwrap(),
            global_config_path().unwrap()
        );
    }

    #[test]
    fn test_format_path_for_display() {
        let base = Path::new("/srv/project/sub");
        assert_eq!(
            format_path_for_display(Path::new("/srv/project/sub/.sift.toml"), Some(base)),
            ".sift.toml"
        );
        assert_eq!(
            format_path_for_display(Path::new("/srv/project/.sift.toml"), Some(base)),
            "../.sift.toml"
        );
        assert_eq!(
            format_path_for_display(Path::new("/srv/.sift.toml"), None),
            "/srv/.sift.toml"
        );
        let global = global_config_path().unwrap();
        assert_eq!(format_path_for_display(&global, None), "~/.sift.toml");
    }

    #[test]
    fn test_global_config_path() {
        let global = global_config_path().unwrap();
        assert!(global.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&global));
        assert!(!is_global_config(Path::new("/some/other/path/.sift.toml")));
    }
}
