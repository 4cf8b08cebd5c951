//! Path conventions for the install root and remote skill paths.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::runtime::Runtime;

/// Default install root: `~/.skillsync/skills`.
pub fn default_install_root<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let home = runtime
        .home_dir()
        .context("Could not determine home directory")?;
    Ok(home.join(".skillsync").join("skills"))
}

/// Fully-qualified remote paths for the given skill names.
pub fn remote_paths(path: &str, names: &[String]) -> Vec<String> {
    let normalized = path.trim_matches('/');
    names
        .iter()
        .map(|name| {
            if normalized.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", normalized, name)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    #[test]
    fn test_default_install_root() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_home_dir()
            .returning(|| Some(PathBuf::from("/home/user")));

        let root = default_install_root(&runtime).unwrap();
        assert_eq!(root, PathBuf::from("/home/user/.skillsync/skills"));
    }

    #[test]
    fn test_default_install_root_without_home_fails() {
        let mut runtime = MockRuntime::new();
        runtime.expect_home_dir().returning(|| None);

        assert!(default_install_root(&runtime).is_err());
    }

    #[test]
    fn test_remote_paths_with_prefix() {
        let names = vec!["alpha".to_string(), "beta".to_string()];
        assert_eq!(
            remote_paths("skills", &names),
            vec!["skills/alpha", "skills/beta"]
        );
        assert_eq!(
            remote_paths("/skills/", &names),
            vec!["skills/alpha", "skills/beta"]
        );
    }

    #[test]
    fn test_remote_paths_without_prefix() {
        let names = vec!["alpha".to_string()];
        assert_eq!(remote_paths("", &names), vec!["alpha"]);
        assert_eq!(remote_paths("/", &names), vec!["alpha"]);
    }
}
