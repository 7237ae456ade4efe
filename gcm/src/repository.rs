//! The pipeline-level repository descriptor and its clone policy.
//!
//! Group-derived and directly-configured repositories collapse into one
//! small value struct here rather than a trait object.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CloneOptions {
    pub clone_archived: bool,
    pub clone_root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Repository {
    pub name: String,
    pub ssh_url: String,
    pub path_with_namespace: String,
    pub archived: bool,
    pub clone_options: CloneOptions,
}

impl Repository {
    /// The on-disk working-copy path: `<clone-root>/<path-with-namespace>`.
    pub fn working_copy_path(&self) -> PathBuf {
        self.clone_options.clone_root.join(&self.path_with_namespace)
    }

    pub fn already_cloned(&self) -> std::io::Result<bool> {
        let git_dir = self.working_copy_path().join(".git");
        match std::fs::metadata(&git_dir) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(path_with_namespace: &str, archived: bool, clone_archived: bool) -> Repository {
        Repository {
            name: "name".into(),
            ssh_url: "git@host:name.git".into(),
            path_with_namespace: path_with_namespace.into(),
            archived,
            clone_options: CloneOptions {
                clone_archived,
                clone_root: PathBuf::from("/tmp/gcm-root"),
            },
        }
    }

    #[test]
    fn working_copy_path_joins_root_and_namespace() {
        let r = repo("grp/sub/name", false, false);
        assert_eq!(
            r.working_copy_path(),
            PathBuf::from("/tmp/gcm-root/grp/sub/name")
        );
    }

    #[test]
    fn already_cloned_false_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let r = Repository {
            clone_options: CloneOptions {
                clone_archived: false,
                clone_root: dir.path().to_path_buf(),
            },
            ..repo("grp/name", false, false)
        };
        assert!(!r.already_cloned().unwrap());
    }

    #[test]
    fn already_cloned_true_when_git_dir_present() {
        let dir = tempfile::tempdir().unwrap();
        let wc = dir.path().join("grp/name");
        std::fs::create_dir_all(wc.join(".git")).unwrap();
        let r = Repository {
            clone_options: CloneOptions {
                clone_archived: false,
                clone_root: dir.path().to_path_buf(),
            },
            ..repo("grp/name", false, false)
        };
        assert!(r.already_cloned().unwrap());
    }

    #[test]
    fn already_cloned_false_when_git_is_a_file_not_a_dir() {
        let dir = tempfile::tempdir().unwrap();
        let wc = dir.path().join("grp/name");
        std::fs::create_dir_all(&wc).unwrap();
        std::fs::write(wc.join(".git"), "gitdir: ../elsewhere").unwrap();
        let r = Repository {
            clone_options: CloneOptions {
                clone_archived: false,
                clone_root: dir.path().to_path_buf(),
            },
            ..repo("grp/name", false, false)
        };
        assert!(!r.already_cloned().unwrap());
    }
}
