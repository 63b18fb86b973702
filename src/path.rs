use std::env;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};

use tracing::{debug, warn};

/// Turns a user supplied path into an absolute one.
///
/// Relative input is anchored at the current working directory. The result is
/// normalized lexically; symlinks are left as they are and nonexistent paths are
/// accepted, so checking that the target exists is up to the caller.
pub fn resolve(user_path: &str) -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|err| {
        warn!("cannot read current directory ({err}), anchoring at filesystem root");
        PathBuf::from(MAIN_SEPARATOR_STR)
    });
    let resolved = resolve_from(&cwd, user_path);
    debug!(input = user_path, resolved = %resolved.display(), "resolved path");
    resolved
}

/// Same as [`resolve`] with an explicit base directory instead of the process cwd.
pub fn resolve_from(base: &Path, user_path: &str) -> PathBuf {
    let path = Path::new(user_path);
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Collapses `.` and `..` segments and redundant separators without touching the
/// filesystem. `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_is_only_normalized() {
        let base = Path::new("/work");
        assert_eq!(
            resolve_from(base, "/data/scans/page.png"),
            PathBuf::from("/data/scans/page.png")
        );
        assert_eq!(
            resolve_from(base, "/data//scans/./tmp/../page.png"),
            PathBuf::from("/data/scans/page.png")
        );
    }

    #[test]
    fn relative_path_is_anchored_at_base() {
        let base = Path::new("/home/user/project");
        assert_eq!(
            resolve_from(base, "images/a.jpg"),
            PathBuf::from("/home/user/project/images/a.jpg")
        );
        assert_eq!(
            resolve_from(base, "./images/a.jpg"),
            PathBuf::from("/home/user/project/images/a.jpg")
        );
        assert_eq!(
            resolve_from(base, "../shared/a.jpg"),
            PathBuf::from("/home/user/shared/a.jpg")
        );
    }

    #[test]
    fn empty_input_resolves_to_base() {
        assert_eq!(resolve_from(Path::new("/srv/ocr"), ""), PathBuf::from("/srv/ocr"));
    }

    #[test]
    fn parent_segments_stop_at_root() {
        assert_eq!(
            resolve_from(Path::new("/a"), "../../../b.png"),
            PathBuf::from("/b.png")
        );
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn normalize_keeps_leading_parents_of_relative_paths() {
        assert_eq!(normalize(Path::new("../x/./y/..")), PathBuf::from("../x"));
    }

    #[test]
    fn resolve_uses_current_directory() {
        let cwd = env::current_dir().unwrap();
        let resolved = resolve("some/relative/file.png");
        assert!(resolved.is_absolute());
        assert_eq!(resolved, normalize(&cwd.join("some/relative/file.png")));
    }

    #[test]
    fn nonexistent_paths_are_accepted() {
        let resolved = resolve("/definitely/not/here.png");
        assert_eq!(resolved, PathBuf::from("/definitely/not/here.png"));
    }
}
