use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive entry name against the extraction directory.
///
/// The lexically cleaned result must be a strict descendant of the cleaned
/// `base`. Parent-directory traversal, absolute names and names resolving to
/// `base` itself are rejected with [`Error::ZipSlip`].
pub fn sanitize_entry_path<P: AsRef<Path>, B: AsRef<Path>>(entry: P, base: B) -> Result<PathBuf> {
    let entry = entry.as_ref();
    let base = clean(base.as_ref());

    // `join` would silently replace the base with an absolute entry
    if entry.has_root() {
        return Err(Error::ZipSlip {
            entry: entry.to_path_buf(),
            resolved: clean(entry),
        });
    }

    let resolved = clean(&base.join(entry));
    if resolved == base || !resolved.starts_with(&base) {
        return Err(Error::ZipSlip {
            entry: entry.to_path_buf(),
            resolved,
        });
    }

    Ok(resolved)
}

/// Lexical cleanup: drops `.`, folds `name/..`, keeps leading `..` of
/// relative paths and swallows `..` directly under the root.
fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    out.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_base_path() -> &'static Path {
        if cfg!(windows) {
            Path::new("C:/opt/myapp")
        } else {
            Path::new("/opt/myapp")
        }
    }

    #[test]
    fn nested_entry_resolves_under_base() {
        let resolved = sanitize_entry_path("linux-amd64/bin/tool", test_base_path()).unwrap();
        assert_eq!(
            resolved.strip_prefix(test_base_path()).unwrap(),
            Path::new("linux-amd64/bin/tool")
        );
    }

    #[test]
    fn inner_parent_components_that_stay_inside_are_allowed() {
        let resolved = sanitize_entry_path("a/b/../c", test_base_path()).unwrap();
        assert_eq!(resolved, test_base_path().join("a/c"));
    }

    #[test]
    fn zip_slip_protection() {
        for entry in ["../evil", "a/../../evil", "./../evil", "a/../.."] {
            assert!(
                matches!(
                    sanitize_entry_path(entry, test_base_path()),
                    Err(Error::ZipSlip { .. })
                ),
                "{entry} should be rejected"
            );
        }
    }

    #[test]
    fn sibling_with_common_prefix_is_rejected() {
        let result = sanitize_entry_path("../myapp-evil/x", test_base_path());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn absolute_entry_is_rejected() {
        let malicious = if cfg!(windows) { "C:\\etc\\passwd" } else { "/etc/passwd" };
        let result = sanitize_entry_path(malicious, test_base_path());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn entry_resolving_to_base_is_rejected() {
        for entry in ["", ".", "./", "a/.."] {
            assert!(matches!(
                sanitize_entry_path(entry, test_base_path()),
                Err(Error::ZipSlip { .. })
            ));
        }
    }

    #[test]
    fn relative_base_keeps_leading_parent_components() {
        assert!(sanitize_entry_path("../../staging/x", "staging").is_err());
        assert_eq!(
            sanitize_entry_path("x", "./staging").unwrap(),
            Path::new("staging/x")
        );
    }

    #[test]
    fn cleaning() {
        assert_eq!(clean(Path::new("foo//bar/./baz/../qux")), Path::new("foo/bar/qux"));
        assert_eq!(clean(Path::new("../a/../b")), Path::new("../b"));
        assert_eq!(clean(Path::new("/../etc")), Path::new("/etc"));
    }
}
