//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: paths are normalized by looking at
//! their components only, so the results are the same whether or not the
//! target exists yet.

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without consulting the filesystem.
///
/// `..` at the root of an absolute path is dropped; at the start of a
/// relative path it is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    out
}

/// Reduce a user-supplied name to a relative path that cannot climb out of
/// whatever directory it is joined onto.
///
/// Root and prefix components are dropped, `.` is ignored and a `..` that
/// would leave the path is discarded.
pub fn confine(raw: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in raw.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::ParentDir => {
                out.pop();
            }
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
        }
    }

    out
}

/// Import prefix that leads from `from_dir` to `to_dir`, always `/`-separated
/// and always ending in `/`.
///
/// Both arguments are expected to be absolute and normalized.
///
/// | from            | to      | prefix     |
/// |-----------------|---------|------------|
/// | `/p/src`        | `/p/src`| `./`       |
/// | `/p/src/a/b`    | `/p/src`| `../../`   |
/// | `/p/lib`        | `/p/src`| `../src/`  |
pub fn import_prefix(from_dir: &Path, to_dir: &Path) -> String {
    let from: Vec<Component<'_>> = from_dir.components().collect();
    let to: Vec<Component<'_>> = to_dir.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    parts.extend(std::iter::repeat_n("..".to_string(), from.len() - common));
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        return "./".to_string();
    }

    let mut prefix = parts.join("/");
    prefix.push('/');
    prefix
}
