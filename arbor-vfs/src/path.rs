use crate::error::FsError;

// ── Constants ───────────────────────────────────────────────────────────────

pub const SEPARATOR: char = '/';
pub const ROOT_PATH: &str = "/";

// ── Path prefix ─────────────────────────────────────────────────────────────

/// Where resolution of a parsed path begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The path started with `/`.
    Root,
    /// Resolve from the caller-supplied directory (usually the cwd).
    Current,
}

/// A path string broken into its navigation parts.
///
/// `ups` counts the leading `..` steps; `segments` are the literal names that
/// follow them. Nothing here looks at the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefix {
    pub anchor: Anchor,
    pub ups: usize,
    pub segments: Vec<String>,
}

// ── Path functions ──────────────────────────────────────────────────────────

/// Parse a shell path into anchor, up-count and remaining segments.
///
/// Leading `./` runs are skipped and leading `../` runs are counted. The rest
/// is split on `/` with empty and `.` segments dropped; a `..` found after the
/// first real segment is kept as a literal name.
pub fn parse_path(path: &str) -> Result<PathPrefix, FsError> {
    if path.is_empty() {
        return Err(FsError::InvalidPath("Path cannot be empty".to_string()));
    }

    let (anchor, mut rest) = match path.strip_prefix(SEPARATOR) {
        Some(stripped) => (Anchor::Root, stripped),
        None => (Anchor::Current, path),
    };

    let mut ups = 0;
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("../") {
            ups += 1;
            rest = stripped;
        } else if rest == ".." {
            ups += 1;
            rest = "";
        } else if rest == "." {
            rest = "";
        } else {
            break;
        }
    }

    Ok(PathPrefix {
        anchor,
        ups,
        segments: split_segments(rest),
    })
}

/// Split on `/`, dropping empty and `.` segments.
pub fn split_segments(path: &str) -> Vec<String> {
    path.split(SEPARATOR)
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}

/// Join names into an absolute path. An empty slice is the root.
pub fn join_absolute<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return ROOT_PATH.to_string();
    }
    let mut out = String::new();
    for name in names {
        out.push(SEPARATOR);
        out.push_str(name.as_ref());
    }
    out
}

/// Check that `name` can be used for a single directory entry.
pub fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() || name.starts_with('.') || name.contains(SEPARATOR) {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ── parse_path ──────────────────────────────────────────────────────

    #[test]
    fn empty_path_is_rejected() {
        let err = parse_path("").unwrap_err();
        assert!(matches!(err, FsError::InvalidPath(_)));
    }

    #[test]
    fn plain_relative_path() {
        let p = parse_path("foo/bar").unwrap();
        assert_eq!(p.anchor, Anchor::Current);
        assert_eq!(p.ups, 0);
        assert_eq!(p.segments, segs(&["foo", "bar"]));
    }

    #[test]
    fn root_alone() {
        let p = parse_path("/").unwrap();
        assert_eq!(p.anchor, Anchor::Root);
        assert!(p.segments.is_empty());
    }

    #[test]
    fn root_with_dotdots_stays_rooted() {
        let p = parse_path("/../../.").unwrap();
        assert_eq!(p.anchor, Anchor::Root);
        assert_eq!(p.ups, 2);
        assert!(p.segments.is_empty());
    }

    #[test]
    fn mixed_leading_dots_are_counted() {
        let p = parse_path(".././../../file.txt").unwrap();
        assert_eq!(p.anchor, Anchor::Current);
        assert_eq!(p.ups, 3);
        assert_eq!(p.segments, segs(&["file.txt"]));
    }

    #[test]
    fn trailing_dotdot_counts() {
        let p = parse_path("../..").unwrap();
        assert_eq!(p.ups, 2);
        assert!(p.segments.is_empty());
    }

    #[test]
    fn single_dot_is_current() {
        let p = parse_path(".").unwrap();
        assert_eq!(p.anchor, Anchor::Current);
        assert_eq!(p.ups, 0);
        assert!(p.segments.is_empty());
    }

    #[test]
    fn inner_dot_segments_are_dropped() {
        let a = parse_path("./a/./b").unwrap();
        let b = parse_path("a/b").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn inner_dotdot_is_literal() {
        let p = parse_path("a/../b").unwrap();
        assert_eq!(p.ups, 0);
        assert_eq!(p.segments, segs(&["a", "..", "b"]));
    }

    #[test]
    fn double_and_trailing_slashes_collapse() {
        let p = parse_path("/a//b/").unwrap();
        assert_eq!(p.anchor, Anchor::Root);
        assert_eq!(p.segments, segs(&["a", "b"]));
    }

    #[test]
    fn dot_prefixed_name_is_not_a_traversal() {
        let p = parse_path("..hidden").unwrap();
        assert_eq!(p.ups, 0);
        assert_eq!(p.segments, segs(&["..hidden"]));
    }

    // ── join_absolute ───────────────────────────────────────────────────

    #[test]
    fn join_empty_is_root() {
        let empty: [&str; 0] = [];
        assert_eq!(join_absolute(&empty), "/");
    }

    #[test]
    fn join_nested() {
        assert_eq!(join_absolute(&["a", "b", "c"]), "/a/b/c");
    }

    // ── validate_name ───────────────────────────────────────────────────

    #[test]
    fn valid_names() {
        assert!(validate_name("docs").is_ok());
        assert!(validate_name("notes.txt").is_ok());
    }

    #[test]
    fn invalid_names() {
        for bad in ["", ".git", "..", "a/b", "/"] {
            let err = validate_name(bad).unwrap_err();
            assert!(matches!(err, FsError::InvalidName(_)), "{bad:?} accepted");
        }
    }
}
