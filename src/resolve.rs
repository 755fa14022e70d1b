//! Reference resolution.

use crate::imp::{Meta, Parts, RmrRef};
use alloc::{borrow::Cow, string::String};
use log::trace;

/// Resolves a reference against a base. The base must have a scheme.
pub(crate) fn resolve(base: RmrRef<'_, '_>, /* reference */ r: RmrRef<'_, '_>) -> (String, Meta) {
    let (t_scheme, t_authority, t_path, t_query);

    let r_authority = r.authority();
    let r_path = r.path().as_str();
    let r_query = r.query();

    if let Some(r_scheme) = r.scheme_opt() {
        trace!("reference {:?} has a scheme", r.as_str());
        t_scheme = r_scheme.as_str();
        t_authority = r_authority;
        t_path = Cow::Owned(remove_dot_segments(r_path));
        t_query = r_query;
    } else {
        if r_authority.is_some() {
            trace!("reference {:?} has an authority", r.as_str());
            t_authority = r_authority;
            t_path = Cow::Owned(remove_dot_segments(r_path));
            t_query = r_query;
        } else {
            if r_path.is_empty() {
                trace!("reference {:?} has an empty path", r.as_str());
                t_path = Cow::Borrowed(base.path().as_str());
                if r_query.is_some() {
                    t_query = r_query;
                } else {
                    t_query = base.query();
                }
            } else {
                if r_path.starts_with('/') {
                    trace!("reference {:?} has an absolute path", r.as_str());
                    t_path = Cow::Owned(remove_dot_segments(r_path));
                } else {
                    let merged = merge_paths(base.path().as_str(), base.authority().is_some(), r_path);
                    trace!("reference {:?} merged into path {merged:?}", r.as_str());
                    t_path = Cow::Owned(remove_dot_segments(&merged));
                }
                t_query = r_query;
            }
            t_authority = base.authority();
        }
        t_scheme = base.scheme().as_str();
    }

    let out = Parts {
        scheme: t_scheme,
        authority: t_authority,
        path: &t_path,
        query: t_query,
        fragment: r.fragment(),
    }
    .assemble();
    trace!("resolved {:?} against {:?} into {:?}", r.as_str(), base.as_str(), out.0);
    out
}

/// Merges a rootless reference path with the path of a base.
///
/// See [Section 5.3 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.3).
pub(crate) fn merge_paths(base_path: &str, base_has_authority: bool, r_path: &str) -> String {
    if base_has_authority && base_path.is_empty() {
        return ["/", r_path].concat();
    }
    match base_path.rfind('/') {
        Some(i) => [&base_path[..=i], r_path].concat(),
        None => r_path.into(),
    }
}

const DOT: &str = ".";
const DOT_DOT: &str = "..";
const DOT_SLASH: &str = "./";
const DOT_DOT_SLASH: &str = "../";
const SLASH_DOT: &str = "/.";
const SLASH_DOT_DOT: &str = "/..";
const SLASH_DOT_SLASH: &str = "/./";
const SLASH_DOT_DOT_SLASH: &str = "/../";

/// What to do with the input at the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Skip the given number of bytes.
    Skip(usize),
    /// Remove the last output segment, then skip the given number of bytes.
    PopAndSkip(usize),
    /// Remove the last output segment, then finish with a trailing slash.
    PopAndFinishWithSlash,
    /// Finish with a trailing slash.
    FinishWithSlash,
    /// Finish without output.
    Finish,
    /// Move a segment of the given length to the output.
    Emit(usize),
}

impl Step {
    /// Classifies the remaining input, which must not be empty.
    fn of(rem: &str) -> Step {
        if rem.starts_with(DOT_SLASH) {
            Step::Skip(DOT_SLASH.len())
        } else if rem.starts_with(DOT_DOT_SLASH) {
            Step::Skip(DOT_DOT_SLASH.len())
        } else if rem.starts_with(SLASH_DOT_DOT_SLASH) {
            // Keep the trailing slash as the start of the next segment.
            Step::PopAndSkip(SLASH_DOT_DOT_SLASH.len() - 1)
        } else if rem == SLASH_DOT_DOT {
            Step::PopAndFinishWithSlash
        } else if rem.starts_with(SLASH_DOT_SLASH) {
            Step::Skip(SLASH_DOT_SLASH.len() - 1)
        } else if rem == SLASH_DOT {
            Step::FinishWithSlash
        } else if rem == DOT_DOT || rem == DOT {
            Step::Finish
        } else {
            // The segment runs up to the next slash after the cursor.
            let len = rem
                .bytes()
                .skip(1)
                .position(|x| x == b'/')
                .map_or(rem.len(), |i| i + 1);
            Step::Emit(len)
        }
    }
}

/// Removes the dot segments from a path.
///
/// See [Section 5.2.4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4).
/// A `".."` segment with nothing left to remove is dropped.
pub(crate) fn remove_dot_segments(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut i = 0;

    while i < path.len() {
        let rem = &path[i..];
        match Step::of(rem) {
            Step::Skip(n) => i += n,
            Step::PopAndSkip(n) => {
                pop_segment(&mut out);
                i += n;
            }
            Step::PopAndFinishWithSlash => {
                pop_segment(&mut out);
                out.push('/');
                break;
            }
            Step::FinishWithSlash => {
                out.push('/');
                break;
            }
            Step::Finish => break,
            Step::Emit(len) => {
                out.push_str(&rem[..len]);
                i += len;
            }
        }
    }
    out
}

/// Removes the last segment and its preceding slash from the output,
/// or clears the output if it contains no slash.
fn pop_segment(out: &mut String) {
    match out.rfind('/') {
        Some(i) => out.truncate(i),
        None => out.clear(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_priority() {
        assert_eq!(Step::of("./a"), Step::Skip(2));
        assert_eq!(Step::of("../a"), Step::Skip(3));
        assert_eq!(Step::of("/../a"), Step::PopAndSkip(3));
        assert_eq!(Step::of("/.."), Step::PopAndFinishWithSlash);
        assert_eq!(Step::of("/./a"), Step::Skip(2));
        assert_eq!(Step::of("/."), Step::FinishWithSlash);
        assert_eq!(Step::of(".."), Step::Finish);
        assert_eq!(Step::of("."), Step::Finish);
        assert_eq!(Step::of("/..a/b"), Step::Emit(4));
        assert_eq!(Step::of("a/b"), Step::Emit(1));
        assert_eq!(Step::of("/"), Step::Emit(1));
        assert_eq!(Step::of("//"), Step::Emit(1));
        assert_eq!(Step::of("/é/"), Step::Emit(3));
    }

    #[test]
    fn remove_dot_segments_examples() {
        // Examples from Section 5.2.4 of RFC 3986.
        assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
        assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");

        assert_eq!(remove_dot_segments(""), "");
        assert_eq!(remove_dot_segments("/"), "/");
        assert_eq!(remove_dot_segments("."), "");
        assert_eq!(remove_dot_segments(".."), "");
        assert_eq!(remove_dot_segments("./"), "");
        assert_eq!(remove_dot_segments("../"), "");
        assert_eq!(remove_dot_segments("/."), "/");
        assert_eq!(remove_dot_segments("/.."), "/");
        assert_eq!(remove_dot_segments("/./"), "/");
        assert_eq!(remove_dot_segments("/../"), "/");
        assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
        assert_eq!(remove_dot_segments("/a/b/."), "/a/b/");
        assert_eq!(remove_dot_segments("/a/./b/../c"), "/a/c");
        assert_eq!(remove_dot_segments("a/../b"), "/b");
        assert_eq!(remove_dot_segments("/a/.b/..c/.../"), "/a/.b/..c/.../");
        assert_eq!(remove_dot_segments("/a//../b"), "/a/b");
    }

    #[test]
    fn remove_dot_segments_clamps_at_root() {
        assert_eq!(remove_dot_segments("/b/c/../../../g"), "/g");
        assert_eq!(remove_dot_segments("/../../../g"), "/g");
        assert_eq!(remove_dot_segments("/../.."), "/");
        assert_eq!(remove_dot_segments("a/../../g"), "/g");
    }

    #[test]
    fn merge_paths_examples() {
        assert_eq!(merge_paths("/b/c/d;p", true, "g"), "/b/c/g");
        assert_eq!(merge_paths("/b/c/", true, "g"), "/b/c/g");
        assert_eq!(merge_paths("", true, "g"), "/g");
        assert_eq!(merge_paths("", false, "g"), "g");
        assert_eq!(merge_paths("bar", false, "baz"), "baz");
        assert_eq!(merge_paths("a/b", false, "c"), "a/c");
        assert_eq!(merge_paths("/", true, "../g"), "/../g");
    }
}
