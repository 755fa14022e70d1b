//! Direct construction of URIs from components.

use crate::{
    component::Authority,
    imp::{AuthMeta, Parts},
    Uri,
};
use alloc::{format, string::String};
use core::fmt;

/// An error occurred when building a URI.
///
/// Each variant names a component that would not read back as itself
/// once the URI is serialized and parsed again.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// The scheme is empty.
    EmptyScheme,
    /// The scheme starts with `'.'` or contains `':'`.
    InvalidScheme,
    /// The host contains `'/'`, `'?'`, `'#'` or `'@'`, or a `':'` outside of
    /// an IP literal, or starts with `'['` without a matching `']'`.
    InvalidHost,
    /// An authority is present and the path is neither empty nor starting with `'/'`.
    PathNotAbsolute,
    /// No authority is present and the path starts with `"//"`.
    PathStartsWithDoubleSlash,
    /// The path contains `'?'` or `'#'`.
    InvalidPath,
    /// The query contains `'#'`.
    InvalidQuery,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::EmptyScheme => "scheme is empty",
            Self::InvalidScheme => "scheme starts with a dot or contains a colon",
            Self::InvalidHost => "host contains a delimiter",
            Self::PathNotAbsolute => "path must start with '/' when an authority is present",
            Self::PathStartsWithDoubleSlash => {
                "path cannot start with \"//\" when no authority is present"
            }
            Self::InvalidPath => "path contains '?' or '#'",
            Self::InvalidQuery => "query contains '#'",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for BuildError {}

impl Uri<String> {
    /// Builds a URI from its components, without a port.
    ///
    /// The authority consists of the host alone and is omitted when the host is empty.
    ///
    /// Components are taken as they are, with no encoding. A component that
    /// would not read back as itself is rejected, so that parsing the output
    /// always yields the same components.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any component would not read back as itself.
    /// See [`BuildError`] for the exact rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use loose_uri::{BuildError, Uri};
    ///
    /// let uri = Uri::build("http", "example.com", "/index.html", Some("lang=en"), None)?;
    /// assert_eq!(uri.as_str(), "http://example.com/index.html?lang=en");
    /// assert_eq!(uri.authority().unwrap().port(), None);
    ///
    /// let uri = Uri::build("mailto", "", "user@example.com", None, None)?;
    /// assert_eq!(uri.as_str(), "mailto:user@example.com");
    ///
    /// // "?" would start a query.
    /// assert_eq!(
    ///     Uri::build("http", "a", "/p?x", None, None),
    ///     Err(BuildError::InvalidPath)
    /// );
    /// # Ok::<_, loose_uri::BuildError>(())
    /// ```
    pub fn build(
        scheme: &str,
        host: &str,
        path: &str,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<Self, BuildError> {
        let authority = (!host.is_empty()).then(|| {
            Authority::new(
                host,
                AuthMeta {
                    host_bounds: (0, host.len()),
                    port: None,
                },
            )
        });
        build(scheme, authority, path, query, fragment)
    }

    /// Builds a URI from its components, with an explicit port.
    ///
    /// The authority is `host ":" port` and is present even when the host is empty.
    ///
    /// The port is a `u16`, the same range that parsing accepts: port text
    /// beyond `65535` fails to parse with
    /// [`InvalidPort`](crate::ParseErrorKind::InvalidPort).
    ///
    /// # Errors
    ///
    /// Returns `Err` if any component would not read back as itself.
    /// See [`BuildError`] for the exact rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use loose_uri::Uri;
    ///
    /// let uri = Uri::build_with_port("http", "www.bla.com", 8080, "/p/a/t/h", Some("q=y"), Some("f"))?;
    /// assert_eq!(uri.as_str(), "http://www.bla.com:8080/p/a/t/h?q=y#f");
    ///
    /// let auth = uri.authority().unwrap();
    /// assert_eq!(auth.host(), "www.bla.com");
    /// assert_eq!(auth.port(), Some(8080));
    /// # Ok::<_, loose_uri::BuildError>(())
    /// ```
    pub fn build_with_port(
        scheme: &str,
        host: &str,
        port: u16,
        path: &str,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<Self, BuildError> {
        let auth = format!("{host}:{port}");
        let authority = Authority::new(
            &auth,
            AuthMeta {
                host_bounds: (0, host.len()),
                port: Some(port),
            },
        );
        build(scheme, Some(authority), path, query, fragment)
    }
}

fn build(
    scheme: &str,
    authority: Option<Authority<'_>>,
    path: &str,
    query: Option<&str>,
    fragment: Option<&str>,
) -> Result<Uri<String>, BuildError> {
    if scheme.is_empty() {
        return Err(BuildError::EmptyScheme);
    }
    if scheme.starts_with('.') || scheme.contains(':') {
        return Err(BuildError::InvalidScheme);
    }

    if let Some(authority) = authority {
        if !is_valid_host(authority.host()) {
            return Err(BuildError::InvalidHost);
        }
        if !path.is_empty() && !path.starts_with('/') {
            return Err(BuildError::PathNotAbsolute);
        }
    } else if path.starts_with("//") {
        return Err(BuildError::PathStartsWithDoubleSlash);
    }
    if path.contains(['?', '#']) {
        return Err(BuildError::InvalidPath);
    }
    if query.is_some_and(|q| q.contains('#')) {
        return Err(BuildError::InvalidQuery);
    }

    let (val, meta) = Parts {
        scheme,
        authority,
        path,
        query,
        fragment,
    }
    .assemble();
    Ok(Uri { val, meta })
}

/// Checks that a host reads back as itself from an authority.
fn is_valid_host(host: &str) -> bool {
    if host.contains(['/', '?', '#', '@']) {
        return false;
    }
    if host.starts_with('[') {
        // The port colon is searched from the first ']'.
        match host.find(']') {
            Some(i) => !host[i..].contains(':'),
            None => false,
        }
    } else {
        !host.contains(':')
    }
}
