#![allow(missing_debug_implementations)]

use crate::{
    component::{Authority, Path, Scheme},
    parse::{self, ParseError},
    resolve,
};
use alloc::{borrow::ToOwned, string::String};
use borrow_or_share::{BorrowOrShare, Bos};
use core::{borrow::Borrow, fmt, hash, num::NonZeroUsize, str::FromStr};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub struct Constraints {
    pub scheme_required: bool,
}

pub trait RiMaybeRef: Sized {
    type Val;

    const CONSTRAINTS: Constraints;

    fn new(val: Self::Val, meta: Meta) -> Self;
}

pub trait Parse {
    type Val;
    type Err;

    fn parse<R: RiMaybeRef<Val = Self::Val>>(self) -> Result<R, Self::Err>;
}

impl<'a> Parse for &'a str {
    type Val = &'a str;
    type Err = ParseError;

    fn parse<R: RiMaybeRef<Val = Self::Val>>(self) -> Result<R, Self::Err> {
        parse::parse(self.as_bytes(), R::CONSTRAINTS).map(|meta| R::new(self, meta))
    }
}

impl Parse for String {
    type Val = Self;
    type Err = (ParseError, Self);

    fn parse<R: RiMaybeRef<Val = Self::Val>>(self) -> Result<R, Self::Err> {
        match parse::parse(self.as_bytes(), R::CONSTRAINTS) {
            Ok(meta) => Ok(R::new(self, meta)),
            Err(e) => Err((e, self)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Meta {
    // The index of the trailing colon.
    pub scheme_end: Option<NonZeroUsize>,
    pub auth_meta: Option<AuthMeta>,
    pub path_bounds: (usize, usize),
    // One byte past the last byte of query.
    pub query_end: Option<NonZeroUsize>,
}

impl Meta {
    #[inline]
    pub fn query_or_path_end(&self) -> usize {
        self.query_end.map_or(self.path_bounds.1, |i| i.get())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthMeta {
    pub host_bounds: (usize, usize),
    pub port: Option<u16>,
}

macro_rules! cond {
    (if true { $($then:tt)* } else { $($else:tt)* }) => { $($then)* };
    (if false { $($then:tt)* } else { $($else:tt)* }) => { $($else)* };
}

macro_rules! ri_maybe_ref {
    (
        Type = $Ty:ident,
        type_name = $ty:literal,
        variable_name = $var:literal,
        name = $name:literal,
        description = $desc:literal,
        scheme_required = $scheme_required:tt,
        example_input = $example:literal,
    ) => {
        #[doc = $desc]
        ///
        /// # Variants
        ///
        #[doc = concat!("Two variants of `", $ty, "` are available: ")]
        #[doc = concat!("`", $ty, "<&str>` (borrowed) and `", $ty, "<String>` (owned).")]
        ///
        #[doc = concat!("`", $ty, "<&'a str>`")]
        /// outputs references with lifetime `'a` where possible
        /// (thanks to [`borrow-or-share`](borrow_or_share)):
        ///
        /// ```
        #[doc = concat!("use loose_uri::", $ty, ";")]
        ///
        #[doc = concat!("// Keep a reference to the path after dropping the `", $ty, "`.")]
        #[doc = concat!("let path = ", $ty, "::parse(\"foo:bar\")?.path();")]
        /// assert_eq!(path, "bar");
        /// # Ok::<_, loose_uri::ParseError>(())
        /// ```
        ///
        /// # Comparison
        ///
        #[doc = concat!("Two `", $ty, "`s are equal if their scheme, authority (userinfo, host and port), ")]
        /// path and query are equal. The fragment is **not** compared, since two
        /// references that differ only by fragment identify the same resource.
        /// Normalization is **not** performed prior to comparison.
        ///
        /// # Examples
        ///
        #[doc = concat!("Parse and extract components from a ", $name, ":")]
        ///
        /// ```
        #[doc = concat!("use loose_uri::", $ty, ";")]
        ///
        #[doc = concat!("let ", $var, " = ", $ty, "::parse(\"", $example, "\")?;")]
        ///
        #[doc = concat!("let auth = ", $var, ".authority().unwrap();")]
        /// assert_eq!(auth.as_str(), "user@example.com:8042");
        /// assert_eq!(auth.userinfo(), Some("user"));
        /// assert_eq!(auth.host(), "example.com");
        /// assert_eq!(auth.port(), Some(8042));
        ///
        #[doc = concat!("assert_eq!(", $var, ".path(), \"/over/there\");")]
        #[doc = concat!("assert_eq!(", $var, ".query(), Some(\"name=ferret\"));")]
        #[doc = concat!("assert_eq!(", $var, ".fragment(), Some(\"nose\"));")]
        /// # Ok::<_, loose_uri::ParseError>(())
        /// ```
        #[derive(Clone, Copy)]
        pub struct $Ty<T> {
            /// Value of the URI (reference).
            pub(crate) val: T,
            /// Metadata of the URI (reference).
            pub(crate) meta: Meta,
        }

        impl<T> RiMaybeRef for $Ty<T> {
            type Val = T;

            const CONSTRAINTS: Constraints = Constraints {
                scheme_required: $scheme_required,
            };

            fn new(val: T, meta: Meta) -> Self {
                Self { val, meta }
            }
        }

        impl<T> $Ty<T> {
            #[doc = concat!("Parses a ", $name, " from a string into a `", $ty, "`.")]
            ///
            /// The return type is
            ///
            #[doc = concat!("- `Result<", $ty, "<&str>, ParseError>` for `I = &str`;")]
            #[doc = concat!("- `Result<", $ty, "<String>, (ParseError, String)>` for `I = String`.")]
            ///
            /// # Errors
            ///
            /// Returns `Err` if the structural delimiters of the string are malformed.
            /// See [`ParseErrorKind`](crate::ParseErrorKind) for the possible causes.
            pub fn parse<I>(input: I) -> Result<Self, I::Err>
            where
                I: Parse<Val = T>,
            {
                input.parse()
            }
        }

        impl $Ty<String> {
            #[doc = concat!("Borrows this `", $ty, "<String>` as `", $ty, "<&str>`.")]
            #[allow(clippy::should_implement_trait)]
            #[inline]
            #[must_use]
            pub fn borrow(&self) -> $Ty<&str> {
                $Ty {
                    val: &self.val,
                    meta: self.meta,
                }
            }

            #[doc = concat!("Consumes this `", $ty, "<String>` and yields the underlying [`String`].")]
            #[inline]
            #[must_use]
            pub fn into_string(self) -> String {
                self.val
            }
        }

        impl $Ty<&str> {
            #[doc = concat!("Creates a new `", $ty, "<String>` by cloning the contents of this `", $ty, "<&str>`.")]
            #[inline]
            #[must_use]
            pub fn to_owned(&self) -> $Ty<String> {
                $Ty {
                    val: self.val.to_owned(),
                    meta: self.meta,
                }
            }
        }

        impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> $Ty<T> {
            pub(crate) fn make_ref(&'i self) -> RmrRef<'o, 'i> {
                RmrRef::new(self.as_str(), &self.meta)
            }

            #[doc = concat!("Returns the ", $name, " as a string slice.")]
            ///
            /// This is also its serialization:
            /// `scheme ":" ["//" authority] path ["?" query] ["#" fragment]`.
            #[must_use]
            pub fn as_str(&'i self) -> &'o str {
                self.val.borrow_or_share()
            }

            cond!(if $scheme_required {
                /// Returns the [scheme] component.
                ///
                /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
                #[must_use]
                pub fn scheme(&'i self) -> &'o Scheme {
                    self.make_ref().scheme()
                }
            } else {
                /// Returns the optional [scheme] component.
                ///
                /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
                ///
                /// # Examples
                ///
                /// ```
                #[doc = concat!("use loose_uri::", $ty, ";")]
                ///
                #[doc = concat!("let ", $var, " = ", $ty, "::parse(\"http://example.com/\")?;")]
                #[doc = concat!("assert_eq!(", $var, ".scheme().unwrap(), \"http\");")]
                ///
                #[doc = concat!("let ", $var, " = ", $ty, "::parse(\"/path/to/file\")?;")]
                #[doc = concat!("assert_eq!(", $var, ".scheme(), None);")]
                /// # Ok::<_, loose_uri::ParseError>(())
                /// ```
                #[must_use]
                pub fn scheme(&'i self) -> Option<&'o Scheme> {
                    self.make_ref().scheme_opt()
                }

                /// Checks whether a scheme component is present.
                #[must_use]
                pub fn has_scheme(&self) -> bool {
                    self.meta.scheme_end.is_some()
                }
            });

            /// Returns the optional [authority] component.
            ///
            /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
            ///
            /// # Examples
            ///
            /// ```
            #[doc = concat!("use loose_uri::", $ty, ";")]
            ///
            #[doc = concat!("let ", $var, " = ", $ty, "::parse(\"http://example.com/\")?;")]
            #[doc = concat!("assert!(", $var, ".authority().is_some());")]
            ///
            #[doc = concat!("let ", $var, " = ", $ty, "::parse(\"mailto:user@example.com\")?;")]
            #[doc = concat!("assert!(", $var, ".authority().is_none());")]
            /// # Ok::<_, loose_uri::ParseError>(())
            /// ```
            #[must_use]
            pub fn authority(&'i self) -> Option<Authority<'o>> {
                self.make_ref().authority()
            }

            /// Returns the [path] component.
            ///
            /// The path component is always present, although it may be empty.
            ///
            /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
            #[must_use]
            pub fn path(&'i self) -> &'o Path {
                self.make_ref().path()
            }

            /// Returns the optional [query] component.
            ///
            /// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
            ///
            /// # Examples
            ///
            /// ```
            #[doc = concat!("use loose_uri::", $ty, ";")]
            ///
            #[doc = concat!("let ", $var, " = ", $ty, "::parse(\"http://example.com/?lang=en\")?;")]
            #[doc = concat!("assert_eq!(", $var, ".query(), Some(\"lang=en\"));")]
            ///
            #[doc = concat!("let ", $var, " = ", $ty, "::parse(\"ftp://192.0.2.1/\")?;")]
            #[doc = concat!("assert_eq!(", $var, ".query(), None);")]
            /// # Ok::<_, loose_uri::ParseError>(())
            /// ```
            #[must_use]
            pub fn query(&'i self) -> Option<&'o str> {
                self.make_ref().query()
            }

            /// Returns the optional [fragment] component.
            ///
            /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
            #[must_use]
            pub fn fragment(&'i self) -> Option<&'o str> {
                self.make_ref().fragment()
            }

            /// Checks whether an authority component is present.
            #[must_use]
            pub fn has_authority(&self) -> bool {
                self.meta.auth_meta.is_some()
            }

            /// Checks whether a query component is present.
            #[must_use]
            pub fn has_query(&self) -> bool {
                self.meta.query_end.is_some()
            }

            /// Checks whether a fragment component is present.
            #[must_use]
            pub fn has_fragment(&'i self) -> bool {
                self.make_ref().has_fragment()
            }

            #[doc = concat!("Returns the ", $name, " with the fragment and its preceding `'#'` removed.")]
            ///
            /// # Examples
            ///
            /// ```
            #[doc = concat!("use loose_uri::", $ty, ";")]
            ///
            #[doc = concat!("let ", $var, " = ", $ty, "::parse(\"http://example.com/#title1\")?;")]
            #[doc = concat!("assert_eq!(", $var, ".strip_fragment(), \"http://example.com/\");")]
            /// # Ok::<_, loose_uri::ParseError>(())
            /// ```
            #[must_use]
            pub fn strip_fragment(&'i self) -> &'o str {
                self.make_ref().strip_fragment()
            }
        }

        impl<T: Bos<str>, U: Bos<str>> PartialEq<$Ty<U>> for $Ty<T> {
            fn eq(&self, other: &$Ty<U>) -> bool {
                self.make_ref().eq_ignoring_fragment(other.make_ref())
            }
        }

        impl<T: Bos<str>> Eq for $Ty<T> {}

        impl<T: Bos<str>> hash::Hash for $Ty<T> {
            fn hash<H: hash::Hasher>(&self, state: &mut H) {
                self.make_ref().hash_ignoring_fragment(state);
            }
        }

        impl<T: Bos<str>> AsRef<str> for $Ty<T> {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl<T: Bos<str>> Borrow<str> for $Ty<T> {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl<'a> TryFrom<&'a str> for $Ty<&'a str> {
            type Error = ParseError;

            #[inline]
            fn try_from(value: &'a str) -> Result<Self, Self::Error> {
                $Ty::parse(value)
            }
        }

        impl TryFrom<String> for $Ty<String> {
            type Error = (ParseError, String);

            #[inline]
            fn try_from(value: String) -> Result<Self, Self::Error> {
                $Ty::parse(value)
            }
        }

        impl<'a> From<$Ty<&'a str>> for &'a str {
            #[inline]
            fn from(value: $Ty<&'a str>) -> &'a str {
                value.val
            }
        }

        impl From<$Ty<String>> for String {
            #[inline]
            fn from(value: $Ty<String>) -> String {
                value.val
            }
        }

        impl From<$Ty<&str>> for $Ty<String> {
            #[inline]
            fn from(value: $Ty<&str>) -> Self {
                value.to_owned()
            }
        }

        impl FromStr for $Ty<String> {
            type Err = ParseError;

            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $Ty::parse(s).map(|r| r.to_owned())
            }
        }

        impl<T: Bos<str>> fmt::Debug for $Ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct($ty)
                    .field("scheme", &self.scheme())
                    .field("authority", &self.authority())
                    .field("path", &self.path())
                    .field("query", &self.query())
                    .field("fragment", &self.fragment())
                    .finish()
            }
        }

        impl<T: Bos<str>> fmt::Display for $Ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self.as_str(), f)
            }
        }

        #[cfg(feature = "serde")]
        impl<T: Bos<str>> Serialize for $Ty<T> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> Deserialize<'de> for $Ty<&'de str> {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = <&str>::deserialize(deserializer)?;
                $Ty::parse(s).map_err(|e| {
                    de::Error::custom(format_args!("failed to parse {s:?} as {}: {e}", $name))
                })
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> Deserialize<'de> for $Ty<String> {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $Ty::parse(s).map_err(|(e, s)| {
                    de::Error::custom(format_args!("failed to parse {s:?} as {}: {e}", $name))
                })
            }
        }
    };
}

/// A borrowed view of a URI (reference) and its metadata.
#[derive(Clone, Copy)]
pub struct RmrRef<'v, 'm> {
    val: &'v str,
    meta: &'m Meta,
}

impl<'v, 'm> RmrRef<'v, 'm> {
    pub fn new(val: &'v str, meta: &'m Meta) -> Self {
        Self { val, meta }
    }

    pub fn as_str(self) -> &'v str {
        self.val
    }

    fn slice(self, start: usize, end: usize) -> &'v str {
        &self.val[start..end]
    }

    pub fn scheme_opt(self) -> Option<&'v Scheme> {
        let end = self.meta.scheme_end?.get();
        Some(Scheme::new_validated(self.slice(0, end)))
    }

    pub fn scheme(self) -> &'v Scheme {
        let end = self.meta.scheme_end.map_or(0, |i| i.get());
        Scheme::new_validated(self.slice(0, end))
    }

    pub fn authority(self) -> Option<Authority<'v>> {
        let mut meta = self.meta.auth_meta?;
        let start = match self.meta.scheme_end {
            Some(i) => i.get() + 3,
            None => 2,
        };
        let end = self.meta.path_bounds.0;

        meta.host_bounds.0 -= start;
        meta.host_bounds.1 -= start;

        Some(Authority::new(self.slice(start, end), meta))
    }

    pub fn path(self) -> &'v Path {
        Path::new_validated(self.slice(self.meta.path_bounds.0, self.meta.path_bounds.1))
    }

    pub fn query(self) -> Option<&'v str> {
        let end = self.meta.query_end?.get();
        Some(self.slice(self.meta.path_bounds.1 + 1, end))
    }

    fn fragment_start(self) -> Option<usize> {
        Some(self.meta.query_or_path_end())
            .filter(|&i| i != self.val.len())
            .map(|i| i + 1)
    }

    pub fn fragment(self) -> Option<&'v str> {
        self.fragment_start()
            .map(|i| self.slice(i, self.val.len()))
    }

    pub fn has_fragment(self) -> bool {
        self.meta.query_or_path_end() != self.val.len()
    }

    pub fn strip_fragment(self) -> &'v str {
        &self.val[..self.meta.query_or_path_end()]
    }

    pub fn eq_ignoring_fragment(self, other: RmrRef<'_, '_>) -> bool {
        self.scheme_opt() == other.scheme_opt()
            && self.authority() == other.authority()
            && self.path() == other.path()
            && self.query() == other.query()
    }

    pub fn hash_ignoring_fragment<H: hash::Hasher>(self, state: &mut H) {
        use hash::Hash;

        self.scheme_opt().hash(state);
        self.authority().map(|a| a.as_str()).hash(state);
        self.path().hash(state);
        self.query().hash(state);
    }
}

/// Components of a URI to be written out, borrowed from elsewhere.
pub struct Parts<'a> {
    pub scheme: &'a str,
    pub authority: Option<Authority<'a>>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl Parts<'_> {
    /// Serializes the parts and computes the metadata of the output.
    pub fn assemble(&self) -> (String, Meta) {
        let mut len = self.scheme.len() + 1;
        if let Some(authority) = self.authority {
            len += authority.as_str().len() + 2;
        }
        len += self.path.len();
        if let Some(query) = self.query {
            len += query.len() + 1;
        }
        if let Some(fragment) = self.fragment {
            len += fragment.len() + 1;
        }

        let mut buf = String::with_capacity(len);
        let mut meta = Meta::default();

        buf.push_str(self.scheme);
        meta.scheme_end = NonZeroUsize::new(buf.len());
        buf.push(':');

        if let Some(authority) = self.authority {
            let mut auth_meta = authority.meta();
            buf.push_str("//");

            auth_meta.host_bounds.0 += buf.len();
            auth_meta.host_bounds.1 += buf.len();

            buf.push_str(authority.as_str());
            meta.auth_meta = Some(auth_meta);
        }

        meta.path_bounds.0 = buf.len();
        buf.push_str(self.path);
        meta.path_bounds.1 = buf.len();

        if let Some(query) = self.query {
            buf.push('?');
            buf.push_str(query);
            meta.query_end = NonZeroUsize::new(buf.len());
        }

        if let Some(fragment) = self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }

        debug_assert_eq!(buf.len(), len);
        (buf, meta)
    }
}

ri_maybe_ref! {
    Type = Uri,
    type_name = "Uri",
    variable_name = "uri",
    name = "URI",
    description = "A URI, i.e., a URI reference with a scheme.",
    scheme_required = true,
    example_input = "foo://user@example.com:8042/over/there?name=ferret#nose",
}

ri_maybe_ref! {
    Type = UriRef,
    type_name = "UriRef",
    variable_name = "uri_ref",
    name = "URI reference",
    description = "A URI reference, i.e., either a URI or a relative reference.",
    scheme_required = false,
    example_input = "foo://user@example.com:8042/over/there?name=ferret#nose",
}

impl<T: Bos<str>> Uri<T> {
    /// Resolves a URI reference against this URI.
    ///
    /// An empty `reference` yields a copy of this URI, fragment included.
    /// Otherwise the reference is parsed as a [`UriRef`] and resolved with
    /// [`UriRef::resolve_against`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the reference fails to parse as a [`UriRef`].
    ///
    /// # Examples
    ///
    /// ```
    /// use loose_uri::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q")?;
    /// assert_eq!(base.resolve("../g")?.as_str(), "http://a/b/g");
    /// assert_eq!(base.resolve("../../../g")?.as_str(), "http://a/g");
    /// assert_eq!(base.resolve("//g")?.as_str(), "http://g");
    /// assert_eq!(base.resolve("#s")?.as_str(), "http://a/b/c/d;p?q#s");
    /// # Ok::<_, loose_uri::ParseError>(())
    /// ```
    pub fn resolve(&self, reference: &str) -> Result<Uri<String>, ParseError> {
        if reference.is_empty() {
            return Ok(Uri {
                val: self.as_str().to_owned(),
                meta: self.meta,
            });
        }
        let reference = UriRef::parse(reference)?;
        Ok(reference.resolve_against(self))
    }
}

impl<T: Bos<str>> UriRef<T> {
    /// Resolves the URI reference against the given base URI
    /// and returns the target URI.
    ///
    /// This implements the algorithm of
    /// [Section 5.2.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.2).
    /// The fragment of the target is always the fragment of the reference:
    /// unlike [`Uri::resolve`], an empty reference drops the base fragment.
    ///
    /// Excess `".."` segments are clamped at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use loose_uri::{Uri, UriRef};
    ///
    /// let base = Uri::parse("http://example.com/foo/bar")?;
    ///
    /// assert_eq!(UriRef::parse("baz")?.resolve_against(&base).as_str(), "http://example.com/foo/baz");
    /// assert_eq!(UriRef::parse("../baz")?.resolve_against(&base).as_str(), "http://example.com/baz");
    /// assert_eq!(UriRef::parse("?baz")?.resolve_against(&base).as_str(), "http://example.com/foo/bar?baz");
    /// # Ok::<_, loose_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn resolve_against<U: Bos<str>>(&self, base: &Uri<U>) -> Uri<String> {
        let (val, meta) = resolve::resolve(base.make_ref(), self.make_ref());
        Uri { val, meta }
    }
}
