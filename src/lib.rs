#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![no_std]

//! A pragmatic URI splitter and reference resolver following [RFC 3986].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! # Overview
//!
//! A string is split into its components by looking at the structural
//! delimiters only (`":"`, `"//"`, `"@"`, `"[" "]"`, `":"`, `"?"` and `"#"`).
//! The characters in between are taken as they are: this crate does not
//! validate a string against the full ABNF of RFC 3986, nor does it
//! percent-decode or normalize any component.
//!
//! - [`Uri::parse`] splits a URI, which must have a scheme.
//! - [`UriRef::parse`] splits a URI reference, i.e., a URI or a relative reference.
//! - [`Uri::resolve`] and [`UriRef::resolve_against`] resolve a reference
//!   against a base URI as described in [Section 5.2 of RFC 3986],
//!   removing dot segments from the resulting path.
//! - [`Uri::build`] and [`Uri::build_with_port`] assemble a URI from its components.
//!
//! ```
//! use loose_uri::Uri;
//!
//! let base = Uri::parse("http://www.bla.com:8080/p/a/t/h?q=y#f")?;
//! let auth = base.authority().unwrap();
//! assert_eq!(auth.host(), "www.bla.com");
//! assert_eq!(auth.port(), Some(8080));
//! assert_eq!(base.path(), "/p/a/t/h");
//! assert_eq!(base.query(), Some("q=y"));
//! assert_eq!(base.fragment(), Some("f"));
//!
//! let target = base.resolve("../w/")?;
//! assert_eq!(target.as_str(), "http://www.bla.com:8080/p/a/w/");
//! # Ok::<_, loose_uri::ParseError>(())
//! ```
//!
//! [Section 5.2 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2
//!
//! # Logging
//!
//! Reference resolution emits [`log`] records at the `trace` level.
//! No logger is installed by this crate.
//!
//! # Crate features
//!
//! - `std` (default): Enables `std` support. This includes [`Error`]
//!   implementations on error types.
//!
//! - `impl-error`: Implements [`Error`] on error types through `core::error::Error`
//!   without `std` support.
//!
//! - `serde`: Implements [`Serialize`] and [`Deserialize`] for [`Uri`] and [`UriRef`].
//!
//! [`Error`]: core::error::Error
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html

extern crate alloc;

pub mod build;
pub mod component;
mod imp;
pub mod parse;
mod resolve;

pub use build::BuildError;
pub use imp::{Uri, UriRef};
pub use parse::{ParseError, ParseErrorKind};

#[cfg(feature = "impl-error")]
use core::error::Error;
