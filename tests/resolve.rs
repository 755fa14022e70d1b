use loose_uri::{ParseErrorKind, Uri, UriRef};
use test_log::test;

trait Test {
    fn pass(&self, r: &str, res: &str);
}

impl Test for Uri<&str> {
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        assert_eq!(self.resolve(r).unwrap().as_str(), expected);
        if !r.is_empty() {
            let r = UriRef::parse(r).unwrap();
            assert_eq!(r.resolve_against(self).as_str(), expected);
        }
    }
}

#[test]
fn resolve() {
    // Examples from Section 5.4 of RFC 3986.
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    base.pass("g:h", "g:h");
    base.pass("g", "http://a/b/c/g");
    base.pass("./g", "http://a/b/c/g");
    base.pass("g/", "http://a/b/c/g/");
    base.pass("/g", "http://a/g");
    base.pass("//g", "http://g");
    base.pass("?y", "http://a/b/c/d;p?y");
    base.pass("g?y", "http://a/b/c/g?y");
    base.pass("#s", "http://a/b/c/d;p?q#s");
    base.pass("g#s", "http://a/b/c/g#s");
    base.pass("g?y#s", "http://a/b/c/g?y#s");
    base.pass(";x", "http://a/b/c/;x");
    base.pass("g;x", "http://a/b/c/g;x");
    base.pass("g;x?y#s", "http://a/b/c/g;x?y#s");
    base.pass("", "http://a/b/c/d;p?q");
    base.pass(".", "http://a/b/c/");
    base.pass("./", "http://a/b/c/");
    base.pass("..", "http://a/b/");
    base.pass("../", "http://a/b/");
    base.pass("../g", "http://a/b/g");
    base.pass("../..", "http://a/");
    base.pass("../../", "http://a/");
    base.pass("../../g", "http://a/g");

    base.pass("/./g", "http://a/g");
    base.pass("g.", "http://a/b/c/g.");
    base.pass(".g", "http://a/b/c/.g");
    base.pass("g..", "http://a/b/c/g..");
    base.pass("..g", "http://a/b/c/..g");

    base.pass("./../g", "http://a/b/g");
    base.pass("./g/.", "http://a/b/c/g/");
    base.pass("g/./h", "http://a/b/c/g/h");
    base.pass("g/../h", "http://a/b/c/h");
    base.pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
    base.pass("g;x=1/../y", "http://a/b/c/y");

    base.pass("g?y/./x", "http://a/b/c/g?y/./x");
    base.pass("g?y/../x", "http://a/b/c/g?y/../x");
    base.pass("g#s/./x", "http://a/b/c/g#s/./x");
    base.pass("g#s/../x", "http://a/b/c/g#s/../x");

    // Strict parsers take a reference with the same scheme as is.
    base.pass("http:g", "http:g");

    // Non-hierarchical base URI.
    let base = Uri::parse("foo:bar").unwrap();

    base.pass("", "foo:bar");
    base.pass("#baz", "foo:bar#baz");
    base.pass("baz", "foo:baz");
    base.pass("?baz", "foo:bar?baz");
    base.pass("http://example.com/", "http://example.com/");
    base.pass("foo:baz", "foo:baz");
    base.pass("bar:baz", "bar:baz");
}

#[test]
fn resolve_root_clamp() {
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    base.pass("../../../g", "http://a/g");
    base.pass("../../../../g", "http://a/g");
    base.pass("/../g", "http://a/g");
    base.pass("/../..", "http://a/");
    base.pass("//g/../../x", "http://g/x");
    base.pass("g:/../x", "g:/x");
}

#[test]
fn resolve_merge() {
    // A base with an authority and an empty path merges under the root.
    let base = Uri::parse("http://a").unwrap();
    base.pass("g", "http://a/g");
    base.pass("../g", "http://a/g");
    base.pass("?y", "http://a?y");
    base.pass("", "http://a");

    let base = Uri::parse("http://a?q#f").unwrap();
    base.pass("#s", "http://a?q#s");
    base.pass("g", "http://a/g");

    // A rootless base path keeps its directory part.
    let base = Uri::parse("foo:a/b").unwrap();
    base.pass("c", "foo:a/c");
    base.pass("./c", "foo:a/c");
    base.pass("../c", "foo:/c");

    let base = Uri::parse("foo:").unwrap();
    base.pass("c", "foo:c");
    base.pass("./c/../d", "foo:/d");
}

#[test]
fn resolve_query_and_fragment() {
    let base = Uri::parse("http://a/b?q#f").unwrap();

    // The base query is kept only when the reference path is empty
    // and the reference has no query of its own.
    base.pass("#s", "http://a/b?q#s");
    base.pass("?", "http://a/b?");
    base.pass("?#", "http://a/b?#");
    base.pass("c", "http://a/c");
    base.pass("/c", "http://a/c");
    base.pass("//c", "http://c");

    // The fragment always comes from the reference.
    base.pass("c?y", "http://a/c?y");
    base.pass("c#", "http://a/c#");

    let target = base.resolve("").unwrap();
    assert_eq!(target.as_str(), "http://a/b?q#f");
    assert_eq!(target.fragment(), Some("f"));

    let r = UriRef::parse("").unwrap();
    let target = r.resolve_against(&base);
    assert_eq!(target.as_str(), "http://a/b?q");
    assert_eq!(target.fragment(), None);
    assert_eq!(target, base);
}

#[test]
fn resolve_components() {
    let base = Uri::parse("http://www.bla.com:8080/p/a/t/h?q=y#f").unwrap();

    let target = base.resolve("../w/").unwrap();
    assert_eq!(target.as_str(), "http://www.bla.com:8080/p/a/w/");
    assert_eq!(target.scheme(), "http");
    let auth = target.authority().unwrap();
    assert_eq!(auth.as_str(), "www.bla.com:8080");
    assert_eq!(auth.host(), "www.bla.com");
    assert_eq!(auth.port(), Some(8080));
    assert_eq!(target.path(), "/p/a/w/");
    assert_eq!(target.query(), None);
    assert_eq!(target.fragment(), None);

    let target = base.resolve("ftp://u@[::1]:81/../x?a#b").unwrap();
    assert_eq!(target.as_str(), "ftp://u@[::1]:81/x?a#b");
    assert_eq!(target.scheme(), "ftp");
    let auth = target.authority().unwrap();
    assert_eq!(auth.userinfo(), Some("u"));
    assert_eq!(auth.host(), "[::1]");
    assert_eq!(auth.port(), Some(81));
    assert_eq!(target.path(), "/x");
    assert_eq!(target.query(), Some("a"));
    assert_eq!(target.fragment(), Some("b"));

    let target = base.resolve("mailto:a@b").unwrap();
    assert!(target.authority().is_none());
    assert_eq!(target.path(), "a@b");

    // The resolved URI reads back as itself.
    let reparsed = Uri::parse(target.as_str()).unwrap();
    assert_eq!(reparsed, target);
}

#[test]
fn resolve_scheme_reference_ignores_base() {
    let r = "ftp://x:21/./y/../z?q#s";
    let expected = "ftp://x:21/z?q#s";

    for base in [
        "http://a/b/c/d;p?q",
        "foo:bar",
        "file://h/",
        "urn:isbn:0451450523#frag",
    ] {
        let base = Uri::parse(base).unwrap();
        base.pass(r, expected);
    }
}

#[test]
fn resolve_owned_base() {
    let base = Uri::parse(String::from("http://a/b/c")).unwrap();
    assert_eq!(base.resolve("d").unwrap().as_str(), "http://a/b/d");

    let r = UriRef::parse(String::from("../d")).unwrap();
    assert_eq!(r.resolve_against(&base).as_str(), "http://a/d");
}

#[test]
fn resolve_error() {
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    let e = base.resolve("//").unwrap_err();
    assert_eq!(e.kind(), ParseErrorKind::EmptyAuthority);
    assert_eq!(e.index(), 2);

    let e = base.resolve("//[v1/x").unwrap_err();
    assert_eq!(e.kind(), ParseErrorKind::UnmatchedBracket);
    assert_eq!(e.index(), 2);

    let e = base.resolve("s://a:x/").unwrap_err();
    assert_eq!(e.kind(), ParseErrorKind::InvalidPort);

    let e = base.resolve(":g").unwrap_err();
    assert_eq!(e.kind(), ParseErrorKind::EmptyScheme);

    // A leading dot is a relative path, never a scheme.
    base.pass(".:g", "http://a/b/c/.:g");
}

#[test]
fn resolve_first_colon_scheme() {
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    // Any colon makes the text before it the scheme of the reference.
    base.pass("g/h:i", "g/h:i");
    base.pass("/a:b", "/a:b");
    base.pass("?y:z", "?y:z");
    base.pass("//g:80/../x", "//g:/x");
    base.pass("g/h:./i/../j", "g/h:/j");

    let target = base.resolve("g/h:i").unwrap();
    assert_eq!(target.scheme(), "g/h");
    assert!(target.authority().is_none());
    assert_eq!(target.path(), "i");
}
