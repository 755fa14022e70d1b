#![no_main]
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use loose_uri::Uri;

#[derive(Arbitrary, Clone, Copy, Debug)]
struct UriComponents<'a> {
    scheme: &'a str,
    host: &'a str,
    port: Option<u16>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fuzz_target!(|c: UriComponents<'_>| {
    let res = match c.port {
        Some(port) => Uri::build_with_port(c.scheme, c.host, port, c.path, c.query, c.fragment),
        None => Uri::build(c.scheme, c.host, c.path, c.query, c.fragment),
    };
    let Ok(u1) = res else {
        return;
    };
    let has_authority = c.port.is_some() || !c.host.is_empty();

    assert_eq!(u1.scheme(), c.scheme);
    assert_eq!(u1.authority().is_some(), has_authority);
    if let Some(a1) = u1.authority() {
        assert_eq!(a1.userinfo(), None);
        assert_eq!(a1.host(), c.host);
        assert_eq!(a1.port(), c.port);
    }
    assert_eq!(u1.path(), c.path);
    assert_eq!(u1.query(), c.query);
    assert_eq!(u1.fragment(), c.fragment);

    // Whatever is built reads back as itself.
    let u2 = Uri::parse(u1.as_str()).unwrap();

    assert_eq!(u1.scheme(), u2.scheme());
    assert_eq!(u1.authority(), u2.authority());
    assert_eq!(u1.path(), u2.path());
    assert_eq!(u1.query(), u2.query());
    assert_eq!(u1.fragment(), u2.fragment());
});
