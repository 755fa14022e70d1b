#![no_main]
use libfuzzer_sys::fuzz_target;
use loose_uri::{Uri, UriRef};

fuzz_target!(|data: (&str, &str)| {
    let (Ok(base), Ok(r)) = (Uri::parse(data.0), UriRef::parse(data.1)) else {
        return;
    };

    let u1 = r.resolve_against(&base);
    assert_eq!(u1.fragment(), r.fragment());

    if let Some(scheme) = r.scheme() {
        assert_eq!(u1.scheme(), scheme);
    } else {
        assert_eq!(u1.scheme(), base.scheme());
    }

    for seg in u1.path().segments() {
        assert!(seg != "." && seg != "..");
    }

    // A path starting with "//" reads back as an authority.
    if u1.authority().is_none() && u1.path().as_str().starts_with("//") {
        return;
    }
    let Ok(u2) = Uri::parse(u1.as_str()) else {
        return;
    };

    assert_eq!(u1.scheme(), u2.scheme());
    assert_eq!(u1.authority(), u2.authority());
    assert_eq!(u1.path(), u2.path());
    assert_eq!(u1.query(), u2.query());
    assert_eq!(u1.fragment(), u2.fragment());
});
