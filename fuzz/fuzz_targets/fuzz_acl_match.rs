#![no_main]
use arbitrary::Arbitrary;
use gatehouse::{Listener, PathMatcher, Perimeter};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    patterns: Vec<String>,
    path: String,
}

// Malformed patterns become inert entries; matching must never panic

fuzz_target!(|input: Input| {
    let matcher = PathMatcher::new(&input.patterns);
    assert_eq!(matcher.len(), input.patterns.len());

    let first = matcher.first_match(&input.path);
    assert_eq!(first.is_some(), matcher.matches(&input.path));

    let builtin = Perimeter::builtin();
    let _ = builtin.admits(Listener::Internal, &input.path);
    let _ = builtin.admits(Listener::External, &input.path);
});
