use std::collections::HashSet;

use crate::processor::variants::{disambiguator, strip_extension};

#[test]
fn strips_simple_extension() {
    assert_eq!(strip_extension("photo.jpg"), "photo");
}

#[test]
fn keeps_directory_prefix() {
    assert_eq!(strip_extension("uploads/2026/photo.png"), "uploads/2026/photo");
}

#[test]
fn extension_only_taken_from_last_segment() {
    assert_eq!(strip_extension("releases.v1/photo"), "releases.v1/photo");
}

#[test]
fn no_extension_is_left_alone() {
    assert_eq!(strip_extension("photo"), "photo");
}

#[test]
fn leading_dot_is_not_an_extension() {
    assert_eq!(strip_extension(".hidden"), ".hidden");
    assert_eq!(strip_extension("dir/.hidden"), "dir/.hidden");
}

#[test]
fn double_extension_strips_only_last() {
    assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
}

#[test]
fn disambiguator_is_eight_hex_chars() {
    let token = disambiguator();
    assert_eq!(token.len(), 8);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn disambiguators_differ_across_calls() {
    let tokens: HashSet<String> = (0..32).map(|_| disambiguator()).collect();
    // 32 draws from a 2^32 space; a collision here means the generator is broken.
    assert!(tokens.len() > 1);
}
