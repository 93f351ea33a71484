//! Property-based tests for the round trip guarantees
//!
//! Values written in any mode parse back to the same value, documented output
//! is stable under a parse and rewrite, and arbitrary input never panics.

use proptest::prelude::*;
use sconf::{from_str, record, to_string, Mode};
use std::collections::BTreeMap;
use std::time::Duration;

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        flag: bool,
        small: i8,
        big: i64,
        unsigned: u64,
        ratio: f64,
        #[sconf(optional, doc = "Display name.")]
        name: String,
        timeout: Duration,
        words: Vec<String>,
        #[sconf(optional, doc = "Ports by service name, a longer comment that needs to be wrapped over more than one line to fit.")]
        ports: BTreeMap<String, u16>,
        #[sconf(optional)]
        limit: Option<u32>,
    }
}

fn line() -> impl Strategy<Value = String> {
    "[^\r\n]{0,20}"
}

/// Floats that print exactly with six decimal places.
fn ratio() -> impl Strategy<Value = f64> {
    (-1_000_000i64..1_000_000).prop_map(|n| n as f64 / 4.0)
}

fn duration() -> impl Strategy<Value = Duration> {
    any::<u64>().prop_map(Duration::from_nanos)
}

fn sample(
    ports: impl Strategy<Value = BTreeMap<String, u16>>,
    limit: impl Strategy<Value = Option<u32>>,
) -> impl Strategy<Value = Sample> {
    (
        (any::<bool>(), any::<i8>(), any::<i64>(), any::<u64>(), ratio()),
        (
            line(),
            duration(),
            prop::collection::vec(line(), 1..5),
            ports,
            limit,
        ),
    )
        .prop_map(
            |((flag, small, big, unsigned, ratio), (name, timeout, words, ports, limit))| Sample {
                flag,
                small,
                big,
                unsigned,
                ratio,
                name,
                timeout,
                words,
                ports,
                limit,
            },
        )
}

fn any_sample() -> impl Strategy<Value = Sample> {
    sample(
        prop::collection::btree_map("[a-z]{1,8}", any::<u16>(), 0..4),
        any::<Option<u32>>(),
    )
}

/// Samples without empty optional values, which full mode writes as examples.
fn full_sample() -> impl Strategy<Value = Sample> {
    sample(
        prop::collection::btree_map("[a-z]{1,8}", any::<u16>(), 1..4),
        any::<u32>().prop_map(Some),
    )
}

fn roundtrip(value: &Sample, mode: Mode) -> Result<(), TestCaseError> {
    let text = to_string(value, mode).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let back: Sample = from_str(&text)
        .map_err(|e| TestCaseError::fail(format!("{}\nwritten was:\n{}", e, text)))?;
    prop_assert_eq!(&back, value);
    Ok(())
}

proptest! {
    #[test]
    fn prop_compact_roundtrip(value in any_sample()) {
        roundtrip(&value, Mode::Compact)?;
    }

    #[test]
    fn prop_documented_roundtrip(value in any_sample()) {
        roundtrip(&value, Mode::Documented)?;
    }

    #[test]
    fn prop_full_roundtrip(value in full_sample()) {
        roundtrip(&value, Mode::Full)?;
    }

    #[test]
    fn prop_documented_is_idempotent(value in any_sample()) {
        let first = to_string(&value, Mode::Documented).unwrap();
        let parsed: Sample = from_str(&first).unwrap();
        let second = to_string(&parsed, Mode::Documented).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_compact_omits_zero_optional_fields(value in any_sample()) {
        let text = to_string(&value, Mode::Compact).unwrap();
        let has_key = |key: &str| text.lines().any(|l| l.starts_with(key));
        prop_assert_eq!(has_key("name:"), !value.name.is_empty());
        prop_assert_eq!(has_key("ports:"), !value.ports.is_empty());
        prop_assert_eq!(has_key("limit:"), value.limit.is_some());
        prop_assert!(!text.lines().any(|l| l.trim_start().starts_with('#')));
    }

    #[test]
    fn prop_full_writes_every_field(value in any_sample()) {
        let text = to_string(&value, Mode::Full).unwrap();
        for key in ["flag:", "small:", "big:", "unsigned:", "ratio:", "name:", "timeout:", "words:", "ports:", "limit:"] {
            prop_assert!(text.lines().any(|l| l.starts_with(key)), "missing {}", key);
        }
    }

    #[test]
    fn prop_comment_lines_fit(value in any_sample()) {
        let text = to_string(&value, Mode::Full).unwrap();
        for line in text.lines().filter(|l| l.starts_with('#')) {
            prop_assert!(line.chars().count() <= 80, "{:?}", line);
        }
    }

    #[test]
    fn prop_parse_never_panics(input in "[a-z:\\- \t\n#0-9]{0,64}") {
        let _ = from_str::<Sample>(&input);
    }
}
