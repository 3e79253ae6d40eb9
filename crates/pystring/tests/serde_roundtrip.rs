#![expect(missing_docs)]

use pystring::{Buffer, BufferOptions, GrowthPolicy, SliceIndex, find, slice_index};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Highlight {
    text: Buffer,
    span: SliceIndex,
}

#[test]
fn buffer_and_index_round_trip() {
    let text = Buffer::from_bytes(b"caf\xc3\xa9 \xff").unwrap();
    let span = find(&text, b"\xff").unwrap();
    let highlight = Highlight { text, span };

    let json = serde_json::to_string(&highlight).unwrap();
    assert_eq!(
        json,
        r#"{"text":[99,97,102,195,169,32,255],"span":{"start":6,"stop":7,"step":1}}"#
    );
    let back: Highlight = serde_json::from_str(&json).unwrap();
    assert_eq!(back, highlight);
}

#[test]
fn buffer_accepts_json_strings() {
    let highlight: Highlight =
        serde_json::from_str(r#"{"text":"Hello","span":{"start":-4,"stop":-1,"step":1}}"#)
            .unwrap();
    assert_eq!(highlight.text.slice(highlight.span).unwrap(), "ell");
}

#[test]
fn zero_step_is_rejected_on_deserialize() {
    let result = serde_json::from_str::<SliceIndex>(r#"{"start":0,"stop":3,"step":0}"#);
    let error = result.unwrap_err().to_string();
    assert!(error.contains("slice step cannot be zero"), "{error}");
}

#[test]
fn options_round_trip() {
    let options = BufferOptions {
        growth: GrowthPolicy::Exact,
    };
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(json, r#"{"growth":"Exact"}"#);
    assert_eq!(serde_json::from_str::<BufferOptions>(&json).unwrap(), options);
}

#[test]
fn snapshot_index_yaml() {
    insta::assert_yaml_snapshot!(slice_index!(-5, -1), @r"
    start: -5
    stop: -1
    step: 1
    ");
}
