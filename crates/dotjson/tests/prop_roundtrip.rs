/// Property-based tests for the read/write engine.
///
/// Uses `proptest` to generate arbitrary value trees and paths and checks the
/// invariants every caller relies on:
///
/// - encoding then decoding gives back the same tree (compact and indented)
/// - a read at a path right after a write at that path returns the written value
/// - writing index `k` into null yields `k` nulls followed by the value
/// - a delete reports a change exactly when the path resolved, and a
///   delete that reports no change leaves the encoding untouched
/// - scalar accessors never panic and fall back to zero values
///
/// Floats are generated as `mantissa / 10^n` so their shortest decimal form
/// parses back to the same `f64`.
use dotjson::{encode, parse_path, EncodeOptions, Segment, Value};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Object keys that can never be mistaken for an index or split by `.`.
fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_]{0,6}").unwrap()
}

fn arb_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1_000_000i64..1_000_000i64).prop_map(Value::from),
        (-100_000_000i64..100_000_000i64, 1u32..5u32).prop_map(|(mantissa, decimals)| {
            Value::from(mantissa as f64 / 10f64.powi(decimals as i32))
        }),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_number(),
        "[a-zA-Z0-9 .\"\\\\\n\t]{0,12}".prop_map(Value::String),
        Just(Value::String("caf\u{00e9} \u{4f60}".to_string())),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..6).prop_map(Value::Object),
        ]
    })
}

fn arb_segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        (0usize..6).prop_map(Segment::Index),
        arb_key().prop_map(Segment::Key),
    ]
}

fn arb_path() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec(arb_segment(), 0..5)
}

fn path_string(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| match s {
            Segment::Index(i) => i.to_string(),
            Segment::Key(k) => k.clone(),
            Segment::Query(_) => unreachable!("strategies never generate queries"),
        })
        .collect::<Vec<_>>()
        .join(".")
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn compact_encoding_roundtrips(value in arb_value()) {
        let text = value.to_string();
        let back: Value = text.parse().unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn indented_encoding_roundtrips(value in arb_value()) {
        let text = encode(&value, &EncodeOptions::new("", "\t")).unwrap();
        let back: Value = text.parse().unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn get_after_set(mut doc in arb_value(), path in arb_path(), x in arb_value()) {
        doc.sets(x.clone(), path.clone());
        prop_assert_eq!(doc.gets(path), Some(&x));
    }

    #[test]
    fn get_after_set_with_dotted_path(
        mut doc in arb_value(),
        path in prop::collection::vec(arb_segment(), 1..5),
        x in arb_leaf(),
    ) {
        let dotted = path_string(&path);
        prop_assert_eq!(parse_path(&dotted), path);
        doc.set(&dotted, x.clone());
        prop_assert_eq!(doc.get(&dotted), &x);
        prop_assert!(doc.has(&dotted));
    }

    #[test]
    fn index_write_into_null_is_null_padded(k in 0usize..64, x in arb_leaf()) {
        let mut doc = Value::Null;
        doc.set(&k.to_string(), x.clone());
        let items = doc.array_view();
        prop_assert_eq!(items.len(), k + 1);
        prop_assert!(items[..k].iter().all(Value::is_nil));
        prop_assert_eq!(&items[k], &x);
    }

    #[test]
    fn delete_reports_change_iff_path_resolved(mut doc in arb_value(), path in arb_path()) {
        prop_assume!(!path.is_empty());
        let resolved = doc.gets(path.clone()).is_some();
        let before = doc.to_string();
        let changed = doc.dels(path);
        prop_assert_eq!(changed, resolved);
        if !changed {
            prop_assert_eq!(doc.to_string(), before);
        }
    }

    #[test]
    fn coercions_are_total(value in arb_value()) {
        let n = value.as_f64();
        let i = value.as_i64();
        let b = value.as_bool();
        let t = value.as_text();
        match &value {
            Value::Number(x) => {
                prop_assert_eq!(n, *x);
                prop_assert_eq!(i, x.trunc() as i64);
            }
            _ => {
                prop_assert_eq!(n, 0.0);
                prop_assert_eq!(i, 0);
            }
        }
        prop_assert_eq!(b, value == Value::Bool(true));
        if let Value::String(s) = &value {
            prop_assert_eq!(t.as_ref(), s.as_str());
        } else {
            prop_assert_eq!(t.as_ref(), value.to_string());
        }
    }
}
