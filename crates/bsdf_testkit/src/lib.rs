//! Shared test helpers for workspace crates.

use bsdf::codec::{Blob, Map, Value};
use proptest::prelude::*;

/// Integers on either side of every encoding boundary.
pub const BOUNDARY_INTS: &[i64] = &[0, 1, 127, 128, 255, 256, -1, -128, -129, i32::MAX as i64, i32::MIN as i64, i64::MAX, i64::MIN];

/// Blob payload sizes on either side of the inline size limit.
pub const BOUNDARY_BLOB_SIZES: &[usize] = &[0, 1, 250, 251, 65536];

/// Deterministic blob payload of `len` bytes.
pub fn patterned_bytes(len: usize) -> Vec<u8> {
	(0..len).map(|i| (i % 251) as u8).collect()
}

/// Strategy for blobs, with and without reserved capacity.
pub fn arb_blob() -> impl Strategy<Value = Blob> {
	(prop::collection::vec(any::<u8>(), 0..300), prop_oneof![Just(0_u64), 1_u64..64]).prop_map(|(data, extra)| Blob::with_extra_size(data, extra))
}

/// Strategy for scalar values.
pub fn arb_scalar() -> impl Strategy<Value = Value> {
	prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		any::<u8>().prop_map(Value::UInt8),
		any::<i64>().prop_map(Value::Int64),
		// NaN never equals itself, so it cannot take part in equality checks.
		any::<f64>().prop_filter("NaN", |f| !f.is_nan()).prop_map(Value::Float64),
		".{0,40}".prop_map(Value::Text),
		arb_blob().prop_map(Value::Bytes),
	]
}

/// Strategy for arbitrary encodable value trees.
pub fn arb_value() -> impl Strategy<Value = Value> {
	arb_scalar().prop_recursive(4, 64, 8, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
			prop::collection::btree_map(".{0,12}", inner, 0..8).prop_map(|entries: Map| Value::Map(entries)),
		]
	})
}
