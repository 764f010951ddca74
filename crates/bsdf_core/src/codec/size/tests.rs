use crate::codec::bytes::Cursor;
use crate::codec::size::{Size, decode_int64, decode_size, encode_int64, encode_size, encode_size_wide};
use crate::codec::BsdfError;

fn size_roundtrip(n: u64) -> Size {
	let encoded = encode_size(n);
	let mut cursor = Cursor::new(encoded.as_bytes());
	let size = decode_size(&mut cursor).expect("size decodes");
	assert_eq!(cursor.remaining(), 0, "size {n} left trailing bytes");
	size
}

#[test]
fn inline_sizes_use_one_byte() {
	assert_eq!(encode_size(0).as_bytes(), &[0]);
	assert_eq!(encode_size(250).as_bytes(), &[250]);
}

#[test]
fn wide_sizes_use_marker_and_two_halves() {
	let encoded = encode_size(251);
	assert_eq!(encoded.as_bytes(), &[253, 251, 0, 0, 0, 0, 0, 0, 0]);

	let encoded = encode_size((1 << 32) + 7);
	assert_eq!(encoded.as_bytes(), &[253, 7, 0, 0, 0, 1, 0, 0, 0]);
}

#[test]
fn sizes_survive_roundtrip_across_boundaries() {
	for n in [0, 250, 251, 1 << 32, 1 << 40] {
		assert_eq!(size_roundtrip(n), Size::Known(n));
	}
}

#[test]
fn wide_form_decodes_small_values() {
	let encoded = encode_size_wide(3);
	let mut cursor = Cursor::new(&encoded);
	assert_eq!(decode_size(&mut cursor).expect("size decodes"), Size::Known(3));
}

#[test]
fn streaming_marker_has_no_trailing_bytes() {
	let mut cursor = Cursor::new(&[255, b'v']);
	assert_eq!(decode_size(&mut cursor).expect("marker decodes"), Size::Streaming);
	assert_eq!(cursor.tell(), 1);
}

#[test]
fn reserved_markers_are_rejected() {
	for marker in [251_u8, 252, 254] {
		let bytes = [marker, 0, 0, 0, 0, 0, 0, 0, 0];
		let err = decode_size(&mut Cursor::new(&bytes)).expect_err("reserved marker should fail");
		assert!(matches!(err, BsdfError::InvalidSizeMarker { marker: m, at: 0 } if m == marker));
	}
}

#[test]
fn truncated_wide_size_reports_eof() {
	let err = decode_size(&mut Cursor::new(&[253, 1, 2])).expect_err("short wide size should fail");
	assert!(matches!(err, BsdfError::UnexpectedEof { at: 1, need: 4, rem: 2 }));
}

#[test]
fn int64_matches_native_twos_complement() {
	let samples = [
		0,
		-1,
		-128,
		-129,
		127,
		128,
		2_147_483_647,
		-2_147_483_648,
		9_007_199_254_740_991,
		-9_007_199_254_740_991,
		i64::MAX,
		i64::MIN,
	];
	for n in samples {
		let encoded = encode_int64(n);
		assert_eq!(encoded, n.to_le_bytes(), "encoding of {n}");
		assert_eq!(decode_int64(encoded), n, "decoding of {n}");
	}
}

#[test]
fn negative_one_is_all_ones() {
	assert_eq!(encode_int64(-1), [0xff; 8]);
	assert_eq!(decode_int64([0xff; 8]), -1);
}
