use crate::codec::BsdfError;
use crate::codec::bytes::{Cursor, Tag};
use crate::codec::size::Size;

#[test]
fn zero_tag_and_exhausted_input_end_the_stream() {
	let mut cursor = Cursor::new(&[b'v', 0]);
	assert_eq!(cursor.read_tag(), Tag::Value(b'v'));
	assert_eq!(cursor.read_tag(), Tag::End);
	assert_eq!(cursor.read_tag(), Tag::End);
	assert_eq!(cursor.tell(), 2);
}

#[test]
fn base_offset_shows_up_in_positions_and_errors() {
	let mut cursor = Cursor::with_base(&[1, 2, 3], 100);
	assert_eq!(cursor.tell(), 100);
	cursor.skip(2).expect("skip succeeds");
	assert_eq!(cursor.tell(), 102);

	let err = cursor.read_u32_le().expect_err("short read should fail");
	assert!(matches!(err, BsdfError::UnexpectedEof { at: 102, need: 4, rem: 1 }));
}

#[test]
fn reads_length_prefixed_utf8() {
	let text = "grüße";
	let mut bytes = vec![text.len() as u8];
	bytes.extend_from_slice(text.as_bytes());

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_str().expect("text decodes"), text);
	assert_eq!(cursor.remaining(), 0);
}

#[test]
fn rejects_invalid_utf8_with_offset() {
	let mut cursor = Cursor::new(&[2, 0xc3, 0x28]);
	let err = cursor.read_str().expect_err("invalid utf-8 should fail");
	assert!(matches!(err, BsdfError::InvalidUtf8 { at: 1 }));
}

#[test]
fn streaming_marker_is_only_a_size_for_lists() {
	let mut cursor = Cursor::new(&[255]);
	assert_eq!(cursor.read_size().expect("marker decodes"), Size::Streaming);

	let mut cursor = Cursor::new(&[255]);
	let err = cursor.read_known_size().expect_err("strings need a concrete size");
	assert!(matches!(err, BsdfError::StreamingSizeNotAllowed { at: 0 }));
}

#[test]
fn reads_little_endian_scalars() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&(-300_i16).to_le_bytes());
	bytes.extend_from_slice(&1.5_f32.to_le_bytes());
	bytes.extend_from_slice(&(-2.25_f64).to_le_bytes());
	bytes.extend_from_slice(&(-129_i64).to_le_bytes());

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_i16_le().expect("i16"), -300);
	assert_eq!(cursor.read_f32_le().expect("f32"), 1.5);
	assert_eq!(cursor.read_f64_le().expect("f64"), -2.25);
	assert_eq!(cursor.read_int64().expect("i64"), -129);
}
