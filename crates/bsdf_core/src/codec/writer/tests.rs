use crate::codec::writer::ByteWriter;

#[test]
fn growth_preserves_previous_bytes() {
	let mut writer = ByteWriter::with_capacity(2);
	for i in 0..=255_u8 {
		writer.push_uint8(i);
	}
	writer.push_bytes(&[7; 1000]);

	let bytes = writer.into_bytes();
	assert_eq!(bytes.len(), 256 + 1000);
	assert!(bytes[..256].iter().enumerate().all(|(i, b)| usize::from(*b) == i));
	assert!(bytes[256..].iter().all(|b| *b == 7));
}

#[test]
fn output_is_exactly_the_written_prefix() {
	let mut writer = ByteWriter::new();
	assert_eq!(writer.tell(), 0);
	writer.push_char(b's');
	writer.push_str("hi");
	assert_eq!(writer.tell(), 4);
	assert_eq!(writer.as_bytes(), b"s\x02hi");
}

#[test]
fn sizes_pick_short_or_wide_form() {
	let mut writer = ByteWriter::new();
	writer.push_size(250);
	writer.push_size(251);
	writer.push_size_wide(1);
	assert_eq!(writer.as_bytes(), &[250, 253, 251, 0, 0, 0, 0, 0, 0, 0, 253, 1, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn numbers_are_little_endian() {
	let mut writer = ByteWriter::new();
	writer.push_int64(-2);
	writer.push_float64(1.0);
	writer.push_float32(1.0);
	writer.push_zeros(3);

	let mut expected = Vec::new();
	expected.extend_from_slice(&(-2_i64).to_le_bytes());
	expected.extend_from_slice(&1.0_f64.to_le_bytes());
	expected.extend_from_slice(&1.0_f32.to_le_bytes());
	expected.extend_from_slice(&[0, 0, 0]);
	assert_eq!(writer.as_bytes(), expected.as_slice());
}

#[test]
fn truncate_rewinds_offset() {
	let mut writer = ByteWriter::new();
	writer.push_str("keep");
	let mark = writer.tell();
	writer.push_str("drop");
	writer.truncate(mark);
	assert_eq!(writer.tell(), mark);
	assert_eq!(writer.as_bytes(), b"\x04keep");
}
