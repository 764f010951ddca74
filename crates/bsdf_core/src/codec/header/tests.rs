use crate::codec::bytes::Cursor;
use crate::codec::header::{FormatVersion, MAGIC};
use crate::codec::writer::ByteWriter;
use crate::codec::BsdfError;

#[test]
fn writes_magic_then_major_then_minor() {
	let mut writer = ByteWriter::new();
	FormatVersion::new(2, 1).write(&mut writer);
	assert_eq!(writer.as_bytes(), b"BSDF\x02\x01");
	assert_eq!(writer.tell(), FormatVersion::HEADER_SIZE);
}

#[test]
fn reads_back_version() {
	let mut cursor = Cursor::new(b"BSDF\x02\x07v");
	let version = FormatVersion::read(&mut cursor).expect("header parses");
	assert_eq!(version, FormatVersion::new(2, 7));
	assert_eq!(cursor.tell(), 6);
	assert_eq!(version.to_string(), "2.7");
}

#[test]
fn rejects_wrong_magic() {
	let err = FormatVersion::read(&mut Cursor::new(b"BSDX\x02\x00")).expect_err("bad magic");
	assert!(matches!(err, BsdfError::InvalidMagic { magic } if magic == *b"BSDX"));
}

#[test]
fn rejects_short_magic() {
	let err = FormatVersion::read(&mut Cursor::new(b"BS")).expect_err("short magic");
	assert!(matches!(err, BsdfError::InvalidMagic { magic } if magic == [b'B', b'S', 0, 0]));
	assert_eq!(MAGIC, *b"BSDF");
}

#[test]
fn major_mismatch_is_fatal_and_newer_minor_is_flagged() {
	let current = FormatVersion::CURRENT;

	let err = FormatVersion::new(current.major + 1, 0).check_readable_by(current).expect_err("newer major");
	assert!(matches!(err, BsdfError::UnsupportedMajorVersion { found: 3, supported: 2 }));
	let err = FormatVersion::new(1, 0).check_readable_by(current).expect_err("older major");
	assert!(matches!(err, BsdfError::UnsupportedMajorVersion { found: 1, .. }));

	assert!(FormatVersion::new(current.major, current.minor + 1).check_readable_by(current).expect("newer minor"));
	assert!(!current.check_readable_by(current).expect("same version"));
}
