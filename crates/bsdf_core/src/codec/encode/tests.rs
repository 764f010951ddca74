use crate::codec::encode::{EncodeOptions, encode_value};
use crate::codec::writer::ByteWriter;
use crate::codec::{BsdfError, Complex, ExtensionRegistry, FnExtension, Value};

fn encoded_with(value: &Value, extensions: &ExtensionRegistry, opt: &EncodeOptions) -> crate::codec::Result<Vec<u8>> {
	let mut writer = ByteWriter::new();
	encode_value(&mut writer, value, extensions, opt)?;
	Ok(writer.into_bytes())
}

fn encoded(value: &Value) -> Vec<u8> {
	encoded_with(value, &ExtensionRegistry::new(), &EncodeOptions::default()).expect("value encodes")
}

#[test]
fn scalars_use_their_tags() {
	assert_eq!(encoded(&Value::Null), b"v");
	assert_eq!(encoded(&Value::Bool(true)), b"y");
	assert_eq!(encoded(&Value::Bool(false)), b"n");
	assert_eq!(encoded(&Value::from("hi")), b"s\x02hi");
}

#[test]
fn small_integers_collapse_to_uint8() {
	assert_eq!(encoded(&Value::Int64(0)), b"u\x00");
	assert_eq!(encoded(&Value::Int64(255)), b"u\xff");
	assert_eq!(encoded(&Value::UInt8(7)), b"u\x07");

	let wide = encoded(&Value::Int64(256));
	assert_eq!(wide[0], b'i');
	assert_eq!(&wide[1..], &256_i64.to_le_bytes());

	let negative = encoded(&Value::Int64(-1));
	assert_eq!(negative[0], b'i');
	assert_eq!(&negative[1..], &[0xff; 8]);
}

#[test]
fn float_width_follows_options() {
	let double = encoded(&Value::Float64(1.5));
	assert_eq!(double[0], b'd');
	assert_eq!(&double[1..], &1.5_f64.to_le_bytes());

	let single = encoded_with(&Value::Float64(1.5), &ExtensionRegistry::new(), &EncodeOptions::compact_floats()).expect("value encodes");
	assert_eq!(single[0], b'f');
	assert_eq!(&single[1..], &1.5_f32.to_le_bytes());
}

#[test]
fn containers_are_size_prefixed() {
	let list = Value::from(vec![Value::Null, Value::from(true)]);
	assert_eq!(encoded(&list), b"l\x02vy");

	let map: Value = [("a", Value::Null), ("bb", Value::from(1))].into_iter().collect();
	assert_eq!(encoded(&map), b"m\x02\x01av\x02bbu\x01");
}

#[test]
fn extension_match_writes_uppercase_tag_and_name() {
	let bytes = encoded_with(&Complex::new(1.0, 2.0).into(), &ExtensionRegistry::standard(), &EncodeOptions::default()).expect("complex encodes");
	assert_eq!(&bytes[..5], b"L\x01c\x02d");
	assert_eq!(&bytes[5..13], &1.0_f64.to_le_bytes());
	assert_eq!(bytes[13], b'd');
	assert_eq!(&bytes[14..], &2.0_f64.to_le_bytes());
}

#[test]
fn host_value_without_extension_is_unrepresentable() {
	let err = encoded_with(&Complex::new(0.0, 0.0).into(), &ExtensionRegistry::new(), &EncodeOptions::default()).expect_err("no extension registered");
	assert!(matches!(err, BsdfError::Unrepresentable { .. }));
}

#[test]
fn extension_returning_host_value_is_rejected() {
	let mut registry = ExtensionRegistry::new();
	registry
		.add(FnExtension::new("loop", |v| v.as_str() == Some("x"), |_| Ok(Complex::new(0.0, 0.0).into()), Ok))
		.expect("registers");

	let err = encoded_with(&Value::from("x"), &registry, &EncodeOptions::default()).expect_err("recursion should fail");
	assert!(matches!(err, BsdfError::ExtensionRecursion { ref name } if name == "loop"));
}

#[test]
fn converted_children_still_see_extensions() {
	let mut registry = ExtensionRegistry::standard();
	registry
		.add(FnExtension::new(
			"pair",
			|v| v.as_str() == Some("pair"),
			|_| Ok(Value::from(vec![Value::from(Complex::new(0.0, 0.0))])),
			Ok,
		))
		.expect("registers");

	let bytes = encoded_with(&Value::from("pair"), &registry, &EncodeOptions::default()).expect("value encodes");
	assert_eq!(&bytes[..7], b"L\x04pair\x01");
	assert_eq!(&bytes[7..10], b"L\x01c");
}

#[test]
fn nesting_beyond_max_depth_fails() {
	let mut value = Value::Null;
	for _ in 0..4 {
		value = Value::from(vec![value]);
	}
	let opt = EncodeOptions {
		max_depth: 4,
		..EncodeOptions::default()
	};
	let err = encoded_with(&value, &ExtensionRegistry::new(), &opt).expect_err("too deep");
	assert!(matches!(err, BsdfError::DepthExceeded { max_depth: 4 }));

	let opt = EncodeOptions {
		max_depth: 5,
		..EncodeOptions::default()
	};
	assert!(encoded_with(&value, &ExtensionRegistry::new(), &opt).is_ok());
}
