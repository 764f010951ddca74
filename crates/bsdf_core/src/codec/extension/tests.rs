use crate::codec::extension::{Complex, ComplexExtension, Extension, ExtensionRegistry, FnExtension};
use crate::codec::{BsdfError, Value};

fn tagged(name: &'static str, accept: &'static str) -> FnExtension {
	FnExtension::new(
		name,
		move |value| value.as_str() == Some(accept),
		move |_| Ok(Value::from(name)),
		Ok,
	)
}

#[test]
fn first_matching_extension_wins() {
	let mut registry = ExtensionRegistry::new();
	registry.add(tagged("first", "x")).expect("registers");
	registry.add(tagged("second", "x")).expect("registers");

	let found = registry.find_match(&Value::from("x")).expect("an extension matches");
	assert_eq!(found.name(), "first");
	assert!(registry.find_match(&Value::from("y")).is_none());
}

#[test]
fn lookup_is_by_exact_name() {
	let mut registry = ExtensionRegistry::new();
	registry.add(tagged("point", "p")).expect("registers");

	assert!(registry.get("point").is_some());
	assert!(registry.get("Point").is_none());
	assert!(registry.get("poin").is_none());
}

#[test]
fn same_name_replaces_in_place() {
	let mut registry = ExtensionRegistry::new();
	registry.add(tagged("a", "1")).expect("registers");
	registry.add(tagged("b", "2")).expect("registers");
	registry.add(tagged("a", "3")).expect("replaces");

	assert_eq!(registry.names().collect::<Vec<_>>(), ["a", "b"]);
	assert!(registry.find_match(&Value::from("1")).is_none());
	assert_eq!(registry.find_match(&Value::from("3")).map(|ext| ext.name()), Some("a"));
}

#[test]
fn names_must_fit_the_framing() {
	let mut registry = ExtensionRegistry::new();
	let err = registry.add(FnExtension::new("", |_| false, |v| Ok(v.clone()), Ok)).expect_err("empty name rejected");
	assert!(matches!(err, BsdfError::InvalidExtensionName { .. }));

	let long = "n".repeat(251);
	let err = registry.add(FnExtension::new(long, |_| false, |v| Ok(v.clone()), Ok)).expect_err("long name rejected");
	assert!(matches!(err, BsdfError::InvalidExtensionName { .. }));
	assert!(registry.is_empty());
}

#[test]
fn remove_drops_by_name() {
	let mut registry = ExtensionRegistry::standard();
	assert_eq!(registry.len(), 1);
	assert!(registry.remove(ComplexExtension::NAME));
	assert!(!registry.remove(ComplexExtension::NAME));
	assert!(registry.is_empty());
}

#[test]
fn complex_extension_converts_both_ways() {
	let ext = ComplexExtension;
	let value = Value::from(Complex::new(1.5, -2.0));
	assert!(ext.matches(&value));
	assert!(!ext.matches(&Value::Float64(1.5)));

	let encoded = ext.encode(&value).expect("encodes");
	assert_eq!(encoded, Value::List(vec![Value::Float64(1.5), Value::Float64(-2.0)]));
	assert_eq!(ext.decode(encoded).expect("decodes"), value);
}

#[test]
fn complex_extension_accepts_integer_parts() {
	let decoded = ComplexExtension
		.decode(Value::List(vec![Value::UInt8(3), Value::Int64(-4)]))
		.expect("decodes");
	assert_eq!(decoded.downcast_ref::<Complex>(), Some(&Complex::new(3.0, -4.0)));
}

#[test]
fn complex_extension_rejects_wrong_shape() {
	let err = ComplexExtension.decode(Value::from("nope")).expect_err("text is not complex");
	assert!(matches!(err, BsdfError::ExtensionFailed { ref name, .. } if name == "c"));
}
