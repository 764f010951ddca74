use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// String-keyed map of values.
pub type Map = BTreeMap<String, Value>;

/// Dynamically typed value exchanged with the codec.
#[derive(Debug, Clone)]
pub enum Value {
	/// Tag `v`.
	Null,
	/// Tags `y` and `n`.
	Bool(bool),
	/// Tag `u`.
	UInt8(u8),
	/// Tag `i`; also produced for `h` on decode.
	Int64(i64),
	/// Tag `d`; also produced for `f` on decode.
	Float64(f64),
	/// Tag `s`.
	Text(String),
	/// Tag `l`.
	List(Vec<Value>),
	/// Tag `m`.
	Map(Map),
	/// Tag `b`.
	Bytes(Blob),
	/// Host value that only an extension can encode.
	Extended(HostValue),
}

impl Value {
	/// Wrap a host value for encoding through an extension.
	pub fn host<T: HostObject>(value: T) -> Self {
		Self::Extended(HostValue::new(value))
	}

	/// Stable lowercase label of the value kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::UInt8(_) | Self::Int64(_) => "int",
			Self::Float64(_) => "float",
			Self::Text(_) => "text",
			Self::List(_) => "list",
			Self::Map(_) => "map",
			Self::Bytes(_) => "bytes",
			Self::Extended(_) => "extended",
		}
	}

	/// Integer payload of `UInt8` and `Int64` values.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::UInt8(n) => Some(i64::from(*n)),
			Self::Int64(n) => Some(*n),
			_ => None,
		}
	}

	/// Numeric payload of integer and float values.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Float64(f) => Some(*f),
			_ => self.as_i64().map(|n| n as f64),
		}
	}

	/// Text payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// List items.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Map entries.
	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Blob payload.
	pub fn as_blob(&self) -> Option<&Blob> {
		match self {
			Self::Bytes(blob) => Some(blob),
			_ => None,
		}
	}

	/// Borrow the host value if it has type `T`.
	pub fn downcast_ref<T: HostObject>(&self) -> Option<&T> {
		match self {
			Self::Extended(host) => host.downcast_ref(),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Float64(a), Self::Float64(b)) => a == b,
			(Self::Text(a), Self::Text(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			(Self::Bytes(a), Self::Bytes(b)) => a == b,
			(Self::Extended(a), Self::Extended(b)) => a == b,
			// `u` and `i` are two encodings of one integer kind.
			(a, b) => match (a.as_i64(), b.as_i64()) {
				(Some(a), Some(b)) => a == b,
				_ => false,
			},
		}
	}
}

/// Binary payload of a `b` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
	/// Payload bytes.
	pub data: Vec<u8>,
	/// Zero-filled capacity reserved after the payload.
	pub extra_size: u64,
}

impl Blob {
	/// Wrap bytes without reserved capacity.
	pub fn new(data: impl Into<Vec<u8>>) -> Self {
		Self {
			data: data.into(),
			extra_size: 0,
		}
	}

	/// Wrap bytes and reserve `extra_size` bytes for in-place growth.
	pub fn with_extra_size(data: impl Into<Vec<u8>>, extra_size: u64) -> Self {
		Self {
			data: data.into(),
			extra_size,
		}
	}

	/// Bytes physically reserved in the stream.
	pub fn allocated_size(&self) -> u64 {
		self.data.len() as u64 + self.extra_size
	}
}

/// Host type that can travel inside [`Value::Extended`].
///
/// Implemented for every `'static` type that is `Debug + PartialEq + Send + Sync`.
pub trait HostObject: Any + fmt::Debug + Send + Sync {
	/// Compare with another host object of possibly different type.
	fn eq_host(&self, other: &dyn HostObject) -> bool;
	/// Upcast for downcasting.
	fn as_any(&self) -> &dyn Any;
	/// Host type name, used in error messages.
	fn type_name(&self) -> &'static str;
}

impl<T> HostObject for T
where
	T: Any + fmt::Debug + PartialEq + Send + Sync,
{
	fn eq_host(&self, other: &dyn HostObject) -> bool {
		other.as_any().downcast_ref::<T>().is_some_and(|other| self == other)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn type_name(&self) -> &'static str {
		std::any::type_name::<T>()
	}
}

/// Shared handle to a host object.
#[derive(Clone)]
pub struct HostValue(Arc<dyn HostObject>);

impl HostValue {
	/// Wrap a host object.
	pub fn new<T: HostObject>(value: T) -> Self {
		Self(Arc::new(value))
	}

	/// Borrow the object if it has type `T`.
	pub fn downcast_ref<T: HostObject>(&self) -> Option<&T> {
		self.0.as_any().downcast_ref::<T>()
	}

	/// Whether the object has type `T`.
	pub fn is<T: HostObject>(&self) -> bool {
		self.downcast_ref::<T>().is_some()
	}

	/// Host type name.
	pub fn type_name(&self) -> &'static str {
		self.0.type_name()
	}
}

impl fmt::Debug for HostValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl PartialEq for HostValue {
	fn eq(&self, other: &Self) -> bool {
		self.0.eq_host(other.0.as_ref())
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<u8> for Value {
	fn from(value: u8) -> Self {
		Self::UInt8(value)
	}
}

macro_rules! from_int {
	($($t:ty),*) => {
		$(
			impl From<$t> for Value {
				fn from(value: $t) -> Self {
					Self::Int64(i64::from(value))
				}
			}
		)*
	};
}

from_int!(i8, i16, i32, i64, u16, u32);

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::Float64(f64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::List(value)
	}
}

impl From<Map> for Value {
	fn from(value: Map) -> Self {
		Self::Map(value)
	}
}

impl From<Blob> for Value {
	fn from(value: Blob) -> Self {
		Self::Bytes(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
