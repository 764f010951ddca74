use std::fmt;
use std::sync::Arc;

use crate::codec::{BsdfError, Result, Value};

/// Longest extension name the framing accepts.
pub const MAX_EXTENSION_NAME_LEN: usize = 250;

/// Named bidirectional converter for values the core cannot encode natively.
///
/// At encode time the first registered extension whose [`Extension::matches`]
/// accepts a value replaces it with [`Extension::encode`]'s result. At decode
/// time a value tagged with the extension's name is passed to
/// [`Extension::decode`].
pub trait Extension: Send + Sync {
	/// Unique name written next to converted values.
	fn name(&self) -> &str;

	/// Whether this extension converts `value`.
	fn matches(&self, value: &Value) -> bool;

	/// Convert a matched value into an encodable value.
	fn encode(&self, value: &Value) -> Result<Value>;

	/// Rebuild the host value from its decoded representation.
	fn decode(&self, value: Value) -> Result<Value>;
}

type MatchFn = dyn Fn(&Value) -> bool + Send + Sync;
type EncodeFn = dyn Fn(&Value) -> Result<Value> + Send + Sync;
type DecodeFn = dyn Fn(Value) -> Result<Value> + Send + Sync;

/// Extension assembled from closures.
///
/// ```
/// use bsdf::codec::{BsdfError, FnExtension, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
///
/// let ext = FnExtension::new(
/// 	"celsius",
/// 	|v| v.downcast_ref::<Celsius>().is_some(),
/// 	|v| Ok(Value::Float64(v.downcast_ref::<Celsius>().map_or(0.0, |c| c.0))),
/// 	|v| v.as_f64().map(|f| Value::host(Celsius(f))).ok_or_else(|| BsdfError::extension("celsius", "expected a number")),
/// );
/// # let _ = ext;
/// ```
pub struct FnExtension {
	name: String,
	matches: Box<MatchFn>,
	encode: Box<EncodeFn>,
	decode: Box<DecodeFn>,
}

impl FnExtension {
	/// Build an extension from a name and its three hooks.
	pub fn new<M, E, D>(name: impl Into<String>, matches: M, encode: E, decode: D) -> Self
	where
		M: Fn(&Value) -> bool + Send + Sync + 'static,
		E: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
		D: Fn(Value) -> Result<Value> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			matches: Box::new(matches),
			encode: Box::new(encode),
			decode: Box::new(decode),
		}
	}
}

impl Extension for FnExtension {
	fn name(&self) -> &str {
		&self.name
	}

	fn matches(&self, value: &Value) -> bool {
		(self.matches)(value)
	}

	fn encode(&self, value: &Value) -> Result<Value> {
		(self.encode)(value)
	}

	fn decode(&self, value: Value) -> Result<Value> {
		(self.decode)(value)
	}
}

/// Ordered collection of extensions.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
	entries: Vec<Arc<dyn Extension>>,
}

impl ExtensionRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry holding the standard extensions.
	pub fn standard() -> Self {
		let mut registry = Self::new();
		registry.entries.push(Arc::new(ComplexExtension));
		registry
	}

	/// Register an extension.
	///
	/// An extension whose name is already registered is replaced in place, so
	/// it keeps its position in the match order.
	pub fn add(&mut self, extension: impl Extension + 'static) -> Result<()> {
		self.add_shared(Arc::new(extension))
	}

	/// Register a shared extension.
	pub fn add_shared(&mut self, extension: Arc<dyn Extension>) -> Result<()> {
		let name = extension.name();
		if name.is_empty() || name.len() > MAX_EXTENSION_NAME_LEN {
			return Err(BsdfError::InvalidExtensionName { name: name.to_owned() });
		}

		match self.entries.iter().position(|entry| entry.name() == name) {
			Some(idx) => {
				tracing::warn!(target: "bsdf::ext", name, "replacing registered extension");
				self.entries[idx] = extension;
			}
			None => self.entries.push(extension),
		}
		Ok(())
	}

	/// Remove an extension by name, returning whether one was registered.
	pub fn remove(&mut self, name: &str) -> bool {
		let before = self.entries.len();
		self.entries.retain(|entry| entry.name() != name);
		self.entries.len() != before
	}

	/// First extension accepting `value`, in registration order.
	pub fn find_match(&self, value: &Value) -> Option<&dyn Extension> {
		self.entries.iter().find(|entry| entry.matches(value)).map(Arc::as_ref)
	}

	/// Extension registered under `name`.
	pub fn get(&self, name: &str) -> Option<&dyn Extension> {
		self.entries.iter().find(|entry| entry.name() == name).map(Arc::as_ref)
	}

	/// Registered names, in match order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.name())
	}

	/// Number of registered extensions.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no extension is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Debug for ExtensionRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.names()).finish()
	}
}

/// Complex number host type handled by [`ComplexExtension`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
	/// Real part.
	pub re: f64,
	/// Imaginary part.
	pub im: f64,
}

impl Complex {
	/// Build a complex number.
	pub fn new(re: f64, im: f64) -> Self {
		Self { re, im }
	}
}

impl From<Complex> for Value {
	fn from(value: Complex) -> Self {
		Value::host(value)
	}
}

/// Standard extension `c`: complex numbers as `[re, im]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexExtension;

impl ComplexExtension {
	/// Name written to the stream.
	pub const NAME: &'static str = "c";
}

impl Extension for ComplexExtension {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn matches(&self, value: &Value) -> bool {
		value.downcast_ref::<Complex>().is_some()
	}

	fn encode(&self, value: &Value) -> Result<Value> {
		let c = value
			.downcast_ref::<Complex>()
			.ok_or_else(|| BsdfError::extension(Self::NAME, format!("expected complex, got {}", value.kind())))?;
		Ok(Value::List(vec![Value::Float64(c.re), Value::Float64(c.im)]))
	}

	fn decode(&self, value: Value) -> Result<Value> {
		match value.as_list() {
			Some([re, im]) => match (re.as_f64(), im.as_f64()) {
				(Some(re), Some(im)) => Ok(Complex::new(re, im).into()),
				_ => Err(BsdfError::extension(Self::NAME, "expected two numbers")),
			},
			_ => Err(BsdfError::extension(Self::NAME, format!("expected a two-element list, got {}", value.kind()))),
		}
	}
}

#[cfg(test)]
mod tests;
