use std::fmt;

use crate::codec::blob::read_blob;
use crate::codec::bytes::{Cursor, Tag};
use crate::codec::size::Size;
use crate::codec::{Blob, BsdfError, ExtensionRegistry, FormatVersion, Map, Result, Value};

/// Runtime limits and version policy for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Version this reader implements; streams with another major version are rejected.
	pub version: FormatVersion,
	/// Maximum list/map nesting depth.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			version: FormatVersion::CURRENT,
			max_depth: 512,
		}
	}
}

impl DecodeOptions {
	/// Preset for input from untrusted sources.
	pub fn shallow() -> Self {
		Self {
			max_depth: 64,
			..Self::default()
		}
	}
}

/// Recoverable condition noticed while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
	/// Stream uses a newer minor version; decoding proceeded best-effort.
	NewerMinorVersion {
		/// Version in the stream header.
		found: FormatVersion,
		/// Version implemented by the reader.
		supported: FormatVersion,
	},
	/// Value was tagged with an extension the registry does not know; the
	/// raw value was kept.
	UnknownExtension {
		/// Extension name from the stream.
		name: String,
		/// Offset of the value tag.
		at: usize,
	},
}

impl fmt::Display for DecodeWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NewerMinorVersion { found, supported } => {
				write!(f, "reading stream with higher minor version {found} than the implementation {supported}")
			}
			Self::UnknownExtension { name, at } => {
				write!(f, "no extension found for {name:?} at offset {at}, value passes in raw form")
			}
		}
	}
}

/// Recursive value decoder over a cursor.
pub struct ValueDecoder<'a, 'r> {
	cursor: Cursor<'a>,
	extensions: &'r ExtensionRegistry,
	opt: &'r DecodeOptions,
	warnings: Vec<DecodeWarning>,
}

impl<'a, 'r> ValueDecoder<'a, 'r> {
	/// Create a decoder reading from `cursor`.
	pub fn new(cursor: Cursor<'a>, extensions: &'r ExtensionRegistry, opt: &'r DecodeOptions) -> Self {
		Self {
			cursor,
			extensions,
			opt,
			warnings: Vec::new(),
		}
	}

	/// Record a warning and log it.
	pub fn warn(&mut self, warning: DecodeWarning) {
		tracing::warn!(target: "bsdf::decode", "{warning}");
		self.warnings.push(warning);
	}

	/// Warnings collected so far.
	pub fn warnings(&self) -> &[DecodeWarning] {
		&self.warnings
	}

	/// Consume the decoder, returning collected warnings.
	pub fn into_warnings(self) -> Vec<DecodeWarning> {
		self.warnings
	}

	/// Decode one value; end-of-stream here means the input is truncated.
	pub fn decode_value(&mut self) -> Result<Value> {
		self.decode_required(0)
	}

	fn decode_required(&mut self, depth: u32) -> Result<Value> {
		let at = self.cursor.tell();
		self.decode_impl(depth)?.ok_or(BsdfError::UnexpectedEndOfStream { at })
	}

	fn decode_impl(&mut self, depth: u32) -> Result<Option<Value>> {
		if depth >= self.opt.max_depth {
			return Err(BsdfError::DepthExceeded {
				max_depth: self.opt.max_depth,
			});
		}

		let at = self.cursor.tell();
		let tag = match self.cursor.read_tag() {
			Tag::Value(tag) => tag,
			Tag::End => return Ok(None),
		};

		let extension = if tag.is_ascii_uppercase() {
			Some(self.cursor.read_str()?)
		} else {
			None
		};

		let value = self.decode_base(tag, at, depth)?;
		let Some(name) = extension else {
			return Ok(Some(value));
		};

		match self.extensions.get(name) {
			Some(extension) => extension.decode(value).map(Some),
			None => {
				self.warn(DecodeWarning::UnknownExtension { name: name.to_owned(), at });
				Ok(Some(value))
			}
		}
	}

	fn decode_base(&mut self, tag: u8, at: usize, depth: u32) -> Result<Value> {
		let value = match tag.to_ascii_lowercase() {
			b'v' => Value::Null,
			b'y' => Value::Bool(true),
			b'n' => Value::Bool(false),
			b'u' => Value::UInt8(self.cursor.read_u8()?),
			b'h' => Value::Int64(i64::from(self.cursor.read_i16_le()?)),
			b'i' => Value::Int64(self.cursor.read_int64()?),
			b'f' => Value::Float64(f64::from(self.cursor.read_f32_le()?)),
			b'd' => Value::Float64(self.cursor.read_f64_le()?),
			b's' => Value::Text(self.cursor.read_str()?.to_owned()),
			b'l' => Value::List(self.decode_list(depth)?),
			b'm' => Value::Map(self.decode_map(depth)?),
			b'b' => {
				let (layout, payload) = read_blob(&mut self.cursor)?;
				Value::Bytes(Blob::with_extra_size(payload, layout.extra_size()))
			}
			_ => return Err(BsdfError::InvalidTag { tag, at }),
		};
		Ok(value)
	}

	fn decode_list(&mut self, depth: u32) -> Result<Vec<Value>> {
		let at = self.cursor.tell();
		match self.cursor.read_size()? {
			Size::Streaming => {
				let mut items = Vec::new();
				while let Some(item) = self.decode_impl(depth + 1)? {
					items.push(item);
				}
				Ok(items)
			}
			Size::Known(count) => {
				let count = usize::try_from(count).map_err(|_| BsdfError::SizeTooLarge { size: count, at })?;
				// Every item takes at least one byte.
				let mut items = Vec::with_capacity(count.min(self.cursor.remaining()));
				for _ in 0..count {
					items.push(self.decode_required(depth + 1)?);
				}
				Ok(items)
			}
		}
	}

	fn decode_map(&mut self, depth: u32) -> Result<Map> {
		let count = self.cursor.read_len()?;
		let mut map = Map::new();
		for _ in 0..count {
			let key = self.cursor.read_str()?.to_owned();
			let value = self.decode_required(depth + 1)?;
			map.insert(key, value);
		}
		Ok(map)
	}
}
