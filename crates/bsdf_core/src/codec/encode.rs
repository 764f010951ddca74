use crate::codec::blob::write_blob;
use crate::codec::writer::ByteWriter;
use crate::codec::{BsdfError, ExtensionRegistry, FormatVersion, Result, Value};

/// Behavior switches and limits for encoding.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
	/// Version written to the stream header.
	pub version: FormatVersion,
	/// Write floats as 64-bit `d` values; `false` writes 32-bit `f` values.
	pub float64: bool,
	/// Maximum list/map nesting depth.
	pub max_depth: u32,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self {
			version: FormatVersion::CURRENT,
			float64: true,
			max_depth: 512,
		}
	}
}

impl EncodeOptions {
	/// Preset that halves float payloads at the cost of precision.
	pub fn compact_floats() -> Self {
		Self {
			float64: false,
			..Self::default()
		}
	}
}

/// Encode one value, consulting `extensions` at every node.
pub fn encode_value(writer: &mut ByteWriter, value: &Value, extensions: &ExtensionRegistry, opt: &EncodeOptions) -> Result<()> {
	encode_impl(writer, value, extensions, opt, 0)
}

fn encode_impl(writer: &mut ByteWriter, value: &Value, extensions: &ExtensionRegistry, opt: &EncodeOptions, depth: u32) -> Result<()> {
	if depth >= opt.max_depth {
		return Err(BsdfError::DepthExceeded { max_depth: opt.max_depth });
	}

	let Some(extension) = extensions.find_match(value) else {
		return encode_native(writer, value, None, extensions, opt, depth);
	};

	let converted = extension.encode(value)?;
	if matches!(converted, Value::Extended(_)) {
		return Err(BsdfError::ExtensionRecursion {
			name: extension.name().to_owned(),
		});
	}
	encode_native(writer, &converted, Some(extension.name()), extensions, opt, depth)
}

fn encode_native(
	writer: &mut ByteWriter,
	value: &Value,
	extension: Option<&str>,
	extensions: &ExtensionRegistry,
	opt: &EncodeOptions,
	depth: u32,
) -> Result<()> {
	match value {
		Value::Null => push_tag(writer, b'v', extension),
		Value::Bool(false) => push_tag(writer, b'n', extension),
		Value::Bool(true) => push_tag(writer, b'y', extension),
		Value::UInt8(n) => {
			push_tag(writer, b'u', extension);
			writer.push_uint8(*n);
		}
		Value::Int64(n) => match u8::try_from(*n) {
			Ok(small) => {
				push_tag(writer, b'u', extension);
				writer.push_uint8(small);
			}
			Err(_) => {
				push_tag(writer, b'i', extension);
				writer.push_int64(*n);
			}
		},
		Value::Float64(f) if opt.float64 => {
			push_tag(writer, b'd', extension);
			writer.push_float64(*f);
		}
		Value::Float64(f) => {
			push_tag(writer, b'f', extension);
			writer.push_float32(*f as f32);
		}
		Value::Text(text) => {
			push_tag(writer, b's', extension);
			writer.push_str(text);
		}
		Value::List(items) => {
			push_tag(writer, b'l', extension);
			writer.push_size(items.len() as u64);
			for item in items {
				encode_impl(writer, item, extensions, opt, depth + 1)?;
			}
		}
		Value::Map(map) => {
			push_tag(writer, b'm', extension);
			writer.push_size(map.len() as u64);
			for (key, item) in map {
				writer.push_str(key);
				encode_impl(writer, item, extensions, opt, depth + 1)?;
			}
		}
		Value::Bytes(blob) => {
			push_tag(writer, b'b', extension);
			write_blob(writer, blob)?;
		}
		Value::Extended(host) => {
			return Err(BsdfError::Unrepresentable {
				type_name: host.type_name().to_owned(),
			});
		}
	}
	Ok(())
}

fn push_tag(writer: &mut ByteWriter, tag: u8, extension: Option<&str>) {
	match extension {
		Some(name) => {
			writer.push_char(tag.to_ascii_uppercase());
			writer.push_str(name);
		}
		None => writer.push_char(tag),
	}
}

#[cfg(test)]
mod tests;
