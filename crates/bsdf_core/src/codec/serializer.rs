use crate::codec::bytes::Cursor;
use crate::codec::decode::{DecodeOptions, DecodeWarning, ValueDecoder};
use crate::codec::encode::{EncodeOptions, encode_value};
use crate::codec::size::SIZE_STREAMING_MARKER;
use crate::codec::writer::ByteWriter;
use crate::codec::{Extension, ExtensionRegistry, FormatVersion, Result, Value};

/// Encode `value` into a complete stream.
///
/// Without a registry, host values fail with
/// [`crate::codec::BsdfError::Unrepresentable`].
pub fn encode(value: &Value, extensions: Option<&ExtensionRegistry>) -> Result<Vec<u8>> {
	let empty = ExtensionRegistry::new();
	encode_stream(value, extensions.unwrap_or(&empty), &EncodeOptions::default())
}

/// Decode a complete stream into a value.
///
/// Warnings are logged and dropped; use [`Serializer::decode_report`] to
/// observe them.
pub fn decode(bytes: &[u8], extensions: Option<&ExtensionRegistry>) -> Result<Value> {
	let empty = ExtensionRegistry::new();
	decode_stream(bytes, extensions.unwrap_or(&empty), &DecodeOptions::default()).map(|decoded| decoded.value)
}

/// Decoded value together with stream metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
	/// Root value.
	pub value: Value,
	/// Version from the stream header.
	pub version: FormatVersion,
	/// Recoverable conditions seen while decoding.
	pub warnings: Vec<DecodeWarning>,
}

/// Extension registry bundled with encode and decode options.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
	extensions: ExtensionRegistry,
	encode: EncodeOptions,
	decode: DecodeOptions,
}

impl Serializer {
	/// Serializer without extensions.
	pub fn new() -> Self {
		Self::default()
	}

	/// Serializer using `extensions`.
	pub fn with_extensions(extensions: ExtensionRegistry) -> Self {
		Self {
			extensions,
			..Self::default()
		}
	}

	/// Replace encode options.
	pub fn with_encode_options(mut self, opt: EncodeOptions) -> Self {
		self.encode = opt;
		self
	}

	/// Replace decode options.
	pub fn with_decode_options(mut self, opt: DecodeOptions) -> Self {
		self.decode = opt;
		self
	}

	/// Register an extension, replacing one with the same name.
	pub fn add_extension(&mut self, extension: impl Extension + 'static) -> Result<()> {
		self.extensions.add(extension)
	}

	/// Remove an extension by name.
	pub fn remove_extension(&mut self, name: &str) -> bool {
		self.extensions.remove(name)
	}

	/// Registered extensions.
	pub fn extensions(&self) -> &ExtensionRegistry {
		&self.extensions
	}

	/// Encode `value` into a complete stream.
	pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
		encode_stream(value, &self.extensions, &self.encode)
	}

	/// Decode a complete stream into a value.
	pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
		self.decode_report(bytes).map(|decoded| decoded.value)
	}

	/// Decode a complete stream, keeping version and warnings.
	pub fn decode_report(&self, bytes: &[u8]) -> Result<Decoded> {
		decode_stream(bytes, &self.extensions, &self.decode)
	}

	/// Start a stream whose root is a list of unknown length.
	pub fn list_stream(&self) -> ListStream<'_> {
		let mut writer = ByteWriter::new();
		self.encode.version.write(&mut writer);
		writer.push_char(b'l');
		writer.push_uint8(SIZE_STREAMING_MARKER);
		ListStream {
			serializer: self,
			writer,
			count: 0,
		}
	}
}

/// Writer for a stream whose root list grows one item at a time.
///
/// End of data terminates the list, so [`ListStream::finish`] needs no
/// trailing marker.
pub struct ListStream<'s> {
	serializer: &'s Serializer,
	writer: ByteWriter,
	count: usize,
}

impl ListStream<'_> {
	/// Append one item.
	///
	/// On error nothing from `item` is kept, so the stream stays valid.
	pub fn push(&mut self, item: &Value) -> Result<()> {
		let mark = self.writer.tell();
		if let Err(err) = encode_value(&mut self.writer, item, &self.serializer.extensions, &self.serializer.encode) {
			self.writer.truncate(mark);
			return Err(err);
		}
		self.count += 1;
		Ok(())
	}

	/// Items appended so far.
	pub fn len(&self) -> usize {
		self.count
	}

	/// Whether no item was appended.
	pub fn is_empty(&self) -> bool {
		self.count == 0
	}

	/// Stream bytes, terminated by end of data.
	pub fn finish(self) -> Vec<u8> {
		tracing::debug!(items = self.count, bytes = self.writer.tell(), "finished list stream");
		self.writer.into_bytes()
	}

	/// Stream bytes with an explicit end-of-stream tag, for embedding.
	pub fn finish_with_terminator(mut self) -> Vec<u8> {
		self.writer.push_uint8(0);
		self.finish()
	}
}

fn encode_stream(value: &Value, extensions: &ExtensionRegistry, opt: &EncodeOptions) -> Result<Vec<u8>> {
	let mut writer = ByteWriter::new();
	opt.version.write(&mut writer);
	encode_value(&mut writer, value, extensions, opt)?;
	tracing::debug!(bytes = writer.tell(), kind = value.kind(), "encoded stream");
	Ok(writer.into_bytes())
}

fn decode_stream(bytes: &[u8], extensions: &ExtensionRegistry, opt: &DecodeOptions) -> Result<Decoded> {
	let mut cursor = Cursor::new(bytes);
	let version = FormatVersion::read(&mut cursor)?;
	let newer_minor = version.check_readable_by(opt.version)?;

	let mut decoder = ValueDecoder::new(cursor, extensions, opt);
	if newer_minor {
		decoder.warn(DecodeWarning::NewerMinorVersion {
			found: version,
			supported: opt.version,
		});
	}

	let value = decoder.decode_value()?;
	let warnings = decoder.into_warnings();
	tracing::debug!(bytes = bytes.len(), kind = value.kind(), warnings = warnings.len(), "decoded stream");
	Ok(Decoded { value, version, warnings })
}
