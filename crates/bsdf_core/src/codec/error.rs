use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BsdfError>;

/// Errors produced while encoding, decoding, and converting BSDF data.
#[derive(Debug, Error)]
pub enum BsdfError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Stream does not start with the `BSDF` magic.
	#[error("this does not look like BSDF data (magic={magic:?})")]
	InvalidMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Stream major version differs from the implementation's.
	#[error("reading stream with major version {found}, implementation supports {supported}")]
	UnsupportedMajorVersion {
		/// Major version stored in the stream header.
		found: u8,
		/// Major version this implementation reads and writes.
		supported: u8,
	},
	/// Size prefix used a reserved marker byte.
	#[error("invalid size marker {marker} at offset {at}")]
	InvalidSizeMarker {
		/// Offending marker byte (251, 252, or 254).
		marker: u8,
		/// Offset of the marker byte.
		at: usize,
	},
	/// Streaming size marker appeared where a concrete size is required.
	#[error("streaming size marker at offset {at} is only valid for lists")]
	StreamingSizeNotAllowed {
		/// Offset of the marker byte.
		at: usize,
	},
	/// Size does not fit the host address space.
	#[error("size {size} at offset {at} exceeds addressable memory")]
	SizeTooLarge {
		/// Decoded size value.
		size: u64,
		/// Offset of the size prefix.
		at: usize,
	},
	/// Tag byte is not a known value kind.
	#[error("invalid value tag {:?} at offset {at}", char::from(*.tag))]
	InvalidTag {
		/// Offending tag byte.
		tag: u8,
		/// Offset of the tag byte.
		at: usize,
	},
	/// End-of-stream marker outside of a streaming list.
	#[error("unexpected end of stream at offset {at}")]
	UnexpectedEndOfStream {
		/// Offset where a value tag was expected.
		at: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Text payload was not valid UTF-8.
	#[error("invalid utf-8 text at offset {at}")]
	InvalidUtf8 {
		/// Offset of the first text byte.
		at: usize,
	},
	/// Blob declared more used bytes than allocated bytes.
	#[error("blob at offset {at} uses {used} bytes but allocates only {allocated}")]
	BlobSizeMismatch {
		/// Declared allocated size.
		allocated: u64,
		/// Declared used size.
		used: u64,
		/// Offset of the blob header.
		at: usize,
	},
	/// Blob payload uses a compression codec this implementation lacks.
	#[error("unsupported blob compression {compression} at offset {at}")]
	UnsupportedCompression {
		/// Compression code stored in the blob header.
		compression: u8,
		/// Offset of the compression byte.
		at: usize,
	},
	/// Value has no native encoding and no extension accepted it.
	#[error("value of type {type_name} is not a BSDF type and no extension handles it")]
	Unrepresentable {
		/// Host type name of the value.
		type_name: String,
	},
	/// Encoder or decoder recursion depth exceeded configured limit.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Extension name is empty or too long to be framed.
	#[error("invalid extension name {name:?} (expected 1 to 250 bytes)")]
	InvalidExtensionName {
		/// Rejected name.
		name: String,
	},
	/// Extension encode or decode hook reported a failure.
	#[error("extension {name:?} failed: {message}")]
	ExtensionFailed {
		/// Extension name.
		name: String,
		/// Failure description from the extension.
		message: String,
	},
	/// Extension converted a value into another host value.
	#[error("extension {name:?} produced a value that still needs an extension")]
	ExtensionRecursion {
		/// Extension name.
		name: String,
	},
	/// Conversion between BSDF and another format failed.
	#[error("conversion failed: {message}")]
	Conversion {
		/// Failure description.
		message: String,
	},
}

impl BsdfError {
	/// Build an [`BsdfError::ExtensionFailed`] from any displayable reason.
	pub fn extension(name: impl Into<String>, message: impl std::fmt::Display) -> Self {
		Self::ExtensionFailed {
			name: name.into(),
			message: message.to_string(),
		}
	}
}
