mod blob;
mod bytes;
mod decode;
mod encode;
mod error;
mod extension;
mod header;
mod serializer;
mod size;
mod value;
mod writer;

/// Blob header layout and alignment helpers.
pub use blob::{BLOB_ALIGNMENT, BlobLayout, COMPRESSION_NONE, alignment_for, read_blob, write_blob};
/// Input cursor and tag classification.
pub use bytes::{Cursor, Tag};
/// Value decoder, options, and recoverable warnings.
pub use decode::{DecodeOptions, DecodeWarning, ValueDecoder};
/// Value encoder and options.
pub use encode::{EncodeOptions, encode_value};
/// Error and result aliases.
pub use error::{BsdfError, Result};
/// Extension trait, registry, and the standard complex-number extension.
pub use extension::{Complex, ComplexExtension, Extension, ExtensionRegistry, FnExtension, MAX_EXTENSION_NAME_LEN};
/// Stream magic and version.
pub use header::{FormatVersion, MAGIC};
/// Stream-level entry points.
pub use serializer::{Decoded, ListStream, Serializer, decode, encode};
/// Size and integer wire codecs.
pub use size::{EncodedSize, SIZE_INLINE_MAX, SIZE_STREAMING_MARKER, SIZE_WIDE_MARKER, Size, decode_int64, decode_size, encode_int64, encode_size, encode_size_wide};
/// In-memory value model.
pub use value::{Blob, HostObject, HostValue, Map, Value};
/// Output buffer.
pub use writer::ByteWriter;
