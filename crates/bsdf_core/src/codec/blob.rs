use crate::codec::bytes::Cursor;
use crate::codec::size::SIZE_INLINE_MAX;
use crate::codec::writer::ByteWriter;
use crate::codec::{Blob, BsdfError, Result};

/// Compression code for uncompressed payloads.
pub const COMPRESSION_NONE: u8 = 0;
/// Payload alignment boundary, relative to the start of the stream.
pub const BLOB_ALIGNMENT: usize = 8;
/// Length of the optional checksum field.
pub const CHECKSUM_LEN: usize = 16;

/// Wire header of a byte blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobLayout {
	/// Bytes physically reserved for the payload.
	pub allocated_size: u64,
	/// Bytes holding the (possibly compressed) payload.
	pub used_size: u64,
	/// Logical payload size before compression.
	pub data_size: u64,
	/// Compression code.
	pub compression: u8,
	/// Checksum carried in the stream; never computed or verified here.
	pub checksum: Option<[u8; CHECKSUM_LEN]>,
	/// Zero bytes inserted before the payload.
	pub alignment: u8,
}

impl BlobLayout {
	/// Reserved bytes following the payload.
	pub fn extra_size(&self) -> u64 {
		self.allocated_size - self.used_size
	}
}

/// Number of padding bytes that puts a payload on an 8-byte boundary, given
/// the offset at which the alignment byte itself will be written.
pub fn alignment_for(alignment_byte_at: usize) -> u8 {
	let payload_at = alignment_byte_at + 1;
	((BLOB_ALIGNMENT - payload_at % BLOB_ALIGNMENT) % BLOB_ALIGNMENT) as u8
}

/// Write blob header, padding, payload, and reserved capacity.
///
/// Nothing is written when the reserved capacity cannot be represented.
pub fn write_blob(writer: &mut ByteWriter, blob: &Blob) -> Result<BlobLayout> {
	let at = writer.tell();
	let used_size = blob.data.len() as u64;
	let allocated_size = used_size.checked_add(blob.extra_size).ok_or(BsdfError::SizeTooLarge {
		size: blob.extra_size,
		at,
	})?;
	let extra_len = to_len(blob.extra_size, at)?;

	// Wide sizes leave room to grow the blob in place later.
	if allocated_size > SIZE_INLINE_MAX {
		writer.push_size_wide(allocated_size);
		writer.push_size_wide(used_size);
		writer.push_size_wide(used_size);
	} else {
		writer.push_size(allocated_size);
		writer.push_size(used_size);
		writer.push_size(used_size);
	}

	writer.push_uint8(COMPRESSION_NONE);
	writer.push_uint8(0);

	let alignment = alignment_for(writer.tell());
	writer.push_uint8(alignment);
	writer.push_zeros(usize::from(alignment));

	writer.push_bytes(&blob.data);
	writer.push_zeros(extra_len);

	Ok(BlobLayout {
		allocated_size,
		used_size,
		data_size: used_size,
		compression: COMPRESSION_NONE,
		checksum: None,
		alignment,
	})
}

/// Read a blob, returning its header and borrowed payload.
pub fn read_blob<'a>(cursor: &mut Cursor<'a>) -> Result<(BlobLayout, &'a [u8])> {
	let at = cursor.tell();
	let allocated_size = cursor.read_known_size()?;
	let used_size = cursor.read_known_size()?;
	let data_size = cursor.read_known_size()?;
	if used_size > allocated_size {
		return Err(BsdfError::BlobSizeMismatch {
			allocated: allocated_size,
			used: used_size,
			at,
		});
	}

	let compression_at = cursor.tell();
	let compression = cursor.read_u8()?;
	if compression != COMPRESSION_NONE {
		return Err(BsdfError::UnsupportedCompression {
			compression,
			at: compression_at,
		});
	}

	let checksum = match cursor.read_u8()? {
		0 => None,
		_ => Some(cursor.read_array::<CHECKSUM_LEN>()?),
	};

	let alignment = cursor.read_u8()?;
	cursor.skip(usize::from(alignment))?;

	let payload = cursor.read_exact(to_len(used_size, at)?)?;
	cursor.skip(to_len(allocated_size - used_size, at)?)?;

	let layout = BlobLayout {
		allocated_size,
		used_size,
		data_size,
		compression,
		checksum,
		alignment,
	};
	Ok((layout, payload))
}

fn to_len(size: u64, at: usize) -> Result<usize> {
	usize::try_from(size).map_err(|_| BsdfError::SizeTooLarge { size, at })
}
