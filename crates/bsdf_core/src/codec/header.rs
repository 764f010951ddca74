use std::fmt;

use crate::codec::bytes::Cursor;
use crate::codec::writer::ByteWriter;
use crate::codec::{BsdfError, Result};

/// Leading stream magic.
pub const MAGIC: [u8; 4] = *b"BSDF";

/// Format version written after the magic.
///
/// Major revisions are incompatible; minor revisions only add features, so
/// a reader accepts newer minor versions with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion {
	/// Incompatible revision number.
	pub major: u8,
	/// Additive revision number.
	pub minor: u8,
}

impl FormatVersion {
	/// Version implemented by this crate.
	pub const CURRENT: Self = Self::new(2, 0);
	/// Size of magic plus version bytes.
	pub const HEADER_SIZE: usize = 6;

	/// Build a version.
	pub const fn new(major: u8, minor: u8) -> Self {
		Self { major, minor }
	}

	/// Write magic and version.
	pub fn write(self, writer: &mut ByteWriter) {
		writer.push_bytes(&MAGIC);
		writer.push_uint8(self.major);
		writer.push_uint8(self.minor);
	}

	/// Read magic and version without judging compatibility.
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let magic = cursor.read_array::<4>().map_err(|_| BsdfError::InvalidMagic {
			magic: first4(cursor),
		})?;
		if magic != MAGIC {
			return Err(BsdfError::InvalidMagic { magic });
		}

		let major = cursor.read_u8()?;
		let minor = cursor.read_u8()?;
		Ok(Self { major, minor })
	}

	/// Check whether a stream written with `self` can be read by an
	/// implementation of `supported`.
	///
	/// Returns `Ok(true)` when the stream's minor version is newer.
	pub fn check_readable_by(self, supported: Self) -> Result<bool> {
		if self.major != supported.major {
			return Err(BsdfError::UnsupportedMajorVersion {
				found: self.major,
				supported: supported.major,
			});
		}
		Ok(self.minor > supported.minor)
	}
}

impl Default for FormatVersion {
	fn default() -> Self {
		Self::CURRENT
	}
}

impl fmt::Display for FormatVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.major, self.minor)
	}
}

fn first4(cursor: &mut Cursor<'_>) -> [u8; 4] {
	let take = cursor.remaining().min(4);
	let mut magic = [0_u8; 4];
	if let Ok(raw) = cursor.read_exact(take) {
		magic[..take].copy_from_slice(raw);
	}
	magic
}

#[cfg(test)]
mod tests;
