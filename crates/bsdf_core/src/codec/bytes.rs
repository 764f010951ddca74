use crate::codec::size::{Size, decode_int64, decode_size};
use crate::codec::{BsdfError, Result};

/// Result of reading a value tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
	/// Tag byte of the next value.
	Value(u8),
	/// Zero tag or exhausted input; ends a streaming list.
	End,
}

/// Bounded cursor over an immutable byte slice.
///
/// Offsets returned by [`Cursor::tell`] and carried in errors include the base
/// offset, so a cursor over a sub-slice reports positions in the enclosing
/// stream.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	base: usize,
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self::with_base(bytes, 0)
	}

	/// Create a cursor over a region that starts `base` bytes into a larger stream.
	pub fn with_base(bytes: &'a [u8], base: usize) -> Self {
		Self { bytes, base, pos: 0 }
	}

	/// Return current byte offset, including the base offset.
	pub fn tell(&self) -> usize {
		self.base + self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(BsdfError::UnexpectedEof {
				at: self.tell(),
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Advance past `n` bytes without inspecting them.
	pub fn skip(&mut self, n: usize) -> Result<()> {
		self.read_exact(n).map(|_| ())
	}

	/// Read a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read the next value tag, reporting end-of-stream separately from errors.
	pub fn read_tag(&mut self) -> Tag {
		match self.bytes.get(self.pos) {
			Some(&tag) => {
				self.pos += 1;
				if tag == 0 { Tag::End } else { Tag::Value(tag) }
			}
			None => Tag::End,
		}
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a little-endian `i16`.
	pub fn read_i16_le(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read an eight-byte two's-complement integer.
	pub fn read_int64(&mut self) -> Result<i64> {
		Ok(decode_int64(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f64`.
	pub fn read_f64_le(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read a size prefix, which may be the streaming marker.
	pub fn read_size(&mut self) -> Result<Size> {
		decode_size(self)
	}

	/// Read a size prefix that must be a concrete count.
	pub fn read_known_size(&mut self) -> Result<u64> {
		let at = self.tell();
		match self.read_size()? {
			Size::Known(n) => Ok(n),
			Size::Streaming => Err(BsdfError::StreamingSizeNotAllowed { at }),
		}
	}

	/// Read a concrete size and narrow it to `usize`.
	pub fn read_len(&mut self) -> Result<usize> {
		let at = self.tell();
		let size = self.read_known_size()?;
		usize::try_from(size).map_err(|_| BsdfError::SizeTooLarge { size, at })
	}

	/// Read length-prefixed UTF-8 text.
	pub fn read_str(&mut self) -> Result<&'a str> {
		let len = self.read_len()?;
		let at = self.tell();
		let raw = self.read_exact(len)?;
		std::str::from_utf8(raw).map_err(|_| BsdfError::InvalidUtf8 { at })
	}
}

#[cfg(test)]
mod tests;
