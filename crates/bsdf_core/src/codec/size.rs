//! Size prefixes and 64-bit integers, written with byte-wise arithmetic.
//!
//! Both encodings are defined in terms of division and remainder only, so an
//! implementation whose only number type is an IEEE double produces the same
//! bytes as one with native 64-bit integers.

use crate::codec::bytes::Cursor;
use crate::codec::{BsdfError, Result};

/// Largest size stored inline in a single byte.
pub const SIZE_INLINE_MAX: u64 = 250;
/// Marker byte announcing two little-endian `u32` halves.
pub const SIZE_WIDE_MARKER: u8 = 253;
/// Marker byte announcing a list of unknown length.
pub const SIZE_STREAMING_MARKER: u8 = 255;

const HALF: u64 = 1 << 32;

/// Decoded size prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
	/// Element or byte count.
	Known(u64),
	/// Unknown length; items continue until end-of-stream.
	Streaming,
}

/// Encoded size prefix, one or nine bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedSize {
	buf: [u8; 9],
	len: usize,
}

impl EncodedSize {
	/// Encoded bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.buf[..self.len]
	}
}

impl AsRef<[u8]> for EncodedSize {
	fn as_ref(&self) -> &[u8] {
		self.as_bytes()
	}
}

/// Encode a size in the shortest form.
pub fn encode_size(n: u64) -> EncodedSize {
	if n <= SIZE_INLINE_MAX {
		let mut buf = [0_u8; 9];
		buf[0] = n as u8;
		return EncodedSize { buf, len: 1 };
	}
	EncodedSize {
		buf: encode_size_wide(n),
		len: 9,
	}
}

/// Encode a size in the nine-byte form regardless of magnitude.
pub fn encode_size_wide(n: u64) -> [u8; 9] {
	let low = (n % HALF) as u32;
	let high = ((n / HALF) % HALF) as u32;

	let mut buf = [0_u8; 9];
	buf[0] = SIZE_WIDE_MARKER;
	buf[1..5].copy_from_slice(&low.to_le_bytes());
	buf[5..9].copy_from_slice(&high.to_le_bytes());
	buf
}

/// Read a size prefix from `cursor`.
pub fn decode_size(cursor: &mut Cursor<'_>) -> Result<Size> {
	let at = cursor.tell();
	match cursor.read_u8()? {
		marker if u64::from(marker) <= SIZE_INLINE_MAX => Ok(Size::Known(u64::from(marker))),
		SIZE_WIDE_MARKER => {
			let low = u64::from(cursor.read_u32_le()?);
			let high = u64::from(cursor.read_u32_le()?);
			Ok(Size::Known(low + high * HALF))
		}
		SIZE_STREAMING_MARKER => Ok(Size::Streaming),
		marker => Err(BsdfError::InvalidSizeMarker { marker, at }),
	}
}

/// Encode a signed integer as eight little-endian two's-complement bytes.
pub fn encode_int64(n: i64) -> [u8; 8] {
	let negative = n < 0;
	// `-(n + 1)` is the magnitude left after complementing every byte.
	let mut rest = if negative { (n + 1).unsigned_abs() } else { n as u64 };

	let mut out = [0_u8; 8];
	for byte in &mut out {
		let digit = (rest % 256) as u8;
		*byte = if negative { digit ^ 0xff } else { digit };
		rest /= 256;
	}
	out
}

/// Decode eight little-endian two's-complement bytes.
pub fn decode_int64(bytes: [u8; 8]) -> i64 {
	let negative = bytes[7] & 0x80 != 0;

	let mut sum = 0_i64;
	let mut scale = 1_i64;
	for (i, byte) in bytes.iter().enumerate() {
		let digit = if negative { byte ^ 0xff } else { *byte };
		sum += i64::from(digit) * scale;
		if i < 7 {
			scale *= 256;
		}
	}

	if negative { -1 - sum } else { sum }
}

#[cfg(test)]
mod tests;
