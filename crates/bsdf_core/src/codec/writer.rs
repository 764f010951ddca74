use crate::codec::size::{encode_int64, encode_size, encode_size_wide};

const INITIAL_CAPACITY: usize = 64;

/// Append-only output buffer used by the encoder.
///
/// Capacity at least doubles whenever a push would overflow it, and the
/// buffer never shrinks while encoding. The produced output is exactly the
/// bytes pushed so far.
#[derive(Debug, Default)]
pub struct ByteWriter {
	buf: Vec<u8>,
}

impl ByteWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::with_capacity(INITIAL_CAPACITY)
	}

	/// Create an empty writer with room for `capacity` bytes.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buf: Vec::with_capacity(capacity),
		}
	}

	/// Current write offset.
	pub fn tell(&self) -> usize {
		self.buf.len()
	}

	/// Bytes written so far.
	pub fn as_bytes(&self) -> &[u8] {
		&self.buf
	}

	/// Consume the writer and return the written bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.buf
	}

	/// Drop everything written after `offset`, keeping capacity.
	pub fn truncate(&mut self, offset: usize) {
		self.buf.truncate(offset);
	}

	fn reserve(&mut self, n: usize) {
		let free = self.buf.capacity() - self.buf.len();
		if n > free {
			self.buf.reserve(n.max(self.buf.capacity()));
		}
	}

	/// Push an ASCII tag character.
	pub fn push_char(&mut self, c: u8) {
		self.push_uint8(c);
	}

	/// Push one byte.
	pub fn push_uint8(&mut self, value: u8) {
		self.reserve(1);
		self.buf.push(value);
	}

	/// Push raw bytes.
	pub fn push_bytes(&mut self, raw: &[u8]) {
		self.reserve(raw.len());
		self.buf.extend_from_slice(raw);
	}

	/// Push `n` zero bytes.
	pub fn push_zeros(&mut self, n: usize) {
		self.reserve(n);
		self.buf.resize(self.buf.len() + n, 0);
	}

	/// Push a size prefix in its shortest form.
	pub fn push_size(&mut self, n: u64) {
		self.push_bytes(encode_size(n).as_bytes());
	}

	/// Push a size prefix in the nine-byte form.
	pub fn push_size_wide(&mut self, n: u64) {
		self.push_bytes(&encode_size_wide(n));
	}

	/// Push length-prefixed UTF-8 text.
	pub fn push_str(&mut self, text: &str) {
		self.push_size(text.len() as u64);
		self.push_bytes(text.as_bytes());
	}

	/// Push an eight-byte two's-complement integer.
	pub fn push_int64(&mut self, value: i64) {
		self.push_bytes(&encode_int64(value));
	}

	/// Push a little-endian `f32`.
	pub fn push_float32(&mut self, value: f32) {
		self.push_bytes(&value.to_le_bytes());
	}

	/// Push a little-endian `f64`.
	pub fn push_float64(&mut self, value: f64) {
		self.push_bytes(&value.to_le_bytes());
	}
}

#[cfg(test)]
mod tests;
