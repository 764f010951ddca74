use std::fs;
use std::path::PathBuf;

use bsdf::codec::{BsdfError, Cursor, DecodeOptions, FormatVersion, Result, Size, Tag, read_blob};

use crate::cmd::info::FileInfo;
use crate::cmd::util::truncate_text;

/// Longest text shown before truncation.
const MAX_TEXT_CHARS: usize = 40;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub depth: Option<u32>,
	#[arg(long)]
	pub info: bool,
}

/// Print an indented summary of the value tree.
pub fn run(args: Args) -> Result<()> {
	let Args { path, depth, info } = args;

	if info {
		println!("{}", FileInfo::read(&path)?.render(&path));
	}

	let bytes = fs::read(&path)?;
	print!("{}", render(&bytes, depth.unwrap_or(u32::MAX))?);
	Ok(())
}

/// Summarise a stream without building values, keeping converter names and
/// blob headers visible. Nodes deeper than `max_depth` are skipped.
pub(crate) fn render(bytes: &[u8], max_depth: u32) -> Result<String> {
	let mut cursor = Cursor::new(bytes);
	let version = FormatVersion::read(&mut cursor)?;

	let mut out = String::new();
	if version.check_readable_by(FormatVersion::CURRENT)? {
		out.push_str(&format!(
			"Warning: reading file with higher minor version ({version}) than the implementation ({}).\n",
			FormatVersion::CURRENT
		));
	}

	let mut viewer = Viewer {
		cursor,
		max_depth,
		nest_limit: DecodeOptions::default().max_depth,
		out,
	};
	viewer.required(0, false)?;
	Ok(viewer.out)
}

struct Viewer<'a> {
	cursor: Cursor<'a>,
	max_depth: u32,
	nest_limit: u32,
	out: String,
}

impl Viewer<'_> {
	fn required(&mut self, depth: u32, inline: bool) -> Result<()> {
		let at = self.cursor.tell();
		if self.item(depth, inline)? {
			Ok(())
		} else {
			Err(BsdfError::UnexpectedEndOfStream { at })
		}
	}

	/// Returns `false` at end-of-stream.
	fn item(&mut self, depth: u32, inline: bool) -> Result<bool> {
		if depth >= self.nest_limit {
			return Err(BsdfError::DepthExceeded { max_depth: self.nest_limit });
		}

		let at = self.cursor.tell();
		let tag = match self.cursor.read_tag() {
			Tag::Value(tag) => tag,
			Tag::End => return Ok(false),
		};
		let ext = if tag.is_ascii_uppercase() {
			format!(" ({})", self.cursor.read_str()?)
		} else {
			String::new()
		};

		let folded = depth >= self.max_depth;
		match tag.to_ascii_lowercase() {
			b'v' => self.line(depth, inline, "null", &ext),
			b'y' => self.line(depth, inline, "true", &ext),
			b'n' => self.line(depth, inline, "false", &ext),
			b'u' => {
				let value = self.cursor.read_u8()?;
				self.line(depth, inline, &value.to_string(), &ext);
			}
			b'h' => {
				let value = self.cursor.read_i16_le()?;
				self.line(depth, inline, &value.to_string(), &ext);
			}
			b'i' => {
				let value = self.cursor.read_int64()?;
				self.line(depth, inline, &value.to_string(), &ext);
			}
			b'f' => {
				let value = self.cursor.read_f32_le()?;
				self.line(depth, inline, &value.to_string(), &ext);
			}
			b'd' => {
				let value = self.cursor.read_f64_le()?;
				self.line(depth, inline, &value.to_string(), &ext);
			}
			b's' => {
				let text = truncate_text(self.cursor.read_str()?, MAX_TEXT_CHARS);
				self.line(depth, inline, &format!("{text:?}"), &ext);
			}
			b'l' => {
				let close = if folded { " ]" } else { "" };
				match self.cursor.read_size()? {
					Size::Streaming => {
						self.line(depth, inline, &format!("[ open list stream{close}"), &ext);
						while self.item(depth + 1, false)? {}
					}
					Size::Known(count) => {
						self.line(depth, inline, &format!("[ list with {count} elements{close}"), &ext);
						for _ in 0..count {
							self.required(depth + 1, false)?;
						}
					}
				}
				if !folded {
					self.raw(depth, "]");
				}
			}
			b'm' => {
				let close = if folded { " }" } else { "" };
				let count = self.cursor.read_len()?;
				self.line(depth, inline, &format!("{{ mapping with {count} items{close}"), &ext);
				for _ in 0..count {
					let key = self.cursor.read_str()?;
					if !folded {
						self.out.push_str(&indent(depth));
						self.out.push_str("  ");
						self.out.push_str(key);
						self.out.push_str(": ");
					}
					self.required(depth + 1, true)?;
				}
				if !folded {
					self.raw(depth, "}");
				}
			}
			b'b' => {
				let (layout, _) = read_blob(&mut self.cursor)?;
				let checksum = if layout.checksum.is_some() { "present" } else { "none" };
				let text = format!(
					"Binary blob size {}/{}/{} compr {} checksum {checksum}",
					layout.allocated_size, layout.used_size, layout.data_size, layout.compression
				);
				self.line(depth, inline, &text, &ext);
			}
			_ => return Err(BsdfError::InvalidTag { tag, at }),
		}
		Ok(true)
	}

	fn line(&mut self, depth: u32, inline: bool, text: &str, ext: &str) {
		if depth > self.max_depth {
			return;
		}
		if !inline {
			self.out.push_str(&indent(depth));
		}
		self.out.push_str(text);
		self.out.push_str(ext);
		self.out.push('\n');
	}

	fn raw(&mut self, depth: u32, text: &str) {
		self.out.push_str(&indent(depth));
		self.out.push_str(text);
		self.out.push('\n');
	}
}

fn indent(depth: u32) -> String {
	"  ".repeat(depth as usize)
}
