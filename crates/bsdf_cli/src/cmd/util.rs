use std::path::Path;

use bsdf::codec::{BsdfError, Result};

/// On-disk format, derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
	Json,
	Bsdf,
}

/// Pick the file format from `path`'s extension, case-insensitively.
pub(crate) fn file_format(path: &Path) -> Result<FileFormat> {
	let ext = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
	match ext.as_deref() {
		Some("json") => Ok(FileFormat::Json),
		Some("bsdf") => Ok(FileFormat::Bsdf),
		_ => Err(BsdfError::Conversion {
			message: format!("unknown format extension for {}", path.display()),
		}),
	}
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to render json: {err}"),
	}
}

/// Shorten text to `max_chars`, marking the cut with an ellipsis.
pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_owned();
	}
	let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
	out.push('\u{2026}');
	out
}
