use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use bsdf::codec::{Cursor, FormatVersion, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print file name, size, and header validity without decoding the content.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;
	let info = FileInfo::read(&path)?;

	if json {
		emit_json(&InfoJson {
			path: path.display().to_string(),
			file_name: info.file_name.clone(),
			file_size: info.file_size,
			is_valid: info.version.is_some(),
			file_version: info.version.map(|version| version.to_string()),
			readable: info.readable(),
		});
		return Ok(());
	}

	print!("{}", info.render(&path));
	Ok(())
}

/// Header-level facts about a file.
pub(crate) struct FileInfo {
	pub(crate) file_name: String,
	pub(crate) file_size: u64,
	pub(crate) version: Option<FormatVersion>,
}

impl FileInfo {
	pub(crate) fn read(path: &Path) -> Result<Self> {
		let file_size = fs::metadata(path)?.len();
		let mut head = Vec::with_capacity(FormatVersion::HEADER_SIZE);
		fs::File::open(path)?.take(FormatVersion::HEADER_SIZE as u64).read_to_end(&mut head)?;
		Ok(Self {
			file_name: path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default(),
			file_size,
			version: FormatVersion::read(&mut Cursor::new(&head)).ok(),
		})
	}

	/// Whether this implementation can decode the file.
	pub(crate) fn readable(&self) -> bool {
		self.version
			.is_some_and(|version| version.check_readable_by(FormatVersion::CURRENT).is_ok())
	}

	pub(crate) fn render(&self, path: &Path) -> String {
		let version = self.version.map_or_else(|| "?".to_owned(), |version| version.to_string());
		let shown = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
		format!(
			"BSDF info for: {}\n  file_name:     {}\n  file_size:     {}\n  is_valid:      {}\n  file_version:  {}\n  readable:      {}\n",
			shown.display(),
			self.file_name,
			self.file_size,
			self.version.is_some(),
			version,
			self.readable(),
		)
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	file_name: String,
	file_size: u64,
	is_valid: bool,
	file_version: Option<String>,
	readable: bool,
}
