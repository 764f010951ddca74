use bsdf::codec::FormatVersion;

/// Print crate and format versions.
pub fn run() {
	println!("bsdf {} (format {})", env!("CARGO_PKG_VERSION"), FormatVersion::CURRENT);
}
