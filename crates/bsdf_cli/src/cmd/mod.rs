/// JSON and BSDF file conversion command.
pub mod convert;
/// File-level information command.
pub mod info;
/// Shared output and file-format helpers.
pub mod util;
/// Indented content summary command.
pub mod view;
/// Version report command.
pub mod version;
