#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "bsdf", about = "Command line interface for the Binary Structured Data Format")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print meta information about a BSDF file.
	Info(cmd::info::Args),
	/// Print a summary of the content of a BSDF file.
	View(cmd::view::Args),
	/// Convert between JSON and BSDF, by file extension.
	Convert(cmd::convert::Args),
	/// Print the implementation and format versions.
	Version,
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> bsdf::codec::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::View(args) => cmd::view::run(args),
		Commands::Convert(args) => cmd::convert::run(args),
		Commands::Version => {
			cmd::version::run();
			Ok(())
		}
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_env("BSDF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}
