//! Version information display
//!
//! Prints the package name and version in text or JSON format.

use crate::cli::args::VersionArgs;
use crate::render::ResponseFormat;

/// Print version information.
pub fn run(args: &VersionArgs) {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        ResponseFormat::Text => {
            println!("{name} {version}");
        }
        ResponseFormat::Json => {
            println!(r#"{{"name":"{name}","version":"{version}"}}"#);
        }
    }
}
