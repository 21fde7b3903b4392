//! The `version` command - shows version information.

use clap::Args;

#[derive(Args)]
pub struct VersionArgs {}

pub fn run(_args: VersionArgs) {
    println!(
        "crucible {} (runtime spec {})",
        env!("CARGO_PKG_VERSION"),
        crucible_core::OCI_VERSION
    );
}
