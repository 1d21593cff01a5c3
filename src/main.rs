//! revinfo binary entry point.
//!
//! All behavior lives in the library; this shim exists so the crate is
//! usable both as a dependency and as a standalone tool.

use anyhow::Result;

fn main() -> Result<()> {
    revinfo::cli::run()
}
