//! # capture-qa CLI
//!
//! Command-line interface for the capture quality gate.
//!
//! ## Usage
//! ```bash
//! capture-qa check ~/Captures --output json
//! capture-qa check receipt.jpg --verbose
//! ```

mod cli;

use capture_quality::Result;

fn main() -> Result<()> {
    cli::run()
}
