//! # TechStore Storefront Entry Point
//!
//! ```bash
//! # Shop interactively
//! techstore
//!
//! # Scripted session, storefront logs on stderr
//! printf 'add 1\nadd 4\nlogin me@example.com\ncart\n' | RUST_LOG=info techstore
//! ```
//!
//! All setup lives in lib.rs so the shell can be driven from tests.

fn main() {
    if let Err(e) = techstore_storefront::run() {
        tracing::error!("Storefront failed: {e}");
        std::process::exit(1);
    }
}
