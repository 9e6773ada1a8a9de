//! # TechStore Storefront Library
//!
//! The client side of the storefront: session state, the commands the UI
//! invokes, and a line-oriented shell that drives them.
//!
//! ## Module Organization
//! ```text
//! techstore_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront + run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart store with change listeners
//! │   ├── catalog.rs  ◄─── Product listings
//! │   ├── session.rs  ◄─── Signed-in user
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Listing and filtering
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── session.rs  ◄─── Sign in / sign out
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── shell.rs        ◄─── stdin/stdout front end
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::io;

use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;

use shell::{Shell, ShellError};
use state::{CartStore, CatalogState, ConfigState, SessionState};

/// Everything one client session owns.
///
/// Commands borrow only the pieces they need, so tests can build a
/// `Storefront` (or just the single state) and call them directly.
#[derive(Debug)]
pub struct Storefront {
    pub cart: CartStore,
    pub catalog: CatalogState,
    pub session: SessionState,
    pub config: ConfigState,
}

impl Storefront {
    /// A fresh session: empty cart, demo catalog, nobody signed in.
    pub fn new(config: ConfigState) -> Self {
        Storefront {
            cart: CartStore::new(),
            catalog: CatalogState::default(),
            session: SessionState::new(),
            config,
        }
    }
}

/// Runs the storefront shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,techstore=debug, overridable with RUST_LOG          │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults overlaid with TECHSTORE_* variables                      │
/// │                                                                         │
/// │  3. Create Session State ─────────────────────────────────────────────► │
/// │     • Empty cart, demo catalog, anonymous session                       │
/// │                                                                         │
/// │  4. Subscribe to Cart ────────────────────────────────────────────────► │
/// │     • Logs the badge count and total after every change                 │
/// │                                                                         │
/// │  5. Run Shell until quit / EOF, then unsubscribe                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), ShellError> {
    init_tracing();

    let config = ConfigState::from_env();
    let app = Storefront::new(config);

    let span = info_span!(
        "session",
        id = %app.session.id(),
        started_at = %app.session.started_at()
    );
    let _entered = span.enter();

    info!(store = %app.config.store_name, "Starting storefront");

    let badge = app.cart.subscribe(|snapshot| {
        info!(
            badge = snapshot.total_quantity(),
            lines = snapshot.item_count(),
            total = %snapshot.total(),
            "cart updated"
        );
    });

    let stdin = io::stdin();
    let result = Shell::new(&app, stdin.lock(), io::stdout().lock()).run();

    badge.unsubscribe();
    info!("Storefront closed");
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=techstore=trace` - Show trace for the storefront crates only
/// - Default: INFO, DEBUG for the storefront
///
/// Logs go to stderr so they never interleave with shell output on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,techstore=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
