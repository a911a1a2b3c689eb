//! Regionate Core
//!
//! Core engine for enforcing the `#region` grouping convention in C# source
//! files. This crate provides the fundamental components for parsing source
//! text into a lossless syntax tree, detecting declarations that are missing
//! their correctly-named region markers, and rewriting the file to fix them
//! while preserving every byte of formatting outside the edited spans.

pub mod analyzer;
pub mod config;
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod error;
pub mod fixer;
pub mod names;
pub mod normalizer;
pub mod regions;
pub mod result;
pub mod textedit;

// Re-export commonly used types
pub use analyzer::{Violation, validate};
pub use config::{
    ConfigLoader, FilesConfig, FormatConfig, IndentStyle, LineEndingConfig, RegionateConfig,
};
pub use cst::{CsLanguage, CsSyntaxKind, CsSyntaxNode, CsSyntaxToken, parse_source};
pub use error::{ErrorKind, RegionateError};
pub use fixer::{FixOptions, fix};
pub use names::NamePolicy;
pub use normalizer::{LineEnding, Normalizer};
pub use regions::{Region, collect_regions};
pub use result::{Result, ResultExt};
pub use textedit::TextEdit;

/// Initialize the tracing subscriber for logging
///
/// `directives` seeds the filter; an explicit `RUST_LOG` still wins.
pub fn init_tracing(directives: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
