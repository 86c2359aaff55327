//! # transfo
//!
//! A library and CLI tool for concatenating text files and copying
//! files/directories. The concatenation engine strips leading banner
//! comments, joins file contents with templated separators, wraps the
//! output with a templated banner and footer, and keeps going past
//! unreadable sources with a recorded warning instead of aborting.
//!
//! ## Features
//!
//! - Join files with a separator, banner, and footer containing
//!   `{{ token }}` references (`files`, `count`, `dest`, `timestamp`)
//! - Strip leading banner comments (block, line, or both forms)
//! - Per-file content processing hooks
//! - Unreadable sources are skipped with a warning, never a failure
//! - Copy files and directory trees, optionally flattened, with templated
//!   destination names
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use transfo::{concat, ConcatOptions, StripMode, TemplateValue};
//!
//! let sources = vec![PathBuf::from("src/a.js"), PathBuf::from("src/b.js")];
//! let options = ConcatOptions {
//!     separator: TemplateValue::from("\n;\n"),
//!     banner: TemplateValue::from("/* {{ count }} files */\n"),
//!     strip_banners: Some(StripMode::default()),
//!     ..Default::default()
//! };
//!
//! match concat(&sources, Path::new("dist/bundle.js"), &options) {
//!     Ok(report) => println!("wrote {}", report.dest.display()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Concatenate files
//! transfo concat src/a.js src/b.js -o dist/bundle.js
//!
//! # Strip banners and use a custom separator
//! transfo concat src/*.js -o dist/bundle.js --strip-banners --separator '\n;\n'
//!
//! # Copy a directory, flattened
//! transfo copy assets dist/assets --flatten
//! ```

pub mod banner;
pub mod concat;
pub mod copy;
pub mod error;
pub mod fs_utils;
pub mod template;

// Re-export main types and functions for convenience
pub use banner::{StripMode, strip_banner};
pub use concat::{ConcatOptions, ConcatReport, FileMeta, Processor, Warning, concat};
pub use copy::{CopyOptions, CopyReport, copy, expand_dest};
pub use error::{Result, TransfoError};
pub use template::{RenderContext, TemplateValue, expand_tokens};
