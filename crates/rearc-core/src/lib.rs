//! Archive staging and transcoding library.
//!
//! `rearc-core` imports an existing archive (ZIP, the TAR family, 7z, RAR)
//! into a mutable staging directory, lets the caller inspect and modify the
//! contents as a flat path-addressed tree, and exports the result to any
//! supported format, optionally password-protected. Compression and
//! cryptography come from external codec providers; this crate sequences
//! them and manages the materialized-file lifecycle around them.
//!
//! Operations are synchronous and blocking, and a [`Session`] is not
//! thread-safe: it exclusively owns its staging directory and is meant to
//! be driven by one caller at a time.
//!
//! # Examples
//!
//! ```no_run
//! use rearc_core::Session;
//! use std::path::Path;
//!
//! # fn main() -> rearc_core::Result<()> {
//! let mut session = Session::new()?;
//! session.import(Path::new("bundle.tar.gz"), None)?;
//! session.remove("debug.log")?;
//! session.set_export_password("s3cret")?;
//! session.export(Path::new("bundle.zip"), None)?;
//! session.close()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod capability;
pub mod codec;
pub mod error;
pub mod format;
pub mod policy;
pub mod report;
pub mod session;
pub mod staging;
pub mod tree;

// Re-export main API types
pub use capability::Capabilities;
pub use error::ArchiveError;
pub use error::Result;
pub use format::Format;
pub use policy::EncryptionPolicy;
pub use report::LogLevel;
pub use report::LogSink;
pub use report::NoopLog;
pub use report::NoopProgress;
pub use report::ProgressSink;
pub use report::Reporter;
pub use session::Session;
pub use staging::StagingArea;
