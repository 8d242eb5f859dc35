//! Optional codec provider capability table.
//!
//! 7z, RAR and AES-capable ZIP support are cargo features on this crate.
//! Their presence is a configuration fact fixed at build time; operations
//! consult this table at their start instead of failing mid-flight.

/// Which optional codec providers were compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// 7z decode/encode (`sevenz` feature).
    pub sevenz: bool,
    /// RAR decode (`rar` feature).
    pub rar: bool,
    /// AES-256 ZIP encryption (`zip-aes` feature).
    pub zip_aes: bool,
}

impl Capabilities {
    /// Reads the compiled feature set.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            sevenz: cfg!(feature = "sevenz"),
            rar: cfg!(feature = "rar"),
            zip_aes: cfg!(feature = "zip-aes"),
        }
    }
}
