//! Error classification shared by the crate's error types.
//!
//! Each fallible surface keeps its own `thiserror` enum next to the operation
//! it validates (`ConfigError`, `PresetError`, `WorldError`). Nothing inside
//! [`World::tick`](crate::World::tick) returns an error; only setup and
//! controller swaps can fail.

/// How a caller should treat a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The target went away or changed state; skipping the operation is fine.
    ///
    /// Examples: entity died before its controller could be swapped
    Recoverable,

    /// Invalid input; retrying without changes fails again.
    ///
    /// Examples: negative health preset, zero aggression cap
    Validation,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Uniform classification over the crate's error enums.
pub trait GameError: std::error::Error {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the error variant, suitable for log fields.
    fn error_code(&self) -> &'static str;
}
