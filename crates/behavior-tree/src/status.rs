//! Status returned by behavior nodes.

/// The result of advancing a behavior node by one tick.
///
/// # Real-time Semantics
///
/// Unlike a turn-based tree, a node may span many ticks:
/// - `Running` means "call me again next tick"
/// - `Success` / `Failure` are terminal until the node is started again
///
/// Failure is ordinary control flow (a timeout winning a race, a target that
/// walked away), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The behavior has not finished yet and must be ticked again.
    Running,

    /// The behavior completed successfully.
    Success,

    /// The behavior completed unsuccessfully.
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` for either terminal status.
    #[inline]
    pub fn is_done(self) -> bool {
        !self.is_running()
    }

    /// Inverts a terminal status: Success becomes Failure and vice versa.
    ///
    /// `Running` is left untouched.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Running => Status::Running,
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}
