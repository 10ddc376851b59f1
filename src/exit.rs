// src/exit.rs
//! Standardized process exit codes for `chartsmith`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ChartsmithExit {
    /// Every chart was fully computed.
    Success = 0,
    /// Generic error (e.g. IO, unreadable catalog or settings).
    Error = 1,
    /// Input validation failed (document is not JSON, bad parameters).
    InvalidInput = 2,
    /// At least one chart was degraded or failed validation.
    Degraded = 3,
}

impl ChartsmithExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for ChartsmithExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
