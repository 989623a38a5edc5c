// Completed child process outcome

use serde::{Deserialize, Serialize};

use crate::constants::ABNORMAL_EXIT_CODE;

/// How a spawned process that did start ended.
///
/// A process that could not be started is not a `ProcessExit`; it is reported
/// as `SpawnError::NotStarted` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum ProcessExit {
    /// Normal exit, code propagated exactly
    Code(i32),
    /// Killed by a signal or an unhandled exception
    Abnormal,
}

impl ProcessExit {
    /// Exit code, with abnormal termination collapsed to `ABNORMAL_EXIT_CODE`
    pub fn code(self) -> i32 {
        match self {
            ProcessExit::Code(code) => code,
            ProcessExit::Abnormal => ABNORMAL_EXIT_CODE,
        }
    }

    pub fn success(self) -> bool {
        self == ProcessExit::Code(0)
    }
}
