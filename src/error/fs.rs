//! File system errors

use std::path::Path;

use super::AcquireError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> AcquireError {
    AcquireError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read failed error
pub fn read_failed(path: &Path, err: &std::io::Error) -> AcquireError {
    AcquireError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, err: &std::io::Error) -> AcquireError {
    AcquireError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a directory move failed error
pub fn move_failed(from: &Path, to: &Path, reason: impl Into<String>) -> AcquireError {
    AcquireError::MoveFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: reason.into(),
    }
}
