//! Restore and `dotnet` host errors

use std::path::Path;

use super::AcquireError;

/// Renders an exit code for display; `None` means the process was killed by a signal
fn code_string(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Creates a host launch failed error
pub fn launch_failed(path: &Path, err: &std::io::Error) -> AcquireError {
    AcquireError::HostLaunchFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a manifest restore failed error
pub fn manifest_failed(package: impl Into<String>, code: Option<i32>) -> AcquireError {
    AcquireError::ManifestRestoreFailed {
        package: package.into(),
        code: code_string(code),
    }
}

/// Creates a pack restore failed error
pub fn packs_failed(count: usize, code: Option<i32>) -> AcquireError {
    AcquireError::PackRestoreFailed {
        count,
        code: code_string(code),
    }
}

/// Creates an SDK version unavailable error
pub fn sdk_version(reason: impl Into<String>) -> AcquireError {
    AcquireError::SdkVersionUnavailable {
        reason: reason.into(),
    }
}
