//! Manifest errors

use std::path::Path;

use super::AcquireError;

/// Creates a manifest not found error
pub fn not_found(path: &Path) -> AcquireError {
    AcquireError::ManifestNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a manifest parse failed error
pub fn parse_failed(path: &Path, reason: impl Into<String>) -> AcquireError {
    AcquireError::ManifestParseFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Creates a workload not found error
pub fn workload_not_found(id: impl Into<String>) -> AcquireError {
    AcquireError::WorkloadNotFound { id: id.into() }
}

/// Creates a pack not found error
pub fn pack_not_found(workload: impl Into<String>, pack: impl Into<String>) -> AcquireError {
    AcquireError::PackNotFound {
        workload: workload.into(),
        pack: pack.into(),
    }
}

/// Creates a manifest package empty error
pub fn package_empty(path: &Path) -> AcquireError {
    AcquireError::ManifestPackageEmpty {
        path: path.display().to_string(),
    }
}
