//! Error types and handling for workload-acquire
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`cli`]: Argument errors
//! - [`manifest`]: Manifest loading and lookup errors
//! - [`restore`]: `dotnet` host and restore errors
//! - [`fs`]: File system errors

pub mod cli;
pub mod fs;
pub mod manifest;
pub mod restore;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for workload acquisition
#[derive(Error, Diagnostic, Debug)]
pub enum AcquireError {
    // Argument errors
    #[error("Malformed argument: {argument}")]
    #[diagnostic(
        code(workload_acquire::cli::malformed_argument),
        help("Arguments take the form -name:value, e.g. -rid:linux-x64 or -v:Key=1.0.0")
    )]
    MalformedArgument { argument: String },

    #[error("Unknown argument: {argument}")]
    #[diagnostic(code(workload_acquire::cli::unknown_argument))]
    UnknownArgument { argument: String },

    // Host errors
    #[error("Could not locate the dotnet host")]
    #[diagnostic(
        code(workload_acquire::restore::host_not_found),
        help("Put dotnet on PATH, set DOTNET_HOST_PATH, or pass -dotnet:<path>")
    )]
    HostNotFound,

    #[error("Failed to run {path}: {reason}")]
    #[diagnostic(code(workload_acquire::restore::launch_failed))]
    HostLaunchFailed { path: String, reason: String },

    #[error("Unable to restore {package} workload (exit code {code})")]
    #[diagnostic(
        code(workload_acquire::restore::manifest_failed),
        help("Check -packageName/-packageVersion and that a NuGet feed carrying the package is configured")
    )]
    ManifestRestoreFailed { package: String, code: String },

    #[error("Unable to restore {count} workload pack(s) (exit code {code})")]
    #[diagnostic(
        code(workload_acquire::restore::packs_failed),
        help("Pin pack versions with -v:<key>=<version> or check the -rid value")
    )]
    PackRestoreFailed { count: usize, code: String },

    #[error("Could not determine the SDK version: {reason}")]
    #[diagnostic(code(workload_acquire::restore::sdk_version))]
    SdkVersionUnavailable { reason: String },

    // Manifest errors
    #[error("Workload manifest not found: {path}")]
    #[diagnostic(code(workload_acquire::manifest::not_found))]
    ManifestNotFound { path: String },

    #[error("Failed to parse workload manifest: {path}: {reason}")]
    #[diagnostic(code(workload_acquire::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Restored package has no manifest directory under {path}")]
    #[diagnostic(code(workload_acquire::manifest::package_empty))]
    ManifestPackageEmpty { path: String },

    #[error("Workload '{id}' is not declared in the manifest")]
    #[diagnostic(
        code(workload_acquire::manifest::workload_not_found),
        help("Pass a -workloadId that appears under \"workloads\" in WorkloadManifest.json")
    )]
    WorkloadNotFound { id: String },

    #[error("Workload '{workload}' references pack '{pack}' which the manifest does not declare")]
    #[diagnostic(code(workload_acquire::manifest::pack_not_found))]
    PackNotFound { workload: String, pack: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(workload_acquire::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(workload_acquire::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(workload_acquire::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to move {from} to {to}: {reason}")]
    #[diagnostic(code(workload_acquire::fs::move_failed))]
    MoveFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(workload_acquire::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for AcquireError {
    fn from(err: std::io::Error) -> Self {
        AcquireError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AcquireError>;
