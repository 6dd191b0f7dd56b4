//! Argument errors

use super::AcquireError;

/// Creates a malformed argument error
pub fn malformed(argument: impl Into<String>) -> AcquireError {
    AcquireError::MalformedArgument {
        argument: argument.into(),
    }
}

/// Creates an unknown argument error
pub fn unknown(argument: impl Into<String>) -> AcquireError {
    AcquireError::UnknownArgument {
        argument: argument.into(),
    }
}
