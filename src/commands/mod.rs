//! Command implementations for workload-acquire

pub mod acquire;
