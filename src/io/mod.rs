//! File import and export.

/// Schedule table export.
pub mod export;
/// Appliance list import.
pub mod import;
