//! Stable exit codes for the bisect CLI.

/// Boundary identified and reported.
pub const OK: i32 = 0;
/// Invalid arguments or config, sync failure, or test-command failure.
pub const INVALID: i32 = 1;
/// A probed revision's output matched neither reference output.
pub const INCONSISTENT: i32 = 2;
