/// Exit codes for CI/automation.
pub const SUCCESS: i32 = 0;
pub const VALIDATION_FAILED: i32 = 2;
/// Unknown operation or missing scopes.
pub const CALL_REFUSED: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;
