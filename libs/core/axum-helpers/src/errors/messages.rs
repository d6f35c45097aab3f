//! Standard error messages and codes for consistent error responses.

pub const INVALID_JSON: &str = "Request body must be valid JSON";
pub const NOT_FOUND_RESOURCE: &str = "Requested resource was not found";

// Error codes attached to log events, never rendered to clients
pub const CODE_VALIDATION: i32 = 1001;
pub const CODE_INVALID_ID: i32 = 1002;
pub const CODE_NOT_FOUND: i32 = 1004;
pub const CODE_INTERNAL: i32 = 1005;
