// ============================================================================
// NAMING CONSTANTS
// ============================================================================

/// Separator between identifier segments under the snake_case convention
pub const SNAKE_CASE_SEPARATOR: char = '_';

/// Separator used when rendering a navigation path for humans
pub const PATH_DISPLAY_SEPARATOR: &str = ".";

/// Suffix appended to an aggregate operation when rendering a path
pub const OPERATION_DISPLAY_SUFFIX: &str = "()";

// ============================================================================
// TYPE GRAPH CONSTANTS
// ============================================================================

/// Maximum number of `Option`/`Box`/`Arc` layers unwrapped when classifying a member.
/// Wrapper chains are finite for real types; the bound keeps a bad `Describe` impl
/// from looping.
pub const MAX_WRAPPER_DEPTH: usize = 16;
