//! Stable exit codes for cfselect CLI commands.

/// Command succeeded and something was rendered.
pub const OK: i32 = 0;
/// Invalid input, config, or document, or a projector/template failure.
pub const INVALID: i32 = 1;
/// `cfselect render` decided to render nothing.
pub const SUPPRESSED: i32 = 2;
