//! Internal constants for diagram rendering.

use std::time::Duration;

/// Default per-diagram render timeout (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default diagram background colour passed to `-b`.
pub const DEFAULT_BACKGROUND: &str = "transparent";

/// Interval between child process status checks.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Opening part of a diagram placeholder token.
pub const PLACEHOLDER_PREFIX: &str = "{{MERMAID_DIAGRAM_";

/// Closing part of a diagram placeholder token.
pub const PLACEHOLDER_SUFFIX: &str = "}}";

/// CSS class of the container wrapping each rendered diagram.
pub const DIAGRAM_CLASS: &str = "mermaid-diagram";
