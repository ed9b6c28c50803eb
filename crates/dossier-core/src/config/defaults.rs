//! Default values for Dossier configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Provider Defaults
// ============================================================================

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default max output tokens for generated reports.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Default internal reasoning budget, in tokens.
///
/// Bounded so long topics do not stall in thinking before the first
/// visible chunk arrives.
pub const DEFAULT_THINKING_BUDGET: u32 = 4096;

// ============================================================================
// UI Defaults
// ============================================================================

/// Whether the document panel starts open.
pub const DEFAULT_ARTIFACT_OPEN: bool = true;
