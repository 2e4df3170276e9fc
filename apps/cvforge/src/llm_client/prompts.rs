// Shared prompt constants for text rewriting.
// The per-field phrasing lives in `improve`; this file holds the cross-cutting fragments.

/// System prompt for every rewrite call.
pub const REWRITER_SYSTEM: &str = "You are a professional resume writer and career coach.";

/// Appended to every rewrite prompt so the reply can be stored as-is.
pub const VERBATIM_OUTPUT_INSTRUCTION: &str = "\
    Do not add any introductory phrases like \"Here's the rewritten text:\". \
    Return only the rewritten text.";

/// What a strong rewrite emphasises.
pub const STYLE_INSTRUCTION: &str =
    "Focus on action verbs, quantifiable achievements, and concise language.";
