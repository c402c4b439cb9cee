//! Search constants.

// ============================================================================
// SCORES
// ============================================================================

/// Base score for checkmate; the remaining depth is added so that nearer
/// mates score higher
pub const MATE_VALUE: i32 = 1_000_000;

/// Outer bound of the root window, beyond any mate score
pub const SCORE_INFINITE: i32 = 10_000_000;

/// Score of stalemate and fifty-move draws
pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// DEPTH LIMITS
// ============================================================================

/// Requested depths are clamped to this
pub const MAX_SEARCH_DEPTH: u16 = 128;

/// Upper bound on the check/capture extension budget
pub const MAX_EXTENDED_DEPTH: u16 = 16;

/// Deepest ply a search can reach: every requested ply plus every extension
pub(crate) const MAX_PLY: usize = (MAX_SEARCH_DEPTH + MAX_EXTENDED_DEPTH) as usize + 1;

// ============================================================================
// MOVE ORDERING
// ============================================================================

/// Rating bonus for captures and queen promotions
pub(crate) const CAPTURE_BONUS: i32 = 100;

/// History bonus for a move that caused a beta cutoff
pub(crate) const BUTTERFLY_BETA_CUTOFF: i32 = 128;

/// History bonus for a move that raised alpha
pub(crate) const BUTTERFLY_ALPHA_BEST: i32 = 64;
