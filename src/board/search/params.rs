use super::constants::MAX_EXTENDED_DEPTH;

/// Tunable search parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Extra plies granted to checks and captures found at the last ply
    pub max_extended_depth: u16,
    /// Depth reduction of the null-move search
    pub null_move_reduction: u16,
    /// History bonuses are only recorded at remaining depths up to this
    pub butterfly_depth_window: u16,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            max_extended_depth: 6,
            null_move_reduction: 2,
            butterfly_depth_window: 3,
        }
    }
}

impl SearchParams {
    /// Copy with every field pulled into its supported range
    #[must_use]
    pub fn clamped(self) -> Self {
        SearchParams {
            max_extended_depth: self.max_extended_depth.min(MAX_EXTENDED_DEPTH),
            null_move_reduction: self.null_move_reduction.max(1),
            butterfly_depth_window: self.butterfly_depth_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_caps_extension() {
        let params = SearchParams {
            max_extended_depth: 40,
            null_move_reduction: 0,
            ..SearchParams::default()
        }
        .clamped();
        assert_eq!(params.max_extended_depth, MAX_EXTENDED_DEPTH);
        assert_eq!(params.null_move_reduction, 1);
    }
}
