#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::search::{SearchParams, MAX_EXTENDED_DEPTH};

/// Engine configuration, readable and writable through the engine facade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineSettings {
    /// Extension budget for checks and captures at the horizon
    pub max_extended_depth: u16,
    /// Transposition table size; applied when the next search starts
    pub tt_megabytes: usize,
    pub null_move_reduction: u16,
    pub butterfly_depth_window: u16,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let params = SearchParams::default();
        EngineSettings {
            max_extended_depth: params.max_extended_depth,
            tt_megabytes: 64,
            null_move_reduction: params.null_move_reduction,
            butterfly_depth_window: params.butterfly_depth_window,
        }
    }
}

impl EngineSettings {
    /// Settings with a different table size
    #[must_use]
    pub fn with_tt_megabytes(mut self, megabytes: usize) -> Self {
        self.tt_megabytes = megabytes;
        self
    }

    #[must_use]
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            max_extended_depth: self.max_extended_depth.min(MAX_EXTENDED_DEPTH),
            null_move_reduction: self.null_move_reduction,
            butterfly_depth_window: self.butterfly_depth_window,
        }
        .clamped()
    }
}
