//! Placement strategy selector.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Policy used to choose a free block for an allocation request.
///
/// All three policies only consider free blocks at least as large as the
/// request; they differ in which of those candidates wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitStrategy {
    /// First candidate in address order.
    #[default]
    FirstFit,
    /// Smallest candidate; ties go to the lowest address.
    BestFit,
    /// Largest candidate; ties go to the lowest address.
    WorstFit,
}

impl FitStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [FitStrategy; 3] = [Self::FirstFit, Self::BestFit, Self::WorstFit];

    /// The command-line name of this strategy (`first_fit`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstFit => "first_fit",
            Self::BestFit => "best_fit",
            Self::WorstFit => "worst_fit",
        }
    }
}

impl fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a strategy name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseStrategyError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown allocator type '{}' (expected first_fit, best_fit or worst_fit)",
            self.input
        )
    }
}

impl Error for ParseStrategyError {}

impl FromStr for FitStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ParseStrategyError {
                input: s.to_string(),
            })
    }
}
