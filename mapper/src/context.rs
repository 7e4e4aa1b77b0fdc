//! Per-call mapping context.

/// Which side's fields drive the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Every destination field must resolve on the source.
    DestinationDriven,
    /// Every source field must resolve on the destination.
    SourceDriven,
}

/// Immutable context threaded through every recursive call of one mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapContext {
    pub direction: Direction,
    /// When false, unresolved destination fields are left untouched instead of
    /// failing. Only meaningful for destination-driven traversal.
    pub strict: bool,
}

impl MapContext {
    pub fn destination_driven() -> Self {
        Self {
            direction: Direction::DestinationDriven,
            strict: true,
        }
    }

    /// Source-driven traversal is always strict.
    pub fn source_driven() -> Self {
        Self {
            direction: Direction::SourceDriven,
            strict: true,
        }
    }

    pub fn loose() -> Self {
        Self {
            direction: Direction::DestinationDriven,
            strict: false,
        }
    }

    /// Whether an unresolved destination field may be left untouched.
    pub fn tolerates_missing(&self) -> bool {
        self.direction == Direction::DestinationDriven && !self.strict
    }
}
