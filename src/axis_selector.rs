use crate::enums::{Axis, Direction};

/// The (primary, secondary) position of the displayed plane
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub primary: usize,
    pub secondary: usize,
}

impl Selection {
    pub fn get(&self, axis: Axis) -> usize {
        match axis {
            Axis::Primary => self.primary,
            Axis::Secondary => self.secondary,
        }
    }

    fn get_mut(&mut self, axis: Axis) -> &mut usize {
        match axis {
            Axis::Primary => &mut self.primary,
            Axis::Secondary => &mut self.secondary,
        }
    }
}

/// Two bounded counters, each kept within `[0, max]`.
///
/// Mutations return whether the value actually moved so callers can skip
/// redundant renders when a boundary absorbed the change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AxisSelector {
    value: Selection,
    max: Selection,
}

impl AxisSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset both counters to 0 for a volume with the given extents.
    ///
    /// Extents are at least 1 for any loaded volume; 0 is treated as 1.
    pub fn set_bounds(&mut self, primary_extent: usize, secondary_extent: usize) {
        self.value = Selection::default();
        self.max = Selection {
            primary: primary_extent.saturating_sub(1),
            secondary: secondary_extent.saturating_sub(1),
        };
    }

    pub fn value(&self) -> Selection {
        self.value
    }

    pub fn max(&self) -> Selection {
        self.max
    }

    pub fn step(&mut self, axis: Axis, direction: Direction) -> bool {
        let current = self.value.get(axis);
        let target = current.saturating_add_signed(direction.delta());
        self.set(axis, target)
    }

    /// Set a counter directly, clamping out-of-range values
    pub fn set(&mut self, axis: Axis, value: usize) -> bool {
        let clamped = value.min(self.max.get(axis));
        let slot = self.value.get_mut(axis);
        if *slot == clamped {
            return false;
        }
        *slot = clamped;
        true
    }
}
