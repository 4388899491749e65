use crate::volume::VolumeError;

/// One of the two navigable axes of a volume.
///
/// With the default [`AxisRoles`] the primary axis
/// is the third volume axis ("image") and the secondary axis is the fourth
/// ("slice").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    #[default]
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Which two of the four volume axes are navigated.
///
/// The remaining two axes, in ascending order, span the displayed plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisRoles {
    primary: usize,
    secondary: usize,
}

impl Default for AxisRoles {
    fn default() -> Self {
        Self {
            primary: 2,
            secondary: 3,
        }
    }
}

impl AxisRoles {
    pub fn new(primary: usize, secondary: usize) -> Result<Self, VolumeError> {
        if primary >= 4 || secondary >= 4 || primary == secondary {
            return Err(VolumeError::InvalidAxisRoles { primary, secondary });
        }
        Ok(Self { primary, secondary })
    }

    pub fn primary(&self) -> usize {
        self.primary
    }

    pub fn secondary(&self) -> usize {
        self.secondary
    }

    /// The axes spanning the plane as (rows, columns)
    pub fn plane_axes(&self) -> (usize, usize) {
        let mut rest = (0..4).filter(|&axis| axis != self.primary && axis != self.secondary);
        // exactly two axes remain after removing two distinct ones out of four
        let rows = rest.next().unwrap_or(0);
        let columns = rest.next().unwrap_or(1);
        (rows, columns)
    }
}
