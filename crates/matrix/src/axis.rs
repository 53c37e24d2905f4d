//! Axes and planes of the scoring grid

use crate::error::{Error, Result};

/// One of the three axes of a [DataMatrix](crate::DataMatrix)
///
/// Slices are taken by fixing one axis, and the remaining two make up the
/// plane that is displayed. Every plane is named by its two varying axes, and
/// the order of the letters is the display order used everywhere in the
/// crate: the first letter is the column axis, the second is the row axis.
///
/// | Fixed axis | Plane | Columns | Rows |
/// | ---------- | ----- | ------- | ---- |
/// | `x`        | `yz`  | y       | z    |
/// | `y`        | `xz`  | x       | z    |
/// | `z`        | `xy`  | x       | y    |
///
/// ```rust
/// # use scoring_matrix::Axis;
/// let axis: Axis = "xy".parse().unwrap();
/// assert_eq!(axis, Axis::Z);
/// assert_eq!(axis.plane_axes(), (Axis::X, Axis::Y));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First dimension of the grid
    X = 0,
    /// Second dimension of the grid
    Y = 1,
    /// Third dimension of the grid, and the default plane `xy`
    #[default]
    Z = 2,
}

impl Axis {
    /// All axes in index order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of the axis in a shape or coordinate array
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Single letter name i.e. 'x', 'y', 'z'
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Name of the plane left when this axis is fixed i.e. 'yz', 'xz', 'xy'
    pub fn plane_name(&self) -> &'static str {
        match self {
            Axis::X => "yz",
            Axis::Y => "xz",
            Axis::Z => "xy",
        }
    }

    /// The (column, row) axes of the plane left when this axis is fixed
    pub fn plane_axes(&self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Find the axis from either an axis name or a plane name
    ///
    /// Case-insensitive. A single letter is the fixed axis itself, while two
    /// letters name the plane and therefore the axis that is excluded.
    ///
    /// ```rust
    /// # use scoring_matrix::Axis;
    /// assert_eq!(Axis::from_name("x").unwrap(), Axis::X);
    /// assert_eq!(Axis::from_name("XZ").unwrap(), Axis::Y);
    /// assert!(Axis::from_name("zx").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|axis| name == axis.name() || name == axis.plane_name())
            .ok_or(Error::UnknownAxis(name))
    }
}

impl TryFrom<usize> for Axis {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::ALL
            .get(value)
            .copied()
            .ok_or_else(|| Error::UnknownAxis(value.to_string()))
    }
}

impl std::str::FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
