use crate::coord::FaceCoordinate;
use crate::error::GridError;
use crate::index::constants::MAX_RESOLUTION;

/// Orientation of the hexagonal lattice relative to the face axes.
///
/// Each aperture 3 step turns the lattice by 90 degrees, so lattice formulas are
/// written once against canonical axes and every face coordinate is swapped on the
/// way in and out at odd (zero-based) resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    Straight,
    Swapped,
}

impl AxisOrder {
    /// Axis order for a zero-based resolution.
    pub fn for_resolution(r: u32) -> Self {
        if r % 2 == 0 {
            AxisOrder::Straight
        } else {
            AxisOrder::Swapped
        }
    }

    /// Face axes to canonical lattice axes.
    pub fn to_canonical(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            AxisOrder::Straight => (x, y),
            AxisOrder::Swapped => (y, x),
        }
    }

    /// Canonical lattice axes back to face axes.
    pub fn from_canonical(self, x: f64, y: f64) -> (f64, f64) {
        // a swap is its own inverse
        self.to_canonical(x, y)
    }
}

/// Integer address of a lattice center on a face.
///
/// Columns step by half a lattice spacing; odd columns are offset by half a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticeIndex {
    pub column: i64,
    pub row: i64,
}

impl LatticeIndex {
    pub fn new(column: i64, row: i64) -> Self {
        Self { column, row }
    }

    fn is_odd_column(&self) -> bool {
        self.column.rem_euclid(2) == 1
    }
}

/// `+1` for faces whose tip points to +y on the face plane (faces 1-5 and 11-15),
/// `-1` for the others.
pub fn face_orientation(face: u8) -> f64 {
    if face <= 5 || (11..=15).contains(&face) {
        1.0
    } else {
        -1.0
    }
}

/// Lattice and triangle constants for one resolution, computed once per grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    resolution: u8,
    l0: f64,
    l: f64,
    l2: f64,
    l3: f64,
    l6: f64,
    l23: f64,
    // l / sqrt(3), distance between rows of the lattice
    row_spacing: f64,
    half_row_spacing: f64,
    // half base, center to tip, center to base, height
    triangle_a: f64,
    triangle_b: f64,
    triangle_c: f64,
    triangle_bc: f64,
    tolerance: f64,
    axes: AxisOrder,
}

impl GridGeometry {
    /// Derives the constants for a resolution (1-30) from the triangle base length `l0`.
    pub fn new(resolution: u8, l0: f64) -> Result<Self, GridError> {
        if resolution == 0 || resolution > MAX_RESOLUTION {
            return Err(GridError::InvalidResolution(resolution));
        }
        let r = u32::from(resolution) - 1;
        let sqrt3 = 3.0_f64.sqrt();
        let l = (1.0 / sqrt3).powi(r as i32) * l0;
        if !l.is_finite() || l <= 0.0 {
            return Err(GridError::InvalidResolution(resolution));
        }
        let row_spacing = l / sqrt3;

        Ok(Self {
            resolution,
            l0,
            l,
            l2: l / 2.0,
            l3: l / 3.0,
            l6: l / 6.0,
            l23: l * 2.0 / 3.0,
            row_spacing,
            half_row_spacing: row_spacing / 2.0,
            triangle_a: l0 / 2.0,
            triangle_b: l0 / sqrt3,
            triangle_c: l0 / (2.0 * sqrt3),
            triangle_bc: sqrt3 / 2.0 * l0,
            tolerance: l0 * 1e-9,
            axes: AxisOrder::for_resolution(r),
        })
    }

    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    /// Edge length of a face triangle.
    pub fn triangle_base(&self) -> f64 {
        self.l0
    }

    /// Lattice spacing `l` at this resolution.
    pub fn spacing(&self) -> f64 {
        self.l
    }

    /// Distance between lattice rows, `l / sqrt(3)`.
    pub fn row_spacing(&self) -> f64 {
        self.row_spacing
    }

    /// Cell diameter on the icosahedron, `2l / 3`.
    pub fn diameter(&self) -> f64 {
        self.l23
    }

    pub fn axes(&self) -> AxisOrder {
        self.axes
    }

    /// Half extents `(x, y)` of a face triangle's bounding box, valid for both
    /// orientations.
    pub fn face_extent(&self) -> (f64, f64) {
        (self.triangle_a, self.triangle_b)
    }

    /// Center of the lattice cell containing a face point.
    ///
    /// Rounds to the nearest center of the primary (even column) sublattice and of
    /// the offset sublattice. Within `l/6` of a primary column the primary center
    /// wins outright, beyond `l/3` the offset one does, and in between the closer
    /// center is chosen, ties going to the primary center.
    pub fn snap(&self, fc: &FaceCoordinate) -> FaceCoordinate {
        let (x, y) = self.axes.to_canonical(fc.x, fc.y);
        let x_center = (x / self.l).round() * self.l;
        let y_center = (y / self.row_spacing).round() * self.row_spacing;
        let dx = (x - x_center).abs();

        let candidate1 = self.face_coordinate(fc.face, x_center, y_center);
        if dx <= self.l6 {
            return candidate1;
        }
        let x_offset = if x > x_center {
            x_center + self.l2
        } else {
            x_center - self.l2
        };
        let y_offset = if y > y_center {
            y_center + self.half_row_spacing
        } else {
            y_center - self.half_row_spacing
        };
        let candidate2 = self.face_coordinate(fc.face, x_offset, y_offset);
        if dx > self.l3 {
            return candidate2;
        }

        if fc.distance_to(&candidate1) <= fc.distance_to(&candidate2) {
            candidate1
        } else {
            candidate2
        }
    }

    /// Lattice index of a face point, rounding to the nearest column and row.
    pub fn index_of(&self, fc: &FaceCoordinate) -> LatticeIndex {
        let (x, y) = self.axes.to_canonical(fc.x, fc.y);
        let column = (x / self.l2).round() as i64;
        let offset = if column.rem_euclid(2) == 1 { 0.5 } else { 0.0 };
        let row = (y / self.row_spacing - offset).round() as i64;
        LatticeIndex::new(column, row)
    }

    /// Face coordinate of the lattice center with the given index.
    pub fn center_of(&self, face: u8, index: LatticeIndex) -> FaceCoordinate {
        let offset = if index.is_odd_column() { 0.5 } else { 0.0 };
        let x = index.column as f64 * self.l2;
        let y = (index.row as f64 + offset) * self.row_spacing;
        self.face_coordinate(face, x, y)
    }

    /// Whether a face point lies in the face's triangle, boundary included.
    ///
    /// The triangle does not depend on the resolution, so the test runs on face
    /// axes. Points within a tiny tolerance of an edge count as inside, which lets
    /// every face sharing an edge or vertex claim the cells centered on it.
    pub fn contains(&self, fc: &FaceCoordinate) -> bool {
        let d = face_orientation(fc.face);
        let y = d * fc.y;
        let slope = self.triangle_bc / self.triangle_a;

        // left of the triangle, right of the triangle, below the base
        if fc.x * slope + self.triangle_b + self.tolerance < y {
            return false;
        }
        if -fc.x * slope + self.triangle_b + self.tolerance < y {
            return false;
        }
        if y < -self.triangle_c - self.tolerance {
            return false;
        }
        true
    }

    fn face_coordinate(&self, face: u8, x: f64, y: f64) -> FaceCoordinate {
        let (x, y) = self.axes.from_canonical(x, y);
        FaceCoordinate::new(face, x, y)
    }
}
