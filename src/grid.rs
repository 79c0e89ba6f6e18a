use crate::cell::GridCell;
use crate::coord::{Coordinate, FaceCoordinate, normalize_lon, validate_lat_lon};
use crate::error::GridError;
use crate::index::constants::{AREA_OF_EARTH, AUTHALIC_RADIUS, NUMBER_OF_PENTAGON_CELLS};
use crate::index::{GridGeometry, LatLonBounds, face_window, sample_step};
use crate::projection::IseaProjection;
use geo::Centroid;
use geo_types::{Coord, Geometry, LineString, Point};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// An ISEA aperture 3 hexagon grid at one resolution.
///
/// The grid is immutable once built and can be shared between threads.
///
/// # Example
/// ```
/// use isea3h_rs::Isea3h;
///
/// # fn main() -> Result<(), isea3h_rs::GridError> {
/// let grid = Isea3h::builder().resolution(8).build()?;
/// let cell = grid.cell_for_location(49.41, 8.69)?;
/// println!("{} at ({}, {})", cell.id(), cell.lat(), cell.lon());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Isea3h {
    resolution: u8,
    projection: IseaProjection,
    geometry: GridGeometry,
}

impl Isea3h {
    /// Creates a grid at a resolution between 1 and 30.
    pub fn new(resolution: u8) -> Result<Self, GridError> {
        let projection = IseaProjection::symmetric_equator();
        let geometry = GridGeometry::new(resolution, projection.length_of_triangle_base())?;
        debug!(
            resolution,
            spacing = geometry.spacing(),
            axes = ?geometry.axes(),
            "built ISEA3H grid"
        );
        Ok(Self {
            resolution,
            projection,
            geometry,
        })
    }

    pub fn builder() -> Isea3hBuilder {
        Isea3hBuilder::new()
    }

    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn projection(&self) -> &IseaProjection {
        &self.projection
    }

    /// Diameter of a cell on the icosahedron faces, in metres.
    pub fn diameter_of_cell_on_icosahedron(&self) -> f64 {
        self.geometry.diameter()
    }

    /// Number of hexagon cells covering the globe, `20 * H(r)` with `H(0) = 1` and
    /// `H(i) = 3 H(i - 1) + 1`.
    pub fn number_of_hexagon_cells(&self) -> u64 {
        let per_face = (1..self.resolution).fold(1u64, |h, _| 3 * h + 1);
        20 * per_face
    }

    pub fn number_of_pentagon_cells(&self) -> u64 {
        NUMBER_OF_PENTAGON_CELLS
    }

    /// Area of a hexagon cell in square metres, pentagons counting as five sixths
    /// of a hexagon.
    pub fn area_of_hexagon_cell(&self) -> f64 {
        let hexagons = self.number_of_hexagon_cells() as f64;
        let pentagons = self.number_of_pentagon_cells() as f64;
        AREA_OF_EARTH / (hexagons + 5.0 / 6.0 * pentagons)
    }

    pub fn area_of_pentagon_cell(&self) -> f64 {
        5.0 / 6.0 * self.area_of_hexagon_cell()
    }

    /// Finds the cell containing a geographic point.
    ///
    /// # Example
    /// ```
    /// use isea3h_rs::Isea3h;
    ///
    /// # fn main() -> Result<(), isea3h_rs::GridError> {
    /// let grid = Isea3h::new(5)?;
    /// let cell = grid.cell_for_location(-33.87, 151.21)?;
    /// assert_eq!(cell, grid.cell_for_location(cell.lat(), cell.lon())?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn cell_for_location(&self, lat: f64, lon: f64) -> Result<GridCell, GridError> {
        validate_lat_lon(lat, lon)?;
        let fc = self.projection.sphere_to_icosahedron(&Point::new(lon, lat))?;
        let center = self.resolve_center(&fc)?;
        Ok(GridCell::new(self.resolution, center))
    }

    /// Finds the cell containing a `(lon, lat)` coordinate.
    pub fn cell_for_coordinate(&self, coord: &impl Coordinate) -> Result<GridCell, GridError> {
        self.cell_for_location(coord.y(), coord.x())
    }

    /// Snaps a face coordinate to the center of its lattice cell on the same face.
    pub fn cell_for_face_coordinate(&self, fc: &FaceCoordinate) -> FaceCoordinate {
        self.geometry.snap(fc)
    }

    /// Finds the cell containing the centroid of a geometry.
    pub fn cell_for_centroid<G>(&self, geometry: &G) -> Result<GridCell, GridError>
    where
        G: Centroid<Output = Option<Point<f64>>>,
    {
        let centroid = geometry.centroid().ok_or(GridError::DegenerateGeometry)?;
        self.cell_for_coordinate(&centroid)
    }

    /// Finds all cells of a bounding box given by two latitudes and two
    /// longitudes in any order.
    ///
    /// Every cell whose center lies in the box is returned. Cells up to about one
    /// lattice spacing outside of the box may be returned too.
    pub fn cells_for_bound(
        &self,
        lat0: f64,
        lat1: f64,
        lon0: f64,
        lon1: f64,
    ) -> Result<HashSet<GridCell>, GridError> {
        let bounds = LatLonBounds::new(lat0, lat1, lon0, lon1)?;
        let step = sample_step(&self.geometry);
        let samples = bounds.boundary_samples(step);

        let per_face: Vec<Vec<GridCell>> = (1..=self.projection.number_of_faces())
            .into_par_iter()
            .map(|face| -> Result<Vec<GridCell>, GridError> {
                let Some(window) =
                    face_window(&self.projection, &self.geometry, &bounds, &samples, step, face)?
                else {
                    return Ok(Vec::new());
                };
                window
                    .centers(&self.geometry)
                    .map(|center| {
                        self.projection
                            .icosahedron_to_sphere(&center)
                            .map(|point| GridCell::new(self.resolution, point))
                    })
                    .collect()
            })
            .collect::<Result<_, GridError>>()?;

        let cells: HashSet<GridCell> = per_face.into_iter().flatten().collect();
        debug!(
            resolution = self.resolution,
            cells = cells.len(),
            "enumerated cells for bound"
        );
        Ok(cells)
    }

    /// Finds the cells of a geometry, deduplicated in first-seen order.
    ///
    /// Points give their own cell, polygons the cell of their centroid and lines
    /// every cell they pass through. Collections are searched member by member.
    pub fn cells_for_geometry(&self, geometry: Geometry<f64>) -> Result<Vec<GridCell>, GridError> {
        let mut seen = HashSet::new();
        let mut cells = Vec::new();
        self.collect_geometry_cells(&geometry, &mut seen, &mut cells)?;
        Ok(cells)
    }

    fn collect_geometry_cells(
        &self,
        geometry: &Geometry<f64>,
        seen: &mut HashSet<GridCell>,
        cells: &mut Vec<GridCell>,
    ) -> Result<(), GridError> {
        match geometry {
            Geometry::Point(pt) => push_unique(self.cell_for_coordinate(pt)?, seen, cells),
            Geometry::MultiPoint(mp) => {
                for pt in mp {
                    push_unique(self.cell_for_coordinate(pt)?, seen, cells);
                }
            }
            Geometry::Line(line) => {
                for cell in self.cells_along(&LineString::from(vec![line.start, line.end]))? {
                    push_unique(cell, seen, cells);
                }
            }
            Geometry::LineString(line) => {
                for cell in self.cells_along(line)? {
                    push_unique(cell, seen, cells);
                }
            }
            Geometry::MultiLineString(mls) => {
                for line in mls {
                    for cell in self.cells_along(line)? {
                        push_unique(cell, seen, cells);
                    }
                }
            }
            Geometry::Polygon(poly) => {
                if let Some(centroid) = poly.centroid() {
                    push_unique(self.cell_for_coordinate(&centroid)?, seen, cells);
                }
            }
            Geometry::MultiPolygon(mp) => {
                for poly in mp {
                    if let Some(centroid) = poly.centroid() {
                        push_unique(self.cell_for_coordinate(&centroid)?, seen, cells);
                    }
                }
            }
            Geometry::Rect(rect) => {
                push_unique(self.cell_for_coordinate(&rect.centroid())?, seen, cells);
            }
            Geometry::Triangle(triangle) => {
                push_unique(self.cell_for_coordinate(&triangle.centroid())?, seen, cells);
            }
            Geometry::GeometryCollection(gc) => {
                for g in gc {
                    self.collect_geometry_cells(g, seen, cells)?;
                }
            }
        }
        Ok(())
    }

    /// Cells along a line of `(lon, lat)` vertices, sampled at half a cell diameter.
    ///
    /// Each segment takes the shorter way round in longitude, so a segment between
    /// 179° and -179° crosses the antimeridian.
    fn cells_along(&self, line: &LineString<f64>) -> Result<Vec<GridCell>, GridError> {
        let step = (self.geometry.diameter() / 2.0 / AUTHALIC_RADIUS).to_degrees();
        let mut cells = Vec::new();

        if let [only] = line.0.as_slice() {
            cells.push(self.cell_for_location(only.y, only.x)?);
        }
        for window in line.0.windows(2) {
            let (start, end): (Coord<f64>, Coord<f64>) = (window[0], window[1]);
            let dx = match end.x - start.x {
                dx if dx > 180.0 => dx - 360.0,
                dx if dx <= -180.0 => dx + 360.0,
                dx => dx,
            };
            let dy = end.y - start.y;
            let steps = (dx.hypot(dy) / step).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                let lon = normalize_lon(start.x + t * dx);
                cells.push(self.cell_for_location(start.y + t * dy, lon)?);
            }
        }
        Ok(cells)
    }

    /// Geographic center of the cell holding a face coordinate.
    ///
    /// A snapped center that leaves the face belongs to a neighbouring face; it is
    /// projected onto that face and snapped again so that every face reports the
    /// same center for a shared cell.
    fn resolve_center(&self, fc: &FaceCoordinate) -> Result<Point<f64>, GridError> {
        let snapped = self.geometry.snap(fc);
        let approximate = self.projection.icosahedron_to_sphere(&snapped)?;
        if self.geometry.contains(&snapped) {
            return Ok(approximate);
        }

        let owner = self.projection.sphere_to_icosahedron(&approximate)?;
        if owner.face == fc.face {
            return Ok(approximate);
        }
        let resnapped = self.geometry.snap(&owner);
        self.projection.icosahedron_to_sphere(&resnapped)
    }
}

fn push_unique(cell: GridCell, seen: &mut HashSet<GridCell>, cells: &mut Vec<GridCell>) {
    if seen.insert(cell) {
        cells.push(cell);
    }
}

/// Builder for [`Isea3h`].
#[derive(Debug, Default)]
pub struct Isea3hBuilder {
    resolution: Option<u8>,
}

impl Isea3hBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(mut self, resolution: u8) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn build(self) -> Result<Isea3h, GridError> {
        let resolution = self.resolution.ok_or(GridError::MissingResolution)?;
        Isea3h::new(resolution)
    }
}
