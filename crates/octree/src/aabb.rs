use octobox_mesh::{Triangle, Vector3, VectorExt};

/// Number of sub-boxes produced by splitting a box at its center.
pub const OCTANTS: usize = 8;

/// Axis-aligned bounding box.
///
/// Boxes produced by [`compute_bounds`] and [`split_octants`] always satisfy
/// `min <= max` on every axis. A box is a plain value; translating it never
/// touches the geometry it was computed from.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Builds the tightest box containing every vertex of `triangles`.
    ///
    /// Returns `None` if there are no triangles.
    pub fn from_triangles(triangles: &[Triangle]) -> Option<Self> {
        let mut vertices = triangles.iter().flat_map(|t| t.vertices());
        let first = vertices.next()?;
        Some(vertices.fold(Self::new(first, first), |b, p| Self {
            min: b.min.min_elements(p),
            max: b.max.max_elements(p),
        }))
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Returns `true` if `p` lies inside the box or on its boundary.
    pub fn contains_point(&self, p: &Vector3) -> bool {
        (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    /// Returns `true` if the closed intervals of both boxes overlap on every
    /// axis. Touching faces count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| self.min[axis] <= other.max[axis] && self.max[axis] >= other.min[axis])
    }

    /// The smallest box containing both boxes.
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min_elements(other.min),
            max: self.max.max_elements(other.max),
        }
    }

    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Splits the box into its 8 octants. See [`split_octants`].
    pub fn octants(&self) -> [Aabb; OCTANTS] {
        let center = self.center();
        let mut octants = [*self; OCTANTS];
        for (i, octant) in octants.iter_mut().enumerate() {
            for axis in 0..3 {
                if i & (1 << axis) == 0 {
                    octant.max[axis] = center[axis];
                } else {
                    octant.min[axis] = center[axis];
                }
            }
        }
        octants
    }

    /// The 8 corners of the box.
    ///
    /// Corner `i` uses the same bit layout as the octants: bit 0 picks max x,
    /// bit 1 max y and bit 2 max z.
    pub fn corners(&self) -> [Vector3; 8] {
        let mut corners = [self.min; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            for axis in 0..3 {
                if i & (1 << axis) != 0 {
                    corner[axis] = self.max[axis];
                }
            }
        }
        corners
    }

    /// The 12 edges of the box as line segments, for wireframe drawing.
    pub fn edges(&self) -> [(Vector3, Vector3); 12] {
        let corners = self.corners();
        let mut edges = [(self.min, self.min); 12];
        let mut n = 0;
        // Edges join corners whose indices differ in exactly one bit.
        for i in 0..8 {
            for axis in 0..3 {
                let bit = 1 << axis;
                if i & bit == 0 {
                    edges[n] = (corners[i], corners[i | bit]);
                    n += 1;
                }
            }
        }
        edges
    }
}

impl std::default::Default for Aabb {
    /// A degenerate box at the origin. Not a valid enclosing box for anything.
    fn default() -> Self {
        let origin = Vector3::new(0.0, 0.0, 0.0);
        Self::new(origin, origin)
    }
}

/// Computes the tightest box enclosing every vertex of `triangles`.
///
/// An empty input has no enclosing box; the degenerate [`Aabb::default`] is
/// returned instead and must not be used for overlap tests. Callers that need
/// to tell the two apart should use [`Aabb::from_triangles`].
pub fn compute_bounds(triangles: &[Triangle]) -> Aabb {
    Aabb::from_triangles(triangles).unwrap_or_default()
}

/// Splits `bounds` at its center into 8 octants.
///
/// Bit 0 of the octant index selects the upper half of the x axis, bit 1 the
/// upper half of y and bit 2 the upper half of z. Neighbouring octants share
/// their boundary faces at the center.
pub fn split_octants(bounds: &Aabb) -> [Aabb; OCTANTS] {
    bounds.octants()
}
