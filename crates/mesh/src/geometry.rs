use cgmath::InnerSpace;

pub type Vector3 = cgmath::Vector3<f32>;

// We rely on Vector3 being repr(c).
static_assertions::assert_eq_size!(Vector3, [f32; 3]);
static_assertions::assert_eq_align!(Vector3, f32);

/// Componentwise helpers that cgmath does not provide for `Vector3`.
pub trait VectorExt: Sized {
    /// Returns a vector holding the smaller of each pair of components.
    fn min_elements(self, other: Self) -> Self;

    /// Returns a vector holding the larger of each pair of components.
    fn max_elements(self, other: Self) -> Self;

    /// Normalizes the vector, or returns `None` if it has no usable direction.
    ///
    /// `InnerSpace::normalize` divides by the magnitude unconditionally, which
    /// yields NaN components for the zero vector.
    fn try_normalize(self) -> Option<Self>;
}

impl VectorExt for Vector3 {
    fn min_elements(self, other: Self) -> Self {
        Vector3 {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    fn max_elements(self, other: Self) -> Self {
        Vector3 {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    fn try_normalize(self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude > 0.0 && magnitude.is_finite() {
            Some(self / magnitude)
        } else {
            None
        }
    }
}

/// A single facet of a surface mesh.
///
/// Vertices are expected in counter-clockwise order when viewed from the
/// front of the facet. `normal` is whatever the source file stored, which is
/// frequently the zero vector.
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Triangle {
    pub normal: Vector3,
    pub p0: Vector3,
    pub p1: Vector3,
    pub p2: Vector3,
}

static_assertions::assert_eq_size!(Triangle, [f32; 12]);

impl Triangle {
    /// Creates a triangle from its vertices, with a zero normal.
    pub fn new(p0: Vector3, p1: Vector3, p2: Vector3) -> Self {
        Self {
            normal: Vector3::new(0.0, 0.0, 0.0),
            p0,
            p1,
            p2,
        }
    }

    pub fn vertices(&self) -> [Vector3; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Computes the unit normal implied by the vertex winding.
    ///
    /// Returns `None` for degenerate (zero area) triangles.
    pub fn face_normal(&self) -> Option<Vector3> {
        // u,v are two edge vectors of the triangle. Their cross product points
        // out of the front face.
        let u = self.p1 - self.p0;
        let v = self.p2 - self.p0;
        u.cross(v).try_normalize()
    }
}

impl std::default::Default for Triangle {
    fn default() -> Self {
        let origin = Vector3::new(0.0, 0.0, 0.0);
        Self::new(origin, origin, origin)
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn min_max_elements() {
        let a = Vector3::new(1.0, -2.0, 3.0);
        let b = Vector3::new(-1.0, 2.0, 3.5);
        assert_eq!(Vector3::new(-1.0, -2.0, 3.0), a.min_elements(b));
        assert_eq!(Vector3::new(1.0, 2.0, 3.5), a.max_elements(b));
    }

    #[test]
    fn normalize_zero_vector() {
        assert_eq!(None, Vector3::new(0.0, 0.0, 0.0).try_normalize());
    }

    #[test]
    fn normalize_vector() {
        let n = Vector3::new(0.0, 3.0, 4.0).try_normalize().unwrap();
        assert_float_eq!(n.x, 0.0, abs <= 0.0001);
        assert_float_eq!(n.y, 0.6, abs <= 0.0001);
        assert_float_eq!(n.z, 0.8, abs <= 0.0001);
    }

    #[test]
    fn face_normal_follows_winding() {
        // Counter-clockwise in the xy plane, seen from +z.
        let t = Triangle::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        let n = t.face_normal().unwrap();
        assert_float_eq!(n.z, 1.0, abs <= 0.0001);

        // Swapping two vertices flips the facet.
        let flipped = Triangle::new(t.p0, t.p2, t.p1);
        assert_float_eq!(flipped.face_normal().unwrap().z, -1.0, abs <= 0.0001);
    }

    #[test]
    fn face_normal_degenerate() {
        let p = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(None, Triangle::new(p, p, p).face_normal());
    }
}
