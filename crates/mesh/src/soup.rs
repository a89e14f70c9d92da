use crate::{Triangle, TriangleMesh};

/// An unconnected list of triangles, stored exactly as loaded.
///
/// STL files carry no shared-vertex information, so this is the cheapest
/// representation to build from them. Nothing here is de-duplicated.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TriangleSoup {
    triangles: Vec<Triangle>,
}

impl TriangleSoup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn into_inner(self) -> Vec<Triangle> {
        self.triangles
    }
}

impl TriangleMesh for TriangleSoup {
    fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn as_triangle_slice(&self) -> Option<&[Triangle]> {
        Some(&self.triangles)
    }

    fn triangles(&self) -> Box<dyn Iterator<Item = Triangle> + '_> {
        Box::new(self.triangles.iter().copied())
    }
}

impl From<Vec<Triangle>> for TriangleSoup {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }
}

impl FromIterator<Triangle> for TriangleSoup {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}
