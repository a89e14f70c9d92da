use octobox_mesh::{Triangle, TriangleMesh, Vector3};

use crate::aabb::Aabb;
use crate::config::OctreeConfig;
use crate::octree::{NodeVisit, Octree, OctreeNode};

/// Returns `true` if `a` and `b` overlap on all three axes (closed intervals).
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Tests two boxes for overlap after displacing each by its own offset.
pub fn overlaps_displaced(a: &Aabb, a_offset: Vector3, b: &Aabb, b_offset: Vector3) -> bool {
    overlaps(&a.translated(a_offset), &b.translated(b_offset))
}

/// Returns `true` if `reference` overlaps the box of `node` or of any of its
/// descendants. A missing node overlaps nothing.
///
/// Node boxes are used as stored; nothing here translates the tree.
pub fn tree_overlaps(node: Option<&OctreeNode>, reference: &Aabb) -> bool {
    let Some(node) = node else {
        return false;
    };
    overlaps(node.bounds(), reference)
        || node
            .children()
            .any(|child| tree_overlaps(Some(child), reference))
}

/// A loaded model's collision data: its bounds and octree, both in the
/// model's own coordinate frame.
#[derive(Debug)]
pub struct Body {
    bounds: Option<Aabb>,
    tree: Octree,
}

impl Body {
    pub fn new(triangles: &[Triangle], config: &OctreeConfig) -> Self {
        let bounds = Aabb::from_triangles(triangles);
        let tree = match bounds {
            Some(bounds) => Octree::with_bounds(bounds, triangles, config.max_depth),
            None => Octree::empty(config.max_depth),
        };
        Self { bounds, tree }
    }

    pub fn from_mesh<M: TriangleMesh>(mesh: &M, config: &OctreeConfig) -> Self {
        match mesh.as_triangle_slice() {
            Some(triangles) => Self::new(triangles, config),
            None => Self::new(&mesh.triangles().collect::<Vec<_>>(), config),
        }
    }

    /// The tight bounds of the model, or `None` if it has no geometry.
    pub fn bounds(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }

    pub fn tree(&self) -> &Octree {
        &self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// The model's bounds displaced by `offset`.
    pub fn moved_bounds(&self, offset: Vector3) -> Option<Aabb> {
        self.bounds.map(|b| b.translated(offset))
    }
}

/// Outcome of one collision evaluation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CollisionReport {
    /// Bounds of the moving body after displacement.
    pub moved_bounds: Option<Aabb>,
    /// Whether the displaced box overlaps the stationary body's box.
    pub boxes_overlap: bool,
    /// Whether the displaced box overlaps any node of the stationary body's
    /// octree.
    pub tree_overlaps: bool,
}

impl CollisionReport {
    pub fn is_colliding(&self) -> bool {
        self.boxes_overlap || self.tree_overlaps
    }
}

/// A stationary body and a body that is moved by an offset before every test.
///
/// The stationary tree stays in its own frame. Only the moving body's box is
/// displaced, so the tree is never rebuilt when the moving body moves.
#[derive(Debug)]
pub struct Scene {
    stationary: Body,
    moving: Body,
}

impl Scene {
    pub fn new(stationary: Body, moving: Body) -> Self {
        let scene = Self { stationary, moving };
        if !scene.is_testable() {
            log::warn!("a model has no geometry; collision tests will always report no contact");
        }
        scene
    }

    /// Whether both bodies have geometry to test against each other.
    pub fn is_testable(&self) -> bool {
        !self.stationary.is_empty() && !self.moving.is_empty()
    }

    pub fn stationary(&self) -> &Body {
        &self.stationary
    }

    pub fn moving(&self) -> &Body {
        &self.moving
    }

    /// Evaluates the scene with the moving body displaced by `offset`.
    ///
    /// If either body is empty there is nothing to collide with and the report
    /// is all negative.
    pub fn evaluate(&self, offset: Vector3) -> CollisionReport {
        let moved = self.moving.moved_bounds(offset);
        let (Some(stationary), Some(moved_box)) = (self.stationary.bounds(), moved) else {
            return CollisionReport {
                moved_bounds: moved,
                ..Default::default()
            };
        };
        CollisionReport {
            moved_bounds: moved,
            boxes_overlap: overlaps(stationary, &moved_box),
            tree_overlaps: self.stationary.tree().overlaps(&moved_box),
        }
    }

    /// Per-node overlap flags of the stationary tree against the displaced
    /// moving box. Empty if either body is empty.
    pub fn classify(&self, offset: Vector3) -> Vec<NodeVisit> {
        match self.moving.moved_bounds(offset) {
            Some(moved) => self.stationary.tree().classify(&moved),
            None => Vec::new(),
        }
    }
}
