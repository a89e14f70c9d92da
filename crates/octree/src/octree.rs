use octobox_mesh::Triangle;

use crate::aabb::{compute_bounds, Aabb, OCTANTS};
use crate::collision::tree_overlaps;
use crate::config::OctreeConfig;

/// A single node of an [`Octree`].
///
/// Interior nodes own up to 8 children, one per octant of their box, and no
/// triangles. Leaves (nodes at the maximum depth) own every triangle that was
/// routed to them. A triangle that straddles a split plane is routed to every
/// octant that contains one of its vertices, so the same triangle can appear
/// in several leaves.
#[derive(Debug)]
pub struct OctreeNode {
    bounds: Aabb,
    triangles: Vec<Triangle>,
    children: [Option<Box<OctreeNode>>; OCTANTS],
}

impl OctreeNode {
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns the child for octant `index`, if that octant received any
    /// triangles.
    pub fn child(&self, index: usize) -> Option<&OctreeNode> {
        self.children.get(index)?.as_deref()
    }

    /// Iterates over the children that exist, in octant order.
    pub fn children(&self) -> impl Iterator<Item = &OctreeNode> {
        self.children.iter().filter_map(|c| c.as_deref())
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

fn vertex_in(t: &Triangle, bounds: &Aabb) -> bool {
    t.vertices().iter().any(|p| bounds.contains_point(p))
}

/// Recursively builds the subtree for `bounds` at `depth`.
///
/// Returns `None` when there is nothing to index or `depth` is past
/// `max_depth`. A node at `max_depth` is a leaf holding all of `triangles`.
pub fn build_node(
    bounds: Aabb,
    triangles: &[Triangle],
    depth: u32,
    max_depth: u32,
) -> Option<Box<OctreeNode>> {
    if triangles.is_empty() || depth > max_depth {
        return None;
    }
    if depth == max_depth {
        return Some(Box::new(OctreeNode {
            bounds,
            triangles: triangles.to_vec(),
            children: Default::default(),
        }));
    }

    let mut children: [Option<Box<OctreeNode>>; OCTANTS] = Default::default();
    for (child, octant) in children.iter_mut().zip(bounds.octants()) {
        let routed: Vec<Triangle> = triangles
            .iter()
            .filter(|t| vertex_in(t, &octant))
            .copied()
            .collect();
        *child = build_node(octant, &routed, depth + 1, max_depth);
    }
    Some(Box::new(OctreeNode {
        bounds,
        triangles: Vec::new(),
        children,
    }))
}

/// Counters describing the shape of a built tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OctreeStats {
    pub nodes: usize,
    pub leaves: usize,
    /// Sum of the triangle list lengths of all nodes. Larger than the model's
    /// triangle count whenever triangles straddle split planes.
    pub triangle_refs: usize,
    /// Deepest level that holds a node, if any.
    pub depth: Option<u32>,
}

/// A node as seen by a renderer: where it is, and whether it overlaps the box
/// it was classified against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeVisit {
    pub depth: u32,
    pub bounds: Aabb,
    pub triangles: usize,
    pub overlaps: bool,
}

/// Bounding volume hierarchy over a model's triangles.
///
/// The tree is built once, in the model's own coordinate frame, and never
/// changes afterwards. Moving the model does not move the node boxes; callers
/// translate the box they compare against instead. Dropping the tree releases
/// every node exactly once, children before their parent's storage.
#[derive(Debug)]
pub struct Octree {
    root: Option<Box<OctreeNode>>,
    max_depth: u32,
}

impl Octree {
    /// Builds a tree over `triangles`, rooted at their tight bounds.
    pub fn build(triangles: &[Triangle], config: &OctreeConfig) -> Self {
        Self::with_bounds(compute_bounds(triangles), triangles, config.max_depth)
    }

    /// Builds a tree over `triangles` rooted at an explicit box.
    pub fn with_bounds(bounds: Aabb, triangles: &[Triangle], max_depth: u32) -> Self {
        let tree = Self {
            root: build_node(bounds, triangles, 0, max_depth),
            max_depth,
        };
        if log::log_enabled!(log::Level::Debug) {
            let stats = tree.stats();
            log::debug!(
                "built octree over {} triangles: {} nodes, {} leaves, {} triangle refs (max depth {})",
                triangles.len(),
                stats.nodes,
                stats.leaves,
                stats.triangle_refs,
                max_depth
            );
        }
        tree
    }

    /// A tree with no nodes, for models without geometry.
    pub fn empty(max_depth: u32) -> Self {
        Self {
            root: None,
            max_depth,
        }
    }

    pub fn root(&self) -> Option<&OctreeNode> {
        self.root.as_deref()
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Walks every node depth-first, children in octant order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self.root().map(|root| (0, root)).into_iter().collect(),
        }
    }

    /// Returns `true` if `reference` overlaps the box of any node.
    pub fn overlaps(&self, reference: &Aabb) -> bool {
        tree_overlaps(self.root(), reference)
    }

    /// Flags each node that, on its own, overlaps `reference`.
    ///
    /// Flags are independent: a node may be flagged while its parent or its
    /// children are not.
    pub fn classify(&self, reference: &Aabb) -> Vec<NodeVisit> {
        self.nodes()
            .map(|(depth, node)| NodeVisit {
                depth,
                bounds: node.bounds,
                triangles: node.triangles.len(),
                overlaps: node.bounds.overlaps(reference),
            })
            .collect()
    }

    pub fn stats(&self) -> OctreeStats {
        self.nodes().fold(OctreeStats::default(), |mut stats, (depth, node)| {
            stats.nodes += 1;
            if node.is_leaf() {
                stats.leaves += 1;
            }
            stats.triangle_refs += node.triangles.len();
            stats.depth = stats.depth.max(Some(depth));
            stats
        })
    }
}

/// Depth-first iterator over the nodes of an [`Octree`], with their depth.
pub struct Nodes<'a> {
    stack: Vec<(u32, &'a OctreeNode)>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (u32, &'a OctreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Reversed so that octant 0 is popped first.
        self.stack.extend(
            node.children
                .iter()
                .rev()
                .filter_map(|c| c.as_deref())
                .map(|c| (depth + 1, c)),
        );
        Some((depth, node))
    }
}
