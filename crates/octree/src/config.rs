/// Depth used when nothing else is configured.
///
/// Each level multiplies the worst-case node count by 8; viewers only need a
/// couple of levels to show where a model's geometry sits.
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Deepest tree the command line accepts.
///
/// Past roughly 24 levels the f32 octant boxes around a vertex collapse to
/// zero width, and every further level copies that vertex's triangles into
/// several degenerate octants, so the node count grows about 7x per level.
pub const MAX_DEPTH_LIMIT: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctreeConfig {
    /// Depth of the leaves. The root is at depth 0, so a value of 0 builds a
    /// single leaf holding every triangle.
    pub max_depth: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
