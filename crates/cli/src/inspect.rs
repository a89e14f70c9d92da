use std::io::Write;

use octobox::{compute_bounds, Aabb, Octree, OctreeConfig};
use octobox_mesh::{TriangleMesh, Vector3};

use crate::args::{BoundsArgs, CollideArgs, TreeArgs};

pub fn fmt_vector(v: &Vector3) -> String {
    format!("({}, {}, {})", v.x, v.y, v.z)
}

fn fmt_box(b: &Aabb) -> String {
    format!("{} - {}", fmt_vector(&b.min), fmt_vector(&b.max))
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

pub fn bounds_command<W: Write>(args: BoundsArgs, out: &mut W) -> anyhow::Result<()> {
    let mesh = crate::load_mesh(&args.stl_path)?;
    let Some(triangles) = mesh.as_triangle_slice().filter(|t| !t.is_empty()) else {
        writeln!(out, "{}: no geometry", args.stl_path)?;
        return Ok(());
    };
    let bounds = compute_bounds(triangles);
    writeln!(out, "triangles: {}", triangles.len())?;
    writeln!(out, "min:       {}", fmt_vector(&bounds.min))?;
    writeln!(out, "max:       {}", fmt_vector(&bounds.max))?;
    writeln!(out, "center:    {}", fmt_vector(&bounds.center()))?;
    writeln!(out, "size:      {}", fmt_vector(&bounds.size()))?;
    Ok(())
}

pub fn tree_command<W: Write>(args: TreeArgs, out: &mut W) -> anyhow::Result<()> {
    let mesh = crate::load_mesh(&args.stl_path)?;
    let triangles: Vec<_> = mesh.triangles().collect();
    let config = OctreeConfig {
        max_depth: args.tree.max_depth,
    };
    let tree = Octree::build(&triangles, &config);

    let stats = tree.stats();
    writeln!(
        out,
        "nodes: {}, leaves: {}, triangle refs: {}, max depth: {}",
        stats.nodes,
        stats.leaves,
        stats.triangle_refs,
        tree.max_depth()
    )?;
    for (depth, node) in tree.nodes() {
        writeln!(
            out,
            "{:indent$}{} [{} triangles]",
            "",
            fmt_box(node.bounds()),
            node.triangles().len(),
            indent = 2 * depth as usize
        )?;
    }
    Ok(())
}

pub fn collide_command<W: Write>(args: CollideArgs, out: &mut W) -> anyhow::Result<()> {
    let scene = crate::load_scene(&args)?;
    let report = scene.evaluate(args.offset);

    match scene.stationary().bounds() {
        Some(b) => writeln!(out, "stationary:    {}", fmt_box(b))?,
        None => writeln!(out, "stationary:    no geometry")?,
    }
    match report.moved_bounds {
        Some(b) => writeln!(out, "moving:        {}", fmt_box(&b))?,
        None => writeln!(out, "moving:        no geometry")?,
    }
    writeln!(out, "offset:        {}", fmt_vector(&args.offset))?;
    writeln!(out, "boxes overlap: {}", yes_no(report.boxes_overlap))?;
    writeln!(out, "tree overlaps: {}", yes_no(report.tree_overlaps))?;
    writeln!(out, "collision:     {}", yes_no(report.is_colliding()))?;
    Ok(())
}
