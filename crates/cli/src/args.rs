use clap::{Parser, Subcommand};
use octobox::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use octobox_mesh::Vector3;

/// Parses an `x,y,z` triple such as `0,0,-0.5`.
pub fn parse_offset(s: &str) -> Result<Vector3, String> {
    let components = s
        .split(',')
        .map(|c| c.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid offset component: {e}"))?;
    match components.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!(
            "expected 3 comma separated components, got {}",
            components.len()
        )),
    }
}

#[derive(clap::Args, Debug)]
pub struct TreeOptions {
    /// Depth of the octree leaves; 0 builds a single leaf.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = clap::value_parser!(u32).range(0..=MAX_DEPTH_LIMIT as i64)
    )]
    pub max_depth: u32,
}

#[derive(clap::Args, Debug)]
pub struct BoundsArgs {
    pub stl_path: String,
}

#[derive(clap::Args, Debug)]
pub struct TreeArgs {
    pub stl_path: String,

    #[command(flatten)]
    pub tree: TreeOptions,
}

#[derive(clap::Args, Debug)]
pub struct CollideArgs {
    /// Model that stays where it was loaded.
    pub stationary: String,

    /// Model that is displaced by `--offset`.
    pub moving: String,

    /// Translation applied to the moving model, as x,y,z.
    #[arg(
        long,
        value_parser = parse_offset,
        allow_hyphen_values = true,
        default_value = "0,0,0"
    )]
    pub offset: Vector3,

    #[command(flatten)]
    pub tree: TreeOptions,
}

#[derive(clap::Args, Debug)]
pub struct SvgArgs {
    #[command(flatten)]
    pub scene: CollideArgs,

    /// Output path for the svg file.
    #[arg(short, long)]
    pub output: String,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the bounding box of a model.
    Bounds(BoundsArgs),
    /// Print the octree built over a model.
    Tree(TreeArgs),
    /// Test a displaced model against a stationary one.
    Collide(CollideArgs),
    /// Draw the stationary model's octree and the displaced box from above.
    Svg(SvgArgs),
}
