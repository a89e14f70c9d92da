use std::io::Write;

use anyhow::Context;
use clap::Parser;
use octobox::{Body, OctreeConfig, Scene};
use octobox_mesh::{DefaultMesh, TriangleMesh};

mod args;
mod inspect;
mod svg;

/// Loads a model, treating any failure as fatal for that model.
pub fn load_mesh(path: &str) -> anyhow::Result<DefaultMesh> {
    let mesh = octobox_stl::read_stl::<DefaultMesh, _>(path)
        .with_context(|| format!("failed to load model {path}"))?;
    log::info!("loaded {} triangles from {}", mesh.triangle_count(), path);
    Ok(mesh)
}

/// Loads both models of a collision scene and builds their trees.
pub fn load_scene(args: &args::CollideArgs) -> anyhow::Result<Scene> {
    let config = OctreeConfig {
        max_depth: args.tree.max_depth,
    };
    let stationary = Body::from_mesh(&load_mesh(&args.stationary)?, &config);
    let moving = Body::from_mesh(&load_mesh(&args.moving)?, &config);
    Ok(Scene::new(stationary, moving))
}

fn run<W: Write>(args: args::Args, out: &mut W) -> anyhow::Result<()> {
    match args.command {
        args::Commands::Bounds(a) => inspect::bounds_command(a, out),
        args::Commands::Tree(a) => inspect::tree_command(a, out),
        args::Commands::Collide(a) => inspect::collide_command(a, out),
        args::Commands::Svg(a) => svg::svg_command(a),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = args::Args::parse();
    let stdout = std::io::stdout();
    run(args, &mut stdout.lock())
}
