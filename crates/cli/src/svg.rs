use anyhow::Context;
use octobox::{Aabb, Scene};
use octobox_mesh::Vector3;
use svg::node::element::{Group, Rectangle};
use svg::Document;

use crate::args::SvgArgs;

const MARGIN: f32 = 0.05;

pub fn svg_command(args: SvgArgs) -> anyhow::Result<()> {
    let scene = crate::load_scene(&args.scene)?;
    let document = render_top_view(&scene, args.scene.offset)?;
    svg::save(&args.output, &document)
        .with_context(|| format!("failed to write {}", args.output))?;
    log::info!("wrote {}", args.output);
    Ok(())
}

/// Projects a box onto the x/y plane. SVG's y axis points down, so y is
/// flipped to keep +y up in the picture.
fn rect(b: &Aabb) -> Rectangle {
    let size = b.size();
    Rectangle::new()
        .set("x", b.min.x)
        .set("y", -b.max.y)
        .set("width", size.x)
        .set("height", size.y)
}

/// Draws the stationary octree seen from +z, each node red if it overlaps the
/// moving box displaced by `offset`, plus the displaced box itself in blue.
pub fn render_top_view(scene: &Scene, offset: Vector3) -> anyhow::Result<Document> {
    let moved = scene.moving().moved_bounds(offset);
    let extents = match (scene.stationary().bounds(), moved.as_ref()) {
        (Some(a), Some(b)) => a.union(b),
        (Some(a), None) | (None, Some(a)) => *a,
        (None, None) => anyhow::bail!("neither model has any geometry to draw"),
    };

    let size = extents.size();
    let margin = size.x.max(size.y).max(1.0) * MARGIN;
    let stroke = margin / 10.0;
    let (x, y) = (extents.min.x - margin, -extents.max.y - margin);
    let (width, height) = (size.x + 2.0 * margin, size.y + 2.0 * margin);

    let background = Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", width)
        .set("height", height)
        .set("fill", "white");

    let mut nodes = Group::new()
        .set("fill", "none")
        .set("stroke-width", stroke);
    for visit in scene.classify(offset) {
        let colour = if visit.overlaps { "red" } else { "black" };
        nodes = nodes.add(
            rect(&visit.bounds)
                .set("stroke", colour)
                .set("data-depth", visit.depth),
        );
    }

    let mut document = Document::new()
        .set("viewBox", (x, y, width, height))
        .add(background)
        .add(nodes);
    if let Some(moved) = moved {
        document = document.add(
            rect(&moved)
                .set("fill", "none")
                .set("stroke", "blue")
                .set("stroke-width", stroke)
                .set("stroke-dasharray", format!("{} {}", stroke * 4.0, stroke * 4.0)),
        );
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use octobox::{Body, OctreeConfig};
    use octobox_test_data::{encode_binary_stl, unit_cube, STL_CUBE};
    use svg::parser::Event;

    use super::*;
    use crate::args::{CollideArgs, TreeOptions};

    fn scene() -> Scene {
        let config = OctreeConfig { max_depth: 1 };
        Scene::new(
            Body::new(&STL_CUBE.triangles(), &config),
            Body::new(&unit_cube(), &config),
        )
    }

    #[test]
    fn draws_every_node() {
        let text = render_top_view(&scene(), Vector3::new(15.0, 15.0, 15.0))
            .unwrap()
            .to_string();
        // Background, root plus 8 octants, moved box.
        assert_eq!(11, text.matches("<rect").count());
        // Root and the octant containing (15, 15, 15).
        assert_eq!(2, text.matches("stroke=\"red\"").count());
        assert_eq!(1, text.matches("stroke=\"blue\"").count());
    }

    #[test]
    fn far_away_box_flags_nothing() {
        let text = render_top_view(&scene(), Vector3::new(100.0, 0.0, 0.0))
            .unwrap()
            .to_string();
        assert_eq!(0, text.matches("stroke=\"red\"").count());
        assert_eq!(9, text.matches("stroke=\"black\"").count());
    }

    #[test]
    fn nothing_to_draw() {
        let config = OctreeConfig::default();
        let empty = Scene::new(Body::new(&[], &config), Body::new(&[], &config));
        assert!(render_top_view(&empty, Vector3::new(0.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn writes_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let write_model = |name: &str, bytes: &[u8]| {
            let path = dir.path().join(name);
            std::fs::File::create(&path).unwrap().write_all(bytes).unwrap();
            path.to_str().unwrap().to_owned()
        };
        let output = dir.path().join("scene.svg");
        let args = SvgArgs {
            scene: CollideArgs {
                stationary: write_model("cube.stl", &STL_CUBE.bytes()),
                moving: write_model("unit.stl", &encode_binary_stl(&unit_cube())),
                offset: Vector3::new(15.0, 15.0, 15.0),
                tree: TreeOptions { max_depth: 1 },
            },
            output: output.to_str().unwrap().to_owned(),
        };
        svg_command(args).unwrap();

        let mut content = String::new();
        let mut rects = 0;
        for event in svg::open(&output, &mut content).unwrap() {
            match event {
                Event::Error(e) => panic!("written file does not parse: {e:?}"),
                Event::Tag(name, _, _) if name == "rect" => rects += 1,
                _ => {}
            }
        }
        assert_eq!(11, rects);
    }

    #[test]
    fn unwritable_output_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("cube.stl");
        std::fs::write(&model, STL_CUBE.bytes()).unwrap();
        let model = model.to_str().unwrap().to_owned();
        let args = SvgArgs {
            scene: CollideArgs {
                stationary: model.clone(),
                moving: model,
                offset: Vector3::new(0.0, 0.0, 0.0),
                tree: TreeOptions { max_depth: 1 },
            },
            output: dir
                .path()
                .join("missing/scene.svg")
                .to_str()
                .unwrap()
                .to_owned(),
        };
        let err = svg_command(args).unwrap_err();
        assert!(err.to_string().contains("failed to write"));
    }
}
