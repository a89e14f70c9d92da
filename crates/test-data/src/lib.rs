//! Deterministic models for tests.
//!
//! Models are generated rather than checked in so that tests can place
//! boxes wherever a scenario needs them.

use byteorder::{LittleEndian, WriteBytesExt};
use octobox_mesh::{Triangle, Vector3};

pub struct TestModel {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub model_height: f32,
}

impl TestModel {
    pub fn triangles(&self) -> Vec<Triangle> {
        box_mesh(self.min.into(), self.max.into())
    }

    /// The model encoded as a binary STL file.
    pub fn bytes(&self) -> Vec<u8> {
        encode_binary_stl(&self.triangles())
    }
}

/// A cube from 0-20 on x,y,z.
pub const STL_CUBE: TestModel = TestModel {
    min: [0.0, 0.0, 0.0],
    max: [20.0, 20.0, 20.0],
    model_height: 20.0,
};

/// A flat slab sitting directly below the origin.
pub const STL_SLAB: TestModel = TestModel {
    min: [0.0, 0.0, -1.0],
    max: [1.0, 1.0, 0.0],
    model_height: 1.0,
};

/// The 12 facets of an axis aligned box, wound counter-clockwise when seen
/// from outside.
pub fn box_mesh(min: Vector3, max: Vector3) -> Vec<Triangle> {
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);
    let v = Vector3::new;
    let quads = [
        // -z
        [v(x0, y0, z0), v(x0, y1, z0), v(x1, y1, z0), v(x1, y0, z0)],
        // +z
        [v(x0, y0, z1), v(x1, y0, z1), v(x1, y1, z1), v(x0, y1, z1)],
        // -y
        [v(x0, y0, z0), v(x1, y0, z0), v(x1, y0, z1), v(x0, y0, z1)],
        // +y
        [v(x0, y1, z0), v(x0, y1, z1), v(x1, y1, z1), v(x1, y1, z0)],
        // -x
        [v(x0, y0, z0), v(x0, y0, z1), v(x0, y1, z1), v(x0, y1, z0)],
        // +x
        [v(x1, y0, z0), v(x1, y1, z0), v(x1, y1, z1), v(x1, y0, z1)],
    ];
    quads
        .iter()
        .flat_map(|[a, b, c, d]| [facet(*a, *b, *c), facet(*a, *c, *d)])
        .collect()
}

pub fn unit_cube() -> Vec<Triangle> {
    box_mesh(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0))
}

fn facet(p0: Vector3, p1: Vector3, p2: Vector3) -> Triangle {
    let mut t = Triangle::new(p0, p1, p2);
    if let Some(n) = t.face_normal() {
        t.normal = n;
    }
    t
}

/// Encodes triangles as a binary STL file with an empty header.
pub fn encode_binary_stl(triangles: &[Triangle]) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    // Writing into a Vec cannot fail.
    out.write_u32::<LittleEndian>(triangles.len() as u32).unwrap();
    for t in triangles {
        for p in [t.normal, t.p0, t.p1, t.p2] {
            for c in [p.x, p.y, p.z] {
                out.write_f32::<LittleEndian>(c).unwrap();
            }
        }
        out.write_u16::<LittleEndian>(0).unwrap();
    }
    out
}
