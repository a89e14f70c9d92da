use std::io::Write;

use octobox_mesh::{DefaultMesh, Triangle, TriangleMesh, Vector3};
use octobox_stl::{LoadError, StlReader};
use octobox_test_data::{encode_binary_stl, unit_cube, STL_CUBE};

#[test]
fn parse_cube() {
    let mesh = octobox_stl::parse_stl::<DefaultMesh>(&STL_CUBE.bytes()).unwrap();
    // Expect 12 triangles (2 per face x 6 faces)
    assert_eq!(12, mesh.triangle_count());
}

#[test]
fn cube_vertices_survive() {
    let triangles = unit_cube();
    let bytes = encode_binary_stl(&triangles);
    let mesh = octobox_stl::parse_stl::<DefaultMesh>(&bytes).unwrap();

    for (expected, actual) in triangles.iter().zip(mesh.triangles()) {
        assert_eq!(expected.vertices(), actual.vertices());
    }
}

#[test]
fn zero_normal_is_derived_from_winding() {
    let t = Triangle::new(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    );
    let bytes = encode_binary_stl(&[t]);
    let mesh = octobox_stl::parse_stl::<DefaultMesh>(&bytes).unwrap();
    let loaded = mesh.triangles().next().unwrap();
    assert_eq!(Vector3::new(0.0, 0.0, 1.0), loaded.normal);
}

#[test]
fn truncated_file_is_rejected() {
    let mut bytes = encode_binary_stl(&unit_cube());
    bytes.truncate(bytes.len() - 10);
    let err = octobox_stl::parse_stl::<DefaultMesh>(&bytes).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn read_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&STL_CUBE.bytes()).unwrap();
    file.flush().unwrap();

    let mesh = octobox_stl::read_stl::<DefaultMesh, _>(file.path()).unwrap();
    assert_eq!(12, mesh.triangle_count());
}

#[test]
fn read_through_extension_trait() {
    let mut cursor = std::io::Cursor::new(STL_CUBE.bytes());
    let mesh: DefaultMesh = cursor.read_stl().unwrap();
    assert_eq!(12, mesh.triangle_count());
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.stl");
    let err = octobox_stl::read_stl::<DefaultMesh, _>(&path).unwrap_err();
    match err {
        LoadError::Open { path: p, .. } => assert_eq!(path, p),
        other => panic!("unexpected error: {other}"),
    }
}
