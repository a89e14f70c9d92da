use byteorder::{LittleEndian, ReadBytesExt};
use octobox_mesh::{Triangle, TriangleMesh, Vector3};
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

/// Reasons a model could not be loaded.
///
/// A failed load never yields partial geometry: either every triangle the
/// header promises is read, or the whole load fails.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed binary STL data")]
    Io(#[from] std::io::Error),
}

fn read_vector<T: Read>(f: &mut T) -> std::io::Result<Vector3> {
    Ok(Vector3 {
        x: f.read_f32::<LittleEndian>()?,
        y: f.read_f32::<LittleEndian>()?,
        z: f.read_f32::<LittleEndian>()?,
    })
}

fn read_binary<M: TriangleMesh, T: Read + Seek>(f: &mut T) -> Result<M, LoadError> {
    // Binary files start with an 80 byte header. There is no defined structure for this
    // header but some implementations will stash some metadata in this header. For now
    // we'll just skip the header and load the geometry.
    f.seek(std::io::SeekFrom::Start(80))?;

    // Immediately following the header is an unsigned 32-bit integer that indicates the
    // number of triagles that follow.
    let n_triangles = f.read_u32::<LittleEndian>()? as usize;

    // The count comes from untrusted input; don't let it size the allocation up front.
    let mut data = Vec::<Triangle>::with_capacity(n_triangles.min(1 << 16));
    for _ in 0..n_triangles {
        // Each triangle is specified by a normal vector followed by 3 verticies of the
        // triangle. While the normal vector may be included, it is generally expected
        // that verticies be listed in counter-clockwise order and so the normal vector
        // maybe specified as (0, 0, 0). In that case we derive it from the winding.
        let normal = read_vector(f)?;
        let mut triangle = Triangle {
            normal,
            p0: read_vector(f)?,
            p1: read_vector(f)?,
            p2: read_vector(f)?,
        };
        if normal == Vector3::new(0.0, 0.0, 0.0) {
            if let Some(n) = triangle.face_normal() {
                triangle.normal = n;
            }
        }
        data.push(triangle);
        // After the triangle geometry there is a 2-byte unsigned integer called the
        // "attribute byte count". There is no standard structure of this field, but
        // some applications use this for color data.
        let _attribute_byte_count = f.read_u16::<LittleEndian>()?;
    }
    log::debug!("read {} triangles of binary STL", data.len());
    Ok(M::from_triangles(data))
}

pub fn read_stl<M: TriangleMesh, P: AsRef<Path>>(p: P) -> Result<M, LoadError> {
    let path = p.as_ref();
    let f = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_binary(&mut std::io::BufReader::new(f))
}

pub fn parse_stl<M: TriangleMesh>(data: &[u8]) -> Result<M, LoadError> {
    let mut c = std::io::Cursor::new(data);
    read_binary(&mut c)
}

pub trait StlReader: Read {
    fn read_stl<M: TriangleMesh>(&mut self) -> Result<M, LoadError>;
}

impl<T: Read + Seek> StlReader for T {
    fn read_stl<M: TriangleMesh>(&mut self) -> Result<M, LoadError> {
        read_binary(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octobox_mesh::DefaultMesh;

    fn header(n_triangles: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&n_triangles.to_le_bytes());
        bytes
    }

    #[test]
    fn parse_empty_model() {
        let mesh = parse_stl::<DefaultMesh>(&header(0)).unwrap();
        assert_eq!(0, mesh.triangle_count());
    }

    #[test]
    fn missing_header() {
        let err = parse_stl::<DefaultMesh>(&[0u8; 40]).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn count_exceeds_data() {
        // Header promises a triangle that never arrives.
        let err = parse_stl::<DefaultMesh>(&header(1)).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
