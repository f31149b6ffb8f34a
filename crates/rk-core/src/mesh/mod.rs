//! Mesh file measurement (STL)

use std::io::{BufReader, Read, Seek};
use std::path::Path;

use glam::DVec3;

use crate::types::BoundingBox;

/// Supported mesh format, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Unknown,
}

impl MeshFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("stl") => MeshFormat::Stl,
            _ => MeshFormat::Unknown,
        }
    }
}

/// Bounding box of an STL file, in file units multiplied by `scale`
pub fn stl_bounding_box(path: impl AsRef<Path>, scale: DVec3) -> Result<BoundingBox, MeshError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| MeshError::Io(e.to_string()))?;
    let mut reader = BufReader::new(file);
    let bbox = read_stl_bounding_box(&mut reader, scale)?;
    tracing::debug!("Measured {:?}: diagonal {:.4}", path, bbox.diagonal());
    Ok(bbox)
}

fn read_stl_bounding_box<R: Read + Seek>(
    reader: &mut R,
    scale: DVec3,
) -> Result<BoundingBox, MeshError> {
    let mesh = stl_io::read_stl(reader).map_err(|e| MeshError::Parse(e.to_string()))?;

    // Only vertices referenced by a face count
    let points = mesh.faces.iter().flat_map(|face| face.vertices).map(|idx| {
        let v = mesh.vertices[idx];
        DVec3::new(v[0] as f64, v[1] as f64, v[2] as f64) * scale
    });
    BoundingBox::from_points(points).ok_or(MeshError::Empty)
}

/// Mesh-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Mesh has no triangles")]
    Empty,
}
