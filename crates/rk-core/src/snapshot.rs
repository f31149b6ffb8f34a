//! Assembly snapshot files (RON or JSON)

use std::path::Path;

use crate::assembly::Assembly;

/// Snapshot encoding, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Ron,
    Json,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("ron") => Some(SnapshotFormat::Ron),
            Some("json") => Some(SnapshotFormat::Json),
            _ => None,
        }
    }
}

/// Errors reading or writing snapshots
#[derive(Debug, Clone, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Unknown snapshot format: {0} (expected .ron or .json)")]
    UnknownFormat(String),
}

/// Parse a snapshot from text
pub fn parse_snapshot(content: &str, format: SnapshotFormat) -> Result<Assembly, SnapshotError> {
    match format {
        SnapshotFormat::Ron => {
            ron::from_str(content).map_err(|e| SnapshotError::Deserialize(e.to_string()))
        }
        SnapshotFormat::Json => {
            serde_json::from_str(content).map_err(|e| SnapshotError::Deserialize(e.to_string()))
        }
    }
}

/// Serialize a snapshot to text
pub fn snapshot_to_string(
    assembly: &Assembly,
    format: SnapshotFormat,
) -> Result<String, SnapshotError> {
    match format {
        SnapshotFormat::Ron => {
            ron::ser::to_string_pretty(assembly, ron::ser::PrettyConfig::default())
                .map_err(|e| SnapshotError::Serialize(e.to_string()))
        }
        SnapshotFormat::Json => serde_json::to_string_pretty(assembly)
            .map_err(|e| SnapshotError::Serialize(e.to_string())),
    }
}

/// Load a snapshot file, format chosen by extension
pub fn load_snapshot(path: &Path) -> Result<Assembly, SnapshotError> {
    let format = SnapshotFormat::from_path(path)
        .ok_or_else(|| SnapshotError::UnknownFormat(path.display().to_string()))?;
    let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io(e.to_string()))?;
    let assembly = parse_snapshot(&content, format)?;
    tracing::info!(
        "Loaded snapshot {:?}: {} links, {} joints",
        path,
        assembly.links.len(),
        assembly.joints.len()
    );
    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::{Body, Link};
    use crate::types::{BoundingBox, JointType};
    use glam::DVec3;

    fn sample() -> Assembly {
        let mut assembly = Assembly::new("bot");
        let base = assembly
            .add_link(
                Link::new("base")
                    .with_bounding_box(BoundingBox::new(DVec3::ZERO, DVec3::splat(10.0)))
                    .grounded(),
            )
            .unwrap();
        let nut = assembly
            .add_link(Link::new("nut").with_body(Body::unmeasured("nut")))
            .unwrap();
        assembly.connect("fix", JointType::Fixed, base, nut).unwrap();
        assembly
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.RON")), Some(SnapshotFormat::Ron));
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")), Some(SnapshotFormat::Json));
        assert_eq!(SnapshotFormat::from_path(Path::new("a.urdf")), None);
    }

    #[test]
    fn test_snapshot_text_survives_both_formats() {
        for format in [SnapshotFormat::Ron, SnapshotFormat::Json] {
            let text = snapshot_to_string(&sample(), format).unwrap();
            let parsed = parse_snapshot(&text, format).unwrap();
            assert_eq!(parsed.links.len(), 2);
            assert!(parsed.links[0].grounded);
            assert!(parsed.links[1].bodies[0].bounding_box.is_none());
            assert_eq!(parsed.joints[0].parent_link, Some(parsed.links[0].id));
        }
    }

    #[test]
    fn test_load_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.json");
        std::fs::write(&path, snapshot_to_string(&sample(), SnapshotFormat::Json).unwrap())
            .unwrap();

        let assembly = load_snapshot(&path).unwrap();
        assert_eq!(assembly.name, "bot");

        let bad = dir.path().join("bot.txt");
        std::fs::write(&bad, "").unwrap();
        assert!(matches!(load_snapshot(&bad), Err(SnapshotError::UnknownFormat(_))));
    }

    #[test]
    fn test_parse_hand_written_json() {
        let json = r#"{
            "name": "mini",
            "links": [
                {"id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "name": "a",
                 "bodies": [{"name": "a", "bounding_box": {"min": [0, 0, 0], "max": [1, 0, 0]}}]}
            ]
        }"#;
        let assembly = parse_snapshot(json, SnapshotFormat::Json).unwrap();
        assert!(assembly.joints.is_empty());
        assert!(!assembly.links[0].grounded);
        assert_eq!(
            assembly.links[0].bodies[0].bounding_box.unwrap().max,
            DVec3::new(1.0, 0.0, 0.0)
        );
    }
}
