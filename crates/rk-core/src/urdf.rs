//! URDF adapter
//!
//! Builds an [`Assembly`] from a URDF robot so the small part filter can run
//! on it, and prunes filtered links back out of the robot.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use glam::DVec3;
use uuid::Uuid;

use crate::assembly::{Assembly, Body, Joint, Link};
use crate::mesh::{MeshFormat, stl_bounding_box};
use crate::types::{BoundingBox, JointType, LengthUnit};

/// URDF lengths are in meters
const URDF_UNIT: LengthUnit = LengthUnit::Meters;

/// Options for converting a URDF robot
#[derive(Debug, Clone)]
pub struct UrdfOptions {
    /// Base directory for resolving relative mesh paths
    pub base_dir: PathBuf,
    /// Measure collision geometry instead of visual geometry
    pub use_collision: bool,
}

impl Default for UrdfOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            use_collision: false,
        }
    }
}

impl UrdfOptions {
    /// Options resolving meshes next to the given URDF file
    pub fn for_file(urdf_path: &Path) -> Self {
        Self {
            base_dir: urdf_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            ..Self::default()
        }
    }
}

/// Errors that can occur reading or writing URDF
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrdfError {
    #[error("Failed to parse URDF: {0}")]
    Parse(String),

    #[error("Failed to write URDF: {0}")]
    Write(String),

    #[error("Mesh file not found: {path}")]
    MeshNotFound { path: String },

    #[error("Failed to load mesh '{path}': {reason}")]
    MeshLoad { path: String, reason: String },

    #[error("Unsupported mesh format: {0} (only STL is supported)")]
    UnsupportedMeshFormat(String),

    #[error("package:// URIs are not supported: {0}")]
    PackageUriNotSupported(String),
}

/// Read a URDF file
pub fn read_urdf(path: &Path) -> Result<urdf_rs::Robot, UrdfError> {
    urdf_rs::read_file(path).map_err(|e| UrdfError::Parse(e.to_string()))
}

/// Serialize a robot back to URDF XML
pub fn write_urdf(robot: &urdf_rs::Robot) -> Result<String, UrdfError> {
    urdf_rs::write_to_string(robot).map_err(|e| UrdfError::Write(e.to_string()))
}

/// Convert a URDF robot into an assembly snapshot
///
/// Each geometry becomes one body. A geometry that cannot be measured (a
/// mesh that is missing or not STL) becomes a body without a bounding box.
/// The root link, the first link that is never a joint child, is grounded.
pub fn assembly_from_urdf(robot: &urdf_rs::Robot, options: &UrdfOptions) -> Assembly {
    let mut assembly = Assembly::new(robot.name.clone());
    let mut ids: HashMap<&str, Uuid> = HashMap::new();

    let children: HashSet<&str> = robot.joints.iter().map(|j| j.child.link.as_str()).collect();
    let root = robot
        .links
        .iter()
        .find(|l| !children.contains(l.name.as_str()))
        .map(|l| l.name.as_str());

    for urdf_link in &robot.links {
        let mut link = Link::new(urdf_link.name.clone());
        link.bodies = link_bodies(urdf_link, options);
        link.grounded = Some(urdf_link.name.as_str()) == root;

        match assembly.add_link(link) {
            Ok(id) => {
                ids.insert(urdf_link.name.as_str(), id);
            }
            Err(e) => tracing::warn!("Skipping link: {}", e),
        }
    }

    for urdf_joint in &robot.joints {
        let parent = ids.get(urdf_joint.parent.link.as_str()).copied();
        let child = ids.get(urdf_joint.child.link.as_str()).copied();
        if parent.is_none() {
            tracing::warn!(
                "Joint '{}' references unknown parent link '{}'",
                urdf_joint.name,
                urdf_joint.parent.link
            );
        }

        assembly.add_joint(Joint {
            id: Uuid::new_v4(),
            name: urdf_joint.name.clone(),
            joint_type: JointType::from(&urdf_joint.joint_type),
            parent_link: parent,
            child_link: child,
        });
    }

    tracing::info!(
        "Loaded URDF robot '{}': {} links, {} joints",
        assembly.name,
        assembly.links.len(),
        assembly.joints.len()
    );
    assembly
}

/// Copy of the robot without the links not in `keep`
///
/// Joints touching a dropped link are dropped with it. Only the first link
/// of a given name is kept, matching [`assembly_from_urdf`].
pub fn prune_robot(robot: &urdf_rs::Robot, keep: &HashSet<&str>) -> urdf_rs::Robot {
    let mut pruned = robot.clone();
    let mut seen = HashSet::new();
    pruned.links.retain(|l| {
        if !keep.contains(l.name.as_str()) {
            return false;
        }
        if !seen.insert(l.name.clone()) {
            tracing::warn!("Dropping duplicate link '{}'", l.name);
            return false;
        }
        true
    });
    pruned.joints.retain(|j| {
        keep.contains(j.parent.link.as_str()) && keep.contains(j.child.link.as_str())
    });
    pruned
}

fn link_bodies(link: &urdf_rs::Link, options: &UrdfOptions) -> Vec<Body> {
    let geometries: Vec<(Option<&String>, &urdf_rs::Pose, &urdf_rs::Geometry)> =
        if options.use_collision {
            link.collision
                .iter()
                .map(|c| (c.name.as_ref(), &c.origin, &c.geometry))
                .collect()
        } else {
            link.visual
                .iter()
                .map(|v| (v.name.as_ref(), &v.origin, &v.geometry))
                .collect()
        };

    geometries
        .into_iter()
        .enumerate()
        .map(|(i, (name, origin, geometry))| {
            let name = name
                .cloned()
                .unwrap_or_else(|| format!("{}_geometry{}", link.name, i));
            match geometry_bounding_box(geometry, origin, &options.base_dir) {
                Ok(bbox) => Body::new(name, bbox.scaled(URDF_UNIT.to_cm(1.0))),
                Err(e) => {
                    tracing::warn!("Cannot measure '{}' of link '{}': {}", name, link.name, e);
                    Body::unmeasured(name)
                }
            }
        })
        .collect()
}

/// Bounding box of a geometry in meters
///
/// The box is axis-aligned in the geometry frame, offset by the origin
/// translation. Origin rotation is not applied since only the box size
/// feeds the filter.
fn geometry_bounding_box(
    geometry: &urdf_rs::Geometry,
    origin: &urdf_rs::Pose,
    base_dir: &Path,
) -> Result<BoundingBox, UrdfError> {
    let center = DVec3::from_array(origin.xyz.0);
    let bbox = match geometry {
        urdf_rs::Geometry::Box { size } => {
            BoundingBox::from_center_size(center, DVec3::from_array(size.0))
        }
        urdf_rs::Geometry::Cylinder { radius, length } => {
            BoundingBox::from_center_size(center, DVec3::new(2.0 * radius, 2.0 * radius, *length))
        }
        urdf_rs::Geometry::Capsule { radius, length } => BoundingBox::from_center_size(
            center,
            DVec3::new(2.0 * radius, 2.0 * radius, length + 2.0 * radius),
        ),
        urdf_rs::Geometry::Sphere { radius } => {
            BoundingBox::from_center_size(center, DVec3::splat(2.0 * radius))
        }
        urdf_rs::Geometry::Mesh { filename, scale } => {
            let path = resolve_mesh_path(filename, base_dir)?;
            let scale = scale.as_ref().map_or(DVec3::ONE, |s| DVec3::from_array(s.0));
            let mesh_box = stl_bounding_box(&path, scale).map_err(|e| match e {
                crate::mesh::MeshError::Io(_) => UrdfError::MeshNotFound {
                    path: path.display().to_string(),
                },
                other => UrdfError::MeshLoad {
                    path: path.display().to_string(),
                    reason: other.to_string(),
                },
            })?;
            BoundingBox::new(mesh_box.min + center, mesh_box.max + center)
        }
    };
    Ok(bbox)
}

/// Resolve a mesh filename from URDF to a local STL path
fn resolve_mesh_path(filename: &str, base_dir: &Path) -> Result<PathBuf, UrdfError> {
    if filename.starts_with("package://") {
        return Err(UrdfError::PackageUriNotSupported(filename.to_string()));
    }

    let path = Path::new(filename.strip_prefix("file://").unwrap_or(filename));
    if MeshFormat::from_path(path) != MeshFormat::Stl {
        return Err(UrdfError::UnsupportedMeshFormat(filename.to_string()));
    }

    Ok(if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    })
}
