//! Joints connecting two links

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::JointType;

/// A joint connecting two links
///
/// Endpoints are optional: a host that fails to resolve the parent or child
/// occurrence of a joint still reports the joint, with the endpoint missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joint {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub joint_type: JointType,
    /// Parent link ID
    pub parent_link: Option<Uuid>,
    /// Child link ID
    pub child_link: Option<Uuid>,
}

impl Joint {
    /// Create a new joint between two resolved links
    pub fn new(name: impl Into<String>, joint_type: JointType, parent: Uuid, child: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            joint_type,
            parent_link: Some(parent),
            child_link: Some(child),
        }
    }

    /// Create a new fixed joint
    pub fn fixed(name: impl Into<String>, parent: Uuid, child: Uuid) -> Self {
        Self::new(name, JointType::Fixed, parent, child)
    }

    /// Create a joint whose parent link could not be resolved
    pub fn with_unresolved_parent(
        name: impl Into<String>,
        joint_type: JointType,
        child: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            joint_type,
            parent_link: None,
            child_link: child,
        }
    }
}
