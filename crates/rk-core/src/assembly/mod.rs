//! Assembly snapshot: links, bodies and the joints connecting them
//!
//! An [`Assembly`] is a read-only view of one robot assembly, built once per
//! export by a host adapter (a snapshot file, a URDF document, a CAD plugin).

mod graph;
mod joint;
mod link;

pub use joint::*;
pub use link::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur while building an assembly
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssemblyError {
    #[error("Link not found: {0}")]
    LinkNotFound(Uuid),

    #[error("Duplicate link name: {0}")]
    DuplicateLink(String),
}

/// Ordered collection of links and joints for one export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assembly {
    /// Robot or model name
    pub name: String,
    /// Links in export order
    pub links: Vec<Link>,
    /// Joints between links
    #[serde(default)]
    pub joints: Vec<Joint>,
}

impl Assembly {
    /// Create an empty assembly
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: Vec::new(),
            joints: Vec::new(),
        }
    }

    /// Find a link by id
    pub fn link(&self, id: Uuid) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Find a link by name
    pub fn link_by_name(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name == name)
    }

    /// Resolve a joint endpoint to a link name for display
    pub fn endpoint_name(&self, endpoint: Option<Uuid>) -> &str {
        endpoint
            .and_then(|id| self.link(id))
            .map(|l| l.name.as_str())
            .unwrap_or("<unresolved>")
    }
}
