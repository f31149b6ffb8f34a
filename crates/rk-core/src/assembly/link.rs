//! Links and the bodies they are made of

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::BoundingBox;

/// One solid body inside a link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    /// Bounding box in centimeters, `None` if the host could not compute it
    pub bounding_box: Option<BoundingBox>,
}

impl Body {
    /// Create a body with a known bounding box
    pub fn new(name: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            name: name.into(),
            bounding_box: Some(bounding_box),
        }
    }

    /// Create a body whose bounding box is unavailable
    pub fn unmeasured(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounding_box: None,
        }
    }
}

/// A rigid-body segment of the robot (one CAD occurrence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: Uuid,
    pub name: String,
    /// Bodies that make up this link
    #[serde(default)]
    pub bodies: Vec<Body>,
    /// Link is fixed to the world (becomes the root of the export)
    #[serde(default)]
    pub grounded: bool,
}

impl Link {
    /// Create a new link with no bodies
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bodies: Vec::new(),
            grounded: false,
        }
    }

    /// Add a body
    pub fn with_body(mut self, body: Body) -> Self {
        self.bodies.push(body);
        self
    }

    /// Add a body of the given bounding box, named after the link
    pub fn with_bounding_box(self, bounding_box: BoundingBox) -> Self {
        let name = format!("{}_body{}", self.name, self.bodies.len());
        self.with_body(Body::new(name, bounding_box))
    }

    /// Mark as grounded
    pub fn grounded(mut self) -> Self {
        self.grounded = true;
        self
    }
}
