//! Graph operations for Assembly (add, connect, count, retain)

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::{Assembly, AssemblyError, Joint, Link};
use crate::types::JointType;

impl Assembly {
    /// Add a link to the end of the export order
    pub fn add_link(&mut self, link: Link) -> Result<Uuid, AssemblyError> {
        if self.link_by_name(&link.name).is_some() {
            return Err(AssemblyError::DuplicateLink(link.name));
        }
        let id = link.id;
        self.links.push(link);
        Ok(id)
    }

    /// Add a joint as reported by the host, without validating endpoints
    pub fn add_joint(&mut self, joint: Joint) -> Uuid {
        let id = joint.id;
        self.joints.push(joint);
        id
    }

    /// Connect two links with a joint
    pub fn connect(
        &mut self,
        name: impl Into<String>,
        joint_type: JointType,
        parent_id: Uuid,
        child_id: Uuid,
    ) -> Result<Uuid, AssemblyError> {
        // Validate links exist
        if self.link(parent_id).is_none() {
            return Err(AssemblyError::LinkNotFound(parent_id));
        }
        if self.link(child_id).is_none() {
            return Err(AssemblyError::LinkNotFound(child_id));
        }

        Ok(self.add_joint(Joint::new(name, joint_type, parent_id, child_id)))
    }

    /// Number of joints touching each link, as parent or child
    ///
    /// Every link appears in the map, links without joints with a count of 0.
    pub fn joint_counts(&self) -> HashMap<Uuid, usize> {
        let mut counts: HashMap<Uuid, usize> = self.links.iter().map(|l| (l.id, 0)).collect();
        for joint in &self.joints {
            for endpoint in [joint.parent_link, joint.child_link].into_iter().flatten() {
                if let Some(count) = counts.get_mut(&endpoint) {
                    *count += 1;
                }
            }
        }
        counts
    }

    /// Copy of the assembly restricted to the given links
    ///
    /// Joints whose resolved endpoints were dropped are dropped too. Joints
    /// with an unresolved endpoint are kept as the host reported them.
    pub fn retain_links(&self, keep: &HashSet<Uuid>) -> Assembly {
        let links = self
            .links
            .iter()
            .filter(|l| keep.contains(&l.id))
            .cloned()
            .collect();
        let joints = self
            .joints
            .iter()
            .filter(|j| {
                [j.parent_link, j.child_link]
                    .into_iter()
                    .flatten()
                    .all(|id| keep.contains(&id))
            })
            .cloned()
            .collect();

        Assembly {
            name: self.name.clone(),
            links,
            joints,
        }
    }
}
