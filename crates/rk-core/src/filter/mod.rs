//! Small part filter
//!
//! Drops links whose bounding-box diagonal is below a threshold, unless the
//! link is structural (the parent of at least one joint). Whenever host data
//! is missing the link is kept, and the decision says so.

mod config;
mod decision;

pub use config::FilterConfig;
pub use decision::{Assessment, Decision, KeepReason};

use std::cmp::Ordering;
use std::collections::HashSet;

use uuid::Uuid;

use crate::assembly::{Assembly, Joint, Link};
use crate::types::{BoundingBox, LengthUnit};

/// Filter configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid unit '{0}' (expected mm, cm or m)")]
    InvalidUnit(String),

    #[error("Invalid threshold {0} (expected a finite value >= 0)")]
    InvalidThreshold(f64),
}

/// Convert a threshold to centimeters, the unit of assembly geometry
pub fn convert_to_cm(value: f64, unit: LengthUnit) -> f64 {
    unit.to_cm(value)
}

/// Space diagonal of a bounding box, in centimeters
pub fn get_bounding_box_diagonal(bbox: &BoundingBox) -> f64 {
    bbox.diagonal()
}

/// Largest body diagonal of a link
///
/// Unknown if any body is missing its bounding box.
pub fn link_diagonal(link: &Link) -> Assessment<f64> {
    let mut max_diagonal = 0.0_f64;
    for body in &link.bodies {
        match &body.bounding_box {
            Some(bbox) => max_diagonal = max_diagonal.max(get_bounding_box_diagonal(bbox)),
            None => {
                return Assessment::Unknown(format!("no bounding box for body '{}'", body.name));
            }
        }
    }
    Assessment::Known(max_diagonal)
}

/// Parent endpoints of a set of joints
#[derive(Debug, Clone, Default)]
pub struct JointIndex {
    parents: HashSet<Uuid>,
    unresolved_parents: Vec<String>,
}

impl JointIndex {
    pub fn new(joints: &[Joint]) -> Self {
        let mut index = Self::default();
        for joint in joints {
            match joint.parent_link {
                Some(parent) => {
                    index.parents.insert(parent);
                }
                None => index.unresolved_parents.push(joint.name.clone()),
            }
        }
        index
    }

    /// Whether the link is a joint parent
    ///
    /// A link that is not a known parent is still reported as unknown while
    /// any joint has an unresolved parent, since it could be that parent.
    pub fn is_structural(&self, link_id: Uuid) -> Assessment<bool> {
        if self.parents.contains(&link_id) {
            return Assessment::Known(true);
        }
        match self.unresolved_parents.as_slice() {
            [] => Assessment::Known(false),
            [joint] => Assessment::Unknown(format!("parent of joint '{joint}' unresolved")),
            joints => Assessment::Unknown(format!(
                "parents of {} joints unresolved ({})",
                joints.len(),
                joints.join(", ")
            )),
        }
    }
}

/// Whether the link is the parent of any joint
pub fn is_structural_part(link: &Link, joints: &[Joint]) -> Assessment<bool> {
    JointIndex::new(joints).is_structural(link.id)
}

/// Decide one link against a threshold in centimeters
pub fn assess_part(link: &Link, threshold_cm: f64, index: &JointIndex) -> Decision {
    if link.bodies.is_empty() {
        return Decision::Keep(KeepReason::NoBodies);
    }

    let diagonal_cm = match link_diagonal(link) {
        Assessment::Known(d) => d,
        Assessment::Unknown(why) => return Decision::Keep(KeepReason::SizeUnknown(why)),
    };
    // Only a strictly smaller diagonal can be removed; NaN compares as unordered
    if diagonal_cm.partial_cmp(&threshold_cm) != Some(Ordering::Less) {
        return Decision::Keep(KeepReason::Large { diagonal_cm });
    }

    match index.is_structural(link.id) {
        Assessment::Known(true) => Decision::Keep(KeepReason::Structural),
        Assessment::Known(false) => Decision::Remove { diagonal_cm },
        Assessment::Unknown(why) => Decision::Keep(KeepReason::StructureUnknown(why)),
    }
}

/// True if the link should be filtered out
pub fn should_filter_part(link: &Link, threshold_cm: f64, joints: &[Joint]) -> bool {
    assess_part(link, threshold_cm, &JointIndex::new(joints)).is_removed()
}

/// Links that survive the filter, in their original order
pub fn filter_links<'a>(
    links: &'a [Link],
    threshold_value: f64,
    threshold_unit: LengthUnit,
    joints: &[Joint],
) -> Vec<&'a Link> {
    let threshold_cm = convert_to_cm(threshold_value, threshold_unit);
    let index = JointIndex::new(joints);
    links
        .iter()
        .filter(|link| !assess_part(link, threshold_cm, &index).is_removed())
        .collect()
}

/// One link and what the filter decided for it
#[derive(Debug, Clone)]
pub struct LinkDecision<'a> {
    pub link: &'a Link,
    pub decision: Decision,
}

/// Outcome of running the filter over an assembly
#[derive(Debug, Clone)]
pub struct FilterReport<'a> {
    /// Threshold used, `None` when filtering was disabled
    pub threshold_cm: Option<f64>,
    /// One entry per input link, in input order
    pub entries: Vec<LinkDecision<'a>>,
}

impl<'a> FilterReport<'a> {
    /// Kept links, in input order
    pub fn kept(&self) -> Vec<&'a Link> {
        self.entries
            .iter()
            .filter(|e| !e.decision.is_removed())
            .map(|e| e.link)
            .collect()
    }

    /// Removed links, in input order
    pub fn removed(&self) -> Vec<&'a Link> {
        self.entries
            .iter()
            .filter(|e| e.decision.is_removed())
            .map(|e| e.link)
            .collect()
    }

    /// Ids of kept links
    pub fn kept_ids(&self) -> HashSet<Uuid> {
        self.kept().into_iter().map(|l| l.id).collect()
    }

    /// Number of links kept because host data was missing
    pub fn degraded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.decision.is_degraded()).count()
    }
}

/// Run the filter over an assembly as configured
///
/// With filtering disabled every link is kept, in order.
pub fn apply_filter<'a>(
    config: &FilterConfig,
    assembly: &'a Assembly,
) -> Result<FilterReport<'a>, FilterError> {
    if !config.enabled {
        tracing::debug!("Small part filter disabled");
        return Ok(FilterReport {
            threshold_cm: None,
            entries: assembly
                .links
                .iter()
                .map(|link| LinkDecision {
                    link,
                    decision: Decision::Keep(KeepReason::FilterDisabled),
                })
                .collect(),
        });
    }

    let threshold_cm = config.threshold_cm()?;
    tracing::info!(
        "Filtering {} links with threshold {}{} ({:.4}cm)",
        assembly.links.len(),
        config.threshold_value,
        config.threshold_unit,
        threshold_cm
    );

    let counts = assembly.joint_counts();
    let mut distribution: Vec<_> = assembly
        .links
        .iter()
        .map(|l| (l.name.as_str(), counts.get(&l.id).copied().unwrap_or(0)))
        .collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1));
    tracing::debug!("Joint distribution: {:?}", distribution);

    let index = JointIndex::new(&assembly.joints);
    let entries: Vec<_> = assembly
        .links
        .iter()
        .map(|link| {
            let decision = assess_part(link, threshold_cm, &index);
            if decision.is_degraded() {
                tracing::warn!("{}: {}", link.name, decision);
            } else {
                tracing::debug!("{}: {}", link.name, decision);
            }
            LinkDecision { link, decision }
        })
        .collect();

    let report = FilterReport {
        threshold_cm: Some(threshold_cm),
        entries,
    };
    tracing::info!(
        "Removed {} small parts, keeping {} links",
        report.removed().len(),
        report.kept().len()
    );
    Ok(report)
}

/// Move the first grounded link to the front so it becomes the root link
///
/// Returns the index it was moved from, `None` if no link is grounded.
pub fn promote_grounded_link(links: &mut Vec<&Link>) -> Option<usize> {
    let index = links.iter().position(|l| l.grounded)?;
    if index > 0 {
        let grounded = links.remove(index);
        tracing::info!("Moving grounded link '{}' to root position", grounded.name);
        links.insert(0, grounded);
    }
    Some(index)
}
