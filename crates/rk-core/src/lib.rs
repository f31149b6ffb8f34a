//! Robot assembly core
//!
//! This crate contains the data structures and logic for exporting robot
//! assemblies without their small cosmetic parts:
//! - Assembly: links, bodies and joints of one export
//! - Filter: the small part filter and its configuration
//! - Urdf: URDF robots as assemblies, and pruning filtered links
//! - Snapshot: serialized assemblies (RON/JSON)

pub mod assembly;
pub mod filter;
pub mod mesh;
pub mod snapshot;
pub mod types;
pub mod urdf;

pub use assembly::*;
pub use filter::*;
pub use snapshot::*;
pub use types::*;
