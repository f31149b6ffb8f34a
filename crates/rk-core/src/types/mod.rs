//! Core type definitions

mod bbox;
mod joint;
mod unit;

pub use bbox::*;
pub use joint::*;
pub use unit::*;
