//! Line diff engine.
//!
//! Computes minimal edit scripts between the ancestor sequence and one
//! side of the merge. The merge engine walks two of these scripts in
//! lockstep over ancestor line positions.

mod edit_script;
mod generator;

pub use edit_script::{ChangeHunk, EditOp, EditScript};
pub use generator::diff;
