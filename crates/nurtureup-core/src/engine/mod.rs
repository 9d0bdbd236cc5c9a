//! # Stage Engine
//!
//! Classification, registry lookup, parent resolution and transition
//! prediction. Every operation is a pure function of its arguments, the
//! evaluation instant and the static registry.

mod classifier;
mod parent;
mod registry;
mod transition;

pub use classifier::*;
pub use parent::*;
pub use registry::*;
pub use transition::*;
