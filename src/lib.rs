//! Workspace facade for the demos under `demos/`: the whole `geodb-core`
//! API under one name.

pub use geodb_core::*;
pub use geodb_core::{loader, prelude};
