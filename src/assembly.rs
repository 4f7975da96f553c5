//! Element-local and global assembly of diffusion stiffness matrices.

pub mod global;
pub mod local;

pub use global::assemble_stiffness;
pub use local::element_stiffness;
