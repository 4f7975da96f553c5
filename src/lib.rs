//! `ellfem` is a small library for assembling finite element diffusion operators
//! into fixed-bandwidth (ELLPACK) sparse matrices.
//!
//! The crate covers the assembly pipeline only: evaluation of element-local shape
//! functions and their derivatives at quadrature points, the Jacobian transformation
//! between reference and physical coordinates, element stiffness matrices, and the
//! scatter/accumulate pass into a global sparse matrix. Mesh file I/O, boundary
//! condition application and linear solvers are deliberately out of scope and are
//! expected to be provided by external collaborators.

pub mod assembly;
pub mod element;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod sparse;

pub extern crate nalgebra;

pub use crate::error::AssemblyError;
