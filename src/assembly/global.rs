//! Scatter/accumulate assembly into the global ELLPACK matrix.

use log::debug;
use nalgebra::RealField;

use crate::error::AssemblyError;
use crate::mesh::Mesh;
use crate::sparse::EllMatrix;

/// Assembles the global stiffness matrix for the mesh's diffusion operator.
///
/// The value buffer of `matrix` is zeroed before anything else, then elements are
/// visited in mesh storage order so that results are reproducible, each element's
/// local stiffness matrix is computed and scattered into the global matrix at the
/// rows and columns given by the element's connectivity. Contributions from
/// different elements to the same global `(row, col)` pair accumulate into a
/// single slot; each row can hold at most
/// [`max_nonzeros_per_row`](EllMatrix::max_nonzeros_per_row) distinct columns.
///
/// On error the pass is aborted immediately and the contents of `matrix` are
/// unspecified; callers must not consume a partially assembled matrix.
pub fn assemble_stiffness<T: RealField>(
    matrix: &mut EllMatrix<T>,
    mesh: &Mesh<T>,
) -> Result<(), AssemblyError> {
    matrix.clear();
    for (element_index, element) in mesh.elements().iter().enumerate() {
        let a_e = element
            .stiffness_matrix(mesh.vertices())
            .map_err(|error| {
                debug!("assembly aborted at element {element_index}: {error}");
                error
            })?;

        let n = element.num_nodes();
        if a_e.len() != n * n {
            return Err(AssemblyError::ShapeMismatch {
                expected: n * n,
                found: a_e.len(),
            });
        }

        let connectivity = element.node_indices();
        for i in 0..n {
            for j in 0..n {
                matrix.add(connectivity[i], connectivity[j], a_e[(i, j)].clone())?;
            }
        }
    }
    Ok(())
}
