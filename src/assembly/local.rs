//! Element-local stiffness matrix assembly.

use itertools::izip;
use log::trace;
use nalgebra::{DMatrix, Point3, RealField};

use crate::element::{Element, ElementFamily};
use crate::error::AssemblyError;
use crate::geometry::inverse_jacobian;
use crate::mesh::Node;

/// Computes the element-local stiffness matrix for the isotropic unit-coefficient
/// diffusion form,
///
/// ```text
/// Ae[i][j] = ∫ ∇φ_i · ∇φ_j dΩ
/// ```
///
/// approximated by the family's quadrature rule: at each quadrature point the
/// reference gradients are transformed to physical gradients through the inverse
/// Jacobian, and `(∇φ_i · ∇φ_j) w_g det(J)` is accumulated over all local node
/// pairs. The result is a dense N×N matrix, symmetric for this form.
///
/// Fails with [`AssemblyError::ShapeMismatch`] when the number of vertex
/// coordinates disagrees with the family's node count, and with
/// [`AssemblyError::DegenerateGeometry`] for a collapsed or inverted element.
pub fn element_stiffness<T: RealField>(
    family: ElementFamily,
    vertex_coords: &[Point3<T>],
) -> Result<DMatrix<T>, AssemblyError> {
    let n = family.num_nodes();
    if vertex_coords.len() != n {
        return Err(AssemblyError::ShapeMismatch {
            expected: n,
            found: vertex_coords.len(),
        });
    }

    let weights = family.weights::<T>();
    let derivatives = family.shape_derivatives::<T>();

    let mut a_e = DMatrix::zeros(n, n);
    for (weight, reference_gradients) in izip!(&weights, &derivatives) {
        let (j_inv, det) = inverse_jacobian(reference_gradients, vertex_coords)?;
        // Physical gradients: columns are per-node gradients, ∇_x φ = J⁻ᵀ ∇_ξ φ.
        let physical_gradients = j_inv.transpose() * reference_gradients;
        a_e += physical_gradients.tr_mul(&physical_gradients) * (weight.clone() * det);
    }

    trace!("element stiffness matrix ({:?}):{}", family, a_e);
    Ok(a_e)
}

impl Element {
    /// Computes this element's local stiffness matrix against the given global
    /// node set.
    ///
    /// Fails with [`AssemblyError::IndexOutOfRange`] if the element's connectivity
    /// references a node outside the given set.
    pub fn stiffness_matrix<T: RealField>(
        &self,
        vertices: &[Node<T>],
    ) -> Result<DMatrix<T>, AssemblyError> {
        let coords: Vec<_> = self
            .node_indices()
            .iter()
            .map(|&index| {
                vertices
                    .get(index)
                    .map(|node| node.point().clone())
                    .ok_or(AssemblyError::IndexOutOfRange {
                        index,
                        len: vertices.len(),
                    })
            })
            .collect::<Result<_, _>>()?;
        element_stiffness(self.family(), &coords)
    }
}
