//! The Jacobian transformation between reference and physical element coordinates.

use nalgebra::{DMatrix, Point3, RealField};

use crate::element::ElementFamily;
use crate::error::AssemblyError;

/// Computes the Jacobian of the reference-to-physical map at a quadrature point.
///
/// `reference_gradients` is the DIM×N matrix whose columns are the reference-space
/// shape function gradients at the point, and `vertex_coords` are the N physical
/// node coordinates of the element. The result is the DIM×DIM matrix
/// `J = X Gᵀ`, where `X` is the matrix of physical coordinates restricted to the
/// first DIM axes, so that `J[(i, j)] = ∂x_i / ∂ξ_j`.
pub fn jacobian<T: RealField>(
    reference_gradients: &DMatrix<T>,
    vertex_coords: &[Point3<T>],
) -> DMatrix<T> {
    let dim = reference_gradients.nrows();
    let mut j = DMatrix::zeros(dim, dim);
    for (node, x) in vertex_coords.iter().enumerate() {
        for i in 0..dim {
            for d in 0..dim {
                j[(i, d)] += x.coords[i].clone() * reference_gradients[(d, node)].clone();
            }
        }
    }
    j
}

/// Inverts a small (1×1 to 3×3) Jacobian by the standard closed-form cofactor
/// expressions, returning the inverse together with the determinant.
///
/// Fails with [`AssemblyError::DegenerateGeometry`] when the determinant is
/// numerically zero, which indicates a collapsed or inverted element.
pub fn invert_jacobian<T: RealField>(j: &DMatrix<T>) -> Result<(DMatrix<T>, T), AssemblyError> {
    let dim = j.nrows();
    debug_assert_eq!(j.ncols(), dim);

    let det = match dim {
        1 => j[(0, 0)].clone(),
        2 => j[(0, 0)].clone() * j[(1, 1)].clone() - j[(0, 1)].clone() * j[(1, 0)].clone(),
        3 => {
            let cofactor = |r: [usize; 2], c: [usize; 2]| {
                j[(r[0], c[0])].clone() * j[(r[1], c[1])].clone()
                    - j[(r[0], c[1])].clone() * j[(r[1], c[0])].clone()
            };
            j[(0, 0)].clone() * cofactor([1, 2], [1, 2])
                - j[(0, 1)].clone() * cofactor([1, 2], [0, 2])
                + j[(0, 2)].clone() * cofactor([1, 2], [0, 1])
        }
        _ => return Err(AssemblyError::IndexOutOfRange { index: dim, len: 3 }),
    };

    if det.clone().abs() <= T::default_epsilon() {
        return Err(AssemblyError::DegenerateGeometry);
    }

    let inv_det = T::one() / det.clone();
    let inverse = match dim {
        1 => DMatrix::from_element(1, 1, inv_det),
        2 => DMatrix::from_row_slice(
            2,
            2,
            &[
                j[(1, 1)].clone() * inv_det.clone(),
                -j[(0, 1)].clone() * inv_det.clone(),
                -j[(1, 0)].clone() * inv_det.clone(),
                j[(0, 0)].clone() * inv_det,
            ],
        ),
        3 => {
            // Adjugate divided by the determinant.
            let cofactor = |r: [usize; 2], c: [usize; 2]| {
                j[(r[0], c[0])].clone() * j[(r[1], c[1])].clone()
                    - j[(r[0], c[1])].clone() * j[(r[1], c[0])].clone()
            };
            let rows = [[1, 2], [0, 2], [0, 1]];
            DMatrix::from_fn(3, 3, |i, k| {
                let minor = cofactor(rows[k], rows[i]);
                let sign = if (i + k) % 2 == 0 { T::one() } else { -T::one() };
                sign * minor * inv_det.clone()
            })
        }
        _ => unreachable!("dimension validated above"),
    };

    Ok((inverse, det))
}

/// Computes the inverse Jacobian and its determinant at a quadrature point.
///
/// Convenience composition of [`jacobian`] and [`invert_jacobian`]; pure function
/// of its inputs.
pub fn inverse_jacobian<T: RealField>(
    reference_gradients: &DMatrix<T>,
    vertex_coords: &[Point3<T>],
) -> Result<(DMatrix<T>, T), AssemblyError> {
    invert_jacobian(&jacobian(reference_gradients, vertex_coords))
}

impl ElementFamily {
    /// Computes the inverse Jacobian and its determinant at the family's
    /// quadrature point `quadrature_point`, given physical node coordinates.
    ///
    /// Fails with [`AssemblyError::IndexOutOfRange`] when the quadrature point
    /// index is outside the family's rule.
    pub fn inverse_jacobian_at<T: RealField>(
        &self,
        vertex_coords: &[Point3<T>],
        quadrature_point: usize,
    ) -> Result<(DMatrix<T>, T), AssemblyError> {
        let derivatives = self.shape_derivatives::<T>();
        let gradients =
            derivatives
                .get(quadrature_point)
                .ok_or(AssemblyError::IndexOutOfRange {
                    index: quadrature_point,
                    len: derivatives.len(),
                })?;
        inverse_jacobian(gradients, vertex_coords)
    }
}
