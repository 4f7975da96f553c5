//! Element families and their shape function tables.
//!
//! Each [`ElementFamily`] variant fixes the node count `N` and the reference
//! space dimension `DIM` of its family, and supplies the uniform capability set
//! required by assembly: quadrature points, quadrature weights, shape function
//! values and shape function derivatives, all evaluated at the family's fixed
//! quadrature points. The tables are closed-form polynomial expressions over
//! the reference coordinates, never numeric differentiation.

use nalgebra::{DMatrix, DVector, Point3, RealField};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AssemblyError;

/// A closed set of reference element families.
///
/// Node ordering for `Quad4` is tensor order over the reference square
/// `[-1, 1]^2`:
///
/// ```text
/// 1_________3
/// |         |
/// |         |
/// 0_________2
/// ```
///
/// i.e. node 0 sits at (-1, -1), node 1 at (-1, +1), node 2 at (+1, -1) and
/// node 3 at (+1, +1). `Segment2` has node 0 at -1 and node 1 at +1 on the
/// reference interval `[-1, 1]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementFamily {
    Segment2,
    Quad4,
}

impl ElementFamily {
    /// The number of nodes (equivalently, shape functions and quadrature points)
    /// of this family.
    pub const fn num_nodes(&self) -> usize {
        match self {
            ElementFamily::Segment2 => 2,
            ElementFamily::Quad4 => 4,
        }
    }

    /// The dimension of the family's reference space.
    pub const fn reference_dim(&self) -> usize {
        match self {
            ElementFamily::Segment2 => 1,
            ElementFamily::Quad4 => 2,
        }
    }

    /// The fixed quadrature abscissae of this family, in reference coordinates.
    ///
    /// Both families use two-point Gauss-Legendre tensor rules, so the abscissae
    /// are the tensor points built from ±1/√3. Points always carry three
    /// coordinates; axes beyond [`Self::reference_dim`] are zero.
    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn gauss_points<T: RealField>(&self) -> Vec<Point3<T>> {
        let q = 0.577350269189626;
        match self {
            ElementFamily::Segment2 => vec![
                Point3::new(-q.clone(), 0.0, 0.0),
                Point3::new(q, 0.0, 0.0),
            ],
            ElementFamily::Quad4 => vec![
                Point3::new(-q.clone(), -q.clone(), 0.0),
                Point3::new(-q.clone(),  q.clone(), 0.0),
                Point3::new( q.clone(), -q.clone(), 0.0),
                Point3::new( q.clone(),  q, 0.0),
            ],
        }
    }

    /// Quadrature weights, in the same order as [`Self::gauss_points`].
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn weights<T: RealField>(&self) -> Vec<T> {
        // Two-point Gauss-Legendre tensor rules have unit weights in every dimension.
        vec![1.0; self.num_nodes()]
    }

    /// Evaluates each shape function at the given reference coordinates. The result
    /// is a vector whose entry `i` is the value of shape function `i`.
    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn evaluate_basis<T: RealField>(&self, xi: &Point3<T>) -> DVector<T> {
        match self {
            ElementFamily::Segment2 => {
                let x = xi.x.clone();
                DVector::from_column_slice(&[
                    (1.0 - x.clone()) / 2.0,
                    (1.0 + x) / 2.0,
                ])
            }
            ElementFamily::Quad4 => {
                // We define the shape functions as N_{alpha, beta} such that
                //  N_{alpha, beta}([alpha, beta]) = 1
                // with alpha, beta = 1 or -1.
                let phi = |alpha: T, beta: T| {
                    (1.0 + alpha * xi.x.clone()) * (1.0 + beta * xi.y.clone()) / 4.0
                };
                DVector::from_column_slice(&[
                    phi(-1.0, -1.0),
                    phi(-1.0,  1.0),
                    phi( 1.0, -1.0),
                    phi( 1.0,  1.0),
                ])
            }
        }
    }

    /// Constructs a matrix whose columns are the reference-space gradients of each
    /// shape function at the given reference coordinates. The matrix has
    /// [`Self::reference_dim`] rows and [`Self::num_nodes`] columns.
    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn evaluate_gradients<T: RealField>(&self, xi: &Point3<T>) -> DMatrix<T> {
        match self {
            ElementFamily::Segment2 => DMatrix::from_column_slice(1, 2, &[
                -0.5,
                 0.5,
            ]),
            ElementFamily::Quad4 => {
                let phi_grad = |alpha: T, beta: T| [
                    alpha.clone() * (1.0 + beta.clone() * xi.y.clone()) / 4.0,
                    beta * (1.0 + alpha * xi.x.clone()) / 4.0,
                ];
                let columns = [
                    phi_grad(-1.0, -1.0),
                    phi_grad(-1.0,  1.0),
                    phi_grad( 1.0, -1.0),
                    phi_grad( 1.0,  1.0),
                ];
                DMatrix::from_fn(2, 4, |d, i| columns[i][d].clone())
            }
        }
    }

    /// The N×N table of shape function values at the family's quadrature points;
    /// entry `(i, g)` is the value of shape function `i` at quadrature point `g`.
    pub fn shape_values<T: RealField>(&self) -> DMatrix<T> {
        let n = self.num_nodes();
        let points = self.gauss_points::<T>();
        let mut table = DMatrix::zeros(n, n);
        for (g, xi) in points.iter().enumerate() {
            table.column_mut(g).copy_from(&self.evaluate_basis(xi));
        }
        table
    }

    /// The shape function derivative tables at the family's quadrature points,
    /// one DIM×N gradient matrix per quadrature point.
    pub fn shape_derivatives<T: RealField>(&self) -> Vec<DMatrix<T>> {
        self.gauss_points::<T>()
            .iter()
            .map(|xi| self.evaluate_gradients(xi))
            .collect()
    }
}

impl fmt::Display for ElementFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gauss points:")?;
        for point in self.gauss_points::<f64>() {
            writeln!(f, "  ({}, {}, {})", point.x, point.y, point.z)?;
        }
        writeln!(f, "Weights:")?;
        for weight in self.weights::<f64>() {
            writeln!(f, "  {}", weight)?;
        }
        writeln!(f, "Shape values:{}", self.shape_values::<f64>())?;
        writeln!(f, "Shape derivatives:")?;
        for (g, gradients) in self.shape_derivatives::<f64>().iter().enumerate() {
            write!(f, "point {}:{}", g, gradients)?;
        }
        Ok(())
    }
}

/// An element of the mesh: a family together with the ordered global node indices
/// of its connectivity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    family: ElementFamily,
    nodes: Vec<usize>,
}

impl Element {
    /// Constructs an element from a family and its global node indices.
    ///
    /// Fails with [`AssemblyError::ShapeMismatch`] if the connectivity length does
    /// not equal the family's node count. Whether the indices are valid for a given
    /// node set is checked when the element's vertices are resolved against a mesh.
    pub fn new(family: ElementFamily, nodes: Vec<usize>) -> Result<Self, AssemblyError> {
        if nodes.len() != family.num_nodes() {
            return Err(AssemblyError::ShapeMismatch {
                expected: family.num_nodes(),
                found: nodes.len(),
            });
        }
        Ok(Self { family, nodes })
    }

    pub fn family(&self) -> ElementFamily {
        self.family
    }

    pub fn node_indices(&self) -> &[usize] {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}
