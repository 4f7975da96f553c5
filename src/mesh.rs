use nalgebra::{Point3, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::element::Element;
use crate::error::AssemblyError;

/// A mesh node: a point in three-dimensional space.
///
/// Nodes always carry three coordinates; problems of lower dimension leave the
/// trailing axes at zero. Nodes are immutable once constructed and are referenced,
/// never owned, by elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Node<T: Scalar> {
    coords: Point3<T>,
}

impl<T: Scalar> Node<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self {
            coords: Point3::new(x, y, z),
        }
    }

    pub fn from_point(point: Point3<T>) -> Self {
        Self { coords: point }
    }

    pub fn point(&self) -> &Point3<T> {
        &self.coords
    }

    /// Returns the coordinate along the given axis.
    ///
    /// Fails with [`AssemblyError::IndexOutOfRange`] if `axis >= 3`.
    pub fn coord(&self, axis: usize) -> Result<T, AssemblyError> {
        self.coords
            .coords
            .as_slice()
            .get(axis)
            .cloned()
            .ok_or(AssemblyError::IndexOutOfRange { index: axis, len: 3 })
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.coords.x, self.coords.y, self.coords.z
        )
    }
}

/// Index-based container for a conforming mesh: a set of nodes and the elements
/// referencing them by global index.
///
/// The mesh is only as capable as assembly requires: it hands out its nodes and an
/// ordered element sequence. Construction does not validate connectivity; invalid
/// node indices surface as [`AssemblyError::IndexOutOfRange`] when an element's
/// vertices are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Mesh<T: Scalar> {
    vertices: Vec<Node<T>>,
    elements: Vec<Element>,
}

impl<T: Scalar> Mesh<T> {
    pub fn from_vertices_and_elements(vertices: Vec<Node<T>>, elements: Vec<Element>) -> Self {
        Self { vertices, elements }
    }

    pub fn vertices(&self) -> &[Node<T>] {
        &self.vertices
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Resolves the element's connectivity to physical node coordinates,
    /// in local node order.
    pub fn element_vertices(&self, element: &Element) -> Result<Vec<Point3<T>>, AssemblyError> {
        element
            .node_indices()
            .iter()
            .map(|&index| {
                self.vertices
                    .get(index)
                    .map(|node| node.point().clone())
                    .ok_or(AssemblyError::IndexOutOfRange {
                        index,
                        len: self.vertices.len(),
                    })
            })
            .collect()
    }
}
