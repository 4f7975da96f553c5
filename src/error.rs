use thiserror::Error;

/// Library-wide error type.
///
/// All errors indicate structural or input defects rather than transient conditions,
/// so none of them are retried internally. An error encountered during assembly aborts
/// the whole pass and leaves the global matrix in an unspecified state; callers must
/// discard it and restart from a freshly cleared matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AssemblyError {
    /// The Jacobian of the reference-to-physical map is numerically singular,
    /// indicating a collapsed or inverted element.
    #[error("degenerate element geometry: Jacobian is numerically singular")]
    DegenerateGeometry,
    /// An element-local quantity disagrees in size with the element's declared
    /// node count, indicating a wiring defect between the element and its
    /// shape function tables.
    #[error("shape mismatch: expected {expected} entries, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    /// A coordinate axis, node index or sparse matrix slot outside declared bounds.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
