use ellfem::element::{Element, ElementFamily};
use ellfem::error::AssemblyError;
use matrixcompare::assert_scalar_eq;

const FAMILIES: [ElementFamily; 2] = [ElementFamily::Segment2, ElementFamily::Quad4];

#[test]
fn table_shapes_are_consistent() {
    for family in FAMILIES {
        let n = family.num_nodes();
        let dim = family.reference_dim();
        assert_eq!(family.gauss_points::<f64>().len(), n);
        assert_eq!(family.weights::<f64>().len(), n);
        assert_eq!(family.shape_values::<f64>().shape(), (n, n));
        let derivatives = family.shape_derivatives::<f64>();
        assert_eq!(derivatives.len(), n);
        for gradients in &derivatives {
            assert_eq!(gradients.shape(), (dim, n));
        }
    }
}

#[test]
fn weights_sum_to_reference_measure() {
    // The measure of [-1, 1] is 2, that of [-1, 1]^2 is 4.
    let sum = |family: ElementFamily| family.weights::<f64>().iter().sum::<f64>();
    assert_scalar_eq!(sum(ElementFamily::Segment2), 2.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(sum(ElementFamily::Quad4), 4.0, comp = abs, tol = 1e-14);
}

#[test]
fn shape_values_partition_unity_at_every_gauss_point() {
    for family in FAMILIES {
        let values = family.shape_values::<f64>();
        for g in 0..family.num_nodes() {
            let sum: f64 = values.column(g).iter().sum();
            assert_scalar_eq!(sum, 1.0, comp = abs, tol = 1e-14);
        }
    }
}

#[test]
fn shape_derivatives_sum_to_zero_at_every_gauss_point() {
    for family in FAMILIES {
        for gradients in family.shape_derivatives::<f64>() {
            for d in 0..family.reference_dim() {
                let sum: f64 = gradients.row(d).iter().sum();
                assert_scalar_eq!(sum, 0.0, comp = abs, tol = 1e-14);
            }
        }
    }
}

#[test]
fn shape_values_are_interpolatory_at_segment_endpoints() {
    // Each Segment2 shape function is linear, equal to 1 at its own node and 0 at
    // the other, so at the gauss points the values are (1 ± 1/sqrt(3)) / 2.
    let values = ElementFamily::Segment2.shape_values::<f64>();
    let q = 1.0 / 3.0f64.sqrt();
    assert_scalar_eq!(values[(0, 0)], (1.0 + q) / 2.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values[(1, 0)], (1.0 - q) / 2.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values[(0, 1)], (1.0 - q) / 2.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values[(1, 1)], (1.0 + q) / 2.0, comp = abs, tol = 1e-14);
}

#[test]
fn element_construction_validates_connectivity_length() {
    let element = Element::new(ElementFamily::Quad4, vec![0, 1, 2, 3]).unwrap();
    assert_eq!(element.num_nodes(), 4);
    assert_eq!(element.node_indices(), &[0, 1, 2, 3]);

    let error = Element::new(ElementFamily::Quad4, vec![0, 1, 2]).unwrap_err();
    assert_eq!(
        error,
        AssemblyError::ShapeMismatch {
            expected: 4,
            found: 3
        }
    );
}

#[test]
fn family_display_lists_tables() {
    let rendered = format!("{}", ElementFamily::Segment2);
    assert!(rendered.contains("Gauss points:"));
    assert!(rendered.contains("Weights:"));
    assert!(rendered.contains("Shape values:"));
    assert!(rendered.contains("Shape derivatives:"));
}
