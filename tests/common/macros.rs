/// Asserts that every row of a square matrix sums to one.
#[macro_export]
macro_rules! assert_row_stochastic {
    ($matrix:expr) => {
        for (i, row) in $matrix.rows().enumerate() {
            let sum: f64 = row.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "Row {} sums to {}, expected 1",
                i,
                sum
            );
            assert!(
                row.iter().all(|w| *w >= 0.0),
                "Row {} has a negative weight",
                i
            );
        }
    };
}

/// Asserts that a square matrix is symmetric with a zero diagonal.
#[macro_export]
macro_rules! assert_symmetric {
    ($matrix:expr) => {
        let m = &$matrix;
        for i in 0..m.size() {
            assert_eq!(m.get(i, i), 0.0, "Diagonal entry {} is not zero", i);
        }
        assert!(m.is_symmetric(1e-9), "Matrix is not symmetric");
    };
}

/// Asserts that a morphology has the expected number of root compartments.
#[macro_export]
macro_rules! assert_root_compartments {
    ($morphology:expr, $count:expr) => {
        assert_eq!(
            $morphology.root_compartments().count(),
            $count,
            "Root compartment count mismatch"
        );
    };
}
