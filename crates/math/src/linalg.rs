//! Linear algebra operations for cross-sectional regressions.

use ndarray::{Array1, Array2};

use crate::MathError;

/// Residuals `y - X * beta` of an ordinary least squares regression.
///
/// Solves: argmin_beta sum((y_i - X_i * beta)^2)
///
/// The design matrix is used as given; include a column of ones for an
/// intercept.
///
/// # Arguments
/// * `y` - Response vector (n,)
/// * `x` - Design matrix (n x p)
///
/// # Errors
/// Returns error if dimensions mismatch or the normal equations are singular.
pub fn ols_residuals(y: &Array1<f64>, x: &Array2<f64>) -> Result<Array1<f64>, MathError> {
    let n = y.len();

    if x.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: x.nrows() });
    }
    if n == 0 || x.ncols() == 0 {
        return Err(MathError::EmptyData);
    }

    // Normal equations: (X'X) beta = X'y
    let xtx = x.t().dot(x);
    let xty = x.t().dot(y);

    let coefficients = solve_linear_system(&xtx, &xty)?;
    if coefficients.iter().any(|b| !b.is_finite()) {
        return Err(MathError::NumericalInstability("non-finite coefficient".to_string()));
    }

    Ok(y - &x.dot(&coefficients))
}

/// Solve a linear system Ax = b using Gaussian elimination with partial pivoting.
fn solve_linear_system(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, MathError> {
    let n = a.nrows();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.ncols() != n {
        return Err(MathError::LinearAlgebra("matrix must be square".to_string()));
    }
    if b.len() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: b.len() });
    }

    // Augmented matrix [A | b]
    let mut aug = Array2::zeros((n, n + 1));
    aug.slice_mut(ndarray::s![.., ..n]).assign(a);
    aug.column_mut(n).assign(b);

    for col in 0..n {
        let max_row = (col..n)
            .max_by(|&i, &j| aug[[i, col]].abs().total_cmp(&aug[[j, col]].abs()))
            .unwrap_or(col);

        if aug[[max_row, col]].abs() < 1e-14 {
            return Err(MathError::LinearAlgebra(
                "matrix is singular or nearly singular".to_string(),
            ));
        }

        if max_row != col {
            for j in 0..=n {
                aug.swap([col, j], [max_row, j]);
            }
        }

        for row in (col + 1)..n {
            let factor = aug[[row, col]] / aug[[col, col]];
            for j in col..=n {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    // Back substitution
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = aug[[i, n]];
        for j in (i + 1)..n {
            sum -= aug[[i, j]] * x[j];
        }
        x[i] = sum / aug[[i, i]];
    }

    Ok(x)
}

/// Numerical column rank of a matrix.
///
/// Gaussian elimination with full pivoting; a pivot counts when it exceeds
/// `max(n, p) * eps * max|a_ij|`, mirroring the usual SVD-based tolerance.
#[must_use]
pub fn matrix_rank(x: &Array2<f64>) -> usize {
    let (rows, cols) = x.dim();
    if rows == 0 || cols == 0 {
        return 0;
    }
    if x.iter().any(|v| !v.is_finite()) {
        return 0;
    }

    let mut a = x.clone();
    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return 0;
    }
    let tol = rows.max(cols) as f64 * f64::EPSILON * scale;

    let mut rank = 0;
    for step in 0..rows.min(cols) {
        // Largest remaining entry in the trailing submatrix
        let (mut pr, mut pc, mut pmax) = (step, step, 0.0);
        for i in step..rows {
            for j in step..cols {
                if a[[i, j]].abs() > pmax {
                    (pr, pc, pmax) = (i, j, a[[i, j]].abs());
                }
            }
        }
        if pmax <= tol {
            break;
        }

        for j in 0..cols {
            a.swap([step, j], [pr, j]);
        }
        for i in 0..rows {
            a.swap([i, step], [i, pc]);
        }

        for i in (step + 1)..rows {
            let factor = a[[i, step]] / a[[step, step]];
            for j in step..cols {
                a[[i, j]] -= factor * a[[step, j]];
            }
        }
        rank += 1;
    }

    rank
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn ols_simple_regression() {
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let x =
            Array2::from_shape_vec((5, 2), vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0, 1.0, 5.0])
                .unwrap();

        // Perfect fit: y = 0 + 1*x
        let residuals = ols_residuals(&y, &x).unwrap();
        for r in &residuals {
            assert_relative_eq!(*r, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn ols_residuals_orthogonal_to_design() {
        let y = array![0.3, -1.2, 0.8, 2.1, -0.4, 1.7, 0.05];
        let x = Array2::from_shape_vec(
            (7, 3),
            vec![
                1.0, 0.0, 20.1, 1.0, 1.0, 21.4, 1.0, 0.0, 19.7, 1.0, 1.0, 22.3, 1.0, 0.0, 20.9,
                1.0, 1.0, 18.8, 1.0, 0.0, 21.0,
            ],
        )
        .unwrap();

        let residuals = ols_residuals(&y, &x).unwrap();
        let xtr = x.t().dot(&residuals);
        for v in xtr.iter() {
            assert_relative_eq!(*v, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn ols_singular_errors() {
        let y = array![1.0, 2.0, 3.0];
        let x = Array2::from_shape_vec((3, 2), vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]).unwrap();
        assert!(ols_residuals(&y, &x).is_err());
    }

    #[test]
    fn ols_dimension_mismatch() {
        let y = array![1.0, 2.0];
        let x = Array2::<f64>::ones((3, 1));
        assert!(matches!(
            ols_residuals(&y, &x),
            Err(MathError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn rank_full_column() {
        let x = Array2::from_shape_vec((4, 2), vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0])
            .unwrap();
        assert_eq!(matrix_rank(&x), 2);
    }

    #[test]
    fn rank_detects_dependent_columns() {
        // Third column is the sum of the first two
        let x = Array2::from_shape_vec(
            (4, 3),
            vec![1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0],
        )
        .unwrap();
        assert_eq!(matrix_rank(&x), 2);
    }

    #[test]
    fn rank_zero_column() {
        let x = Array2::from_shape_vec((3, 2), vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
        assert_eq!(matrix_rank(&x), 1);
        assert_eq!(matrix_rank(&Array2::zeros((3, 2))), 0);
    }
}
