//! Design matrix for one date's neutralization regression.

use ndarray::Array2;

/// Name of the intercept column.
pub const INTERCEPT: &str = "intercept";

/// Name of the size column.
pub const LOG_SIZE: &str = "log_size";

/// Regressors for one cross-section.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    /// Row-major design, `n x p`.
    pub matrix: Array2<f64>,
    /// Column names, in matrix order.
    pub columns: Vec<String>,
}

impl DesignMatrix {
    /// Build `[intercept | industry dummies | log size]`.
    ///
    /// `categories` are the sorted distinct industries observed on the date;
    /// the first is the reference and gets no dummy. `labels` and `log_size`
    /// describe the rows entering the regression.
    #[must_use]
    pub fn build(categories: &[&str], labels: &[&str], log_size: &[f64]) -> Self {
        let dummies = categories.get(1..).unwrap_or_default();
        let p = dummies.len() + 2;
        let mut matrix = Array2::zeros((labels.len(), p));

        for (i, (&label, &size)) in labels.iter().zip(log_size).enumerate() {
            matrix[[i, 0]] = 1.0;
            if let Some(j) = dummies.iter().position(|&c| c == label) {
                matrix[[i, 1 + j]] = 1.0;
            }
            matrix[[i, p - 1]] = size;
        }

        let mut columns = Vec::with_capacity(p);
        columns.push(INTERCEPT.to_string());
        columns.extend(dummies.iter().map(|c| format!("industry[{c}]")));
        columns.push(LOG_SIZE.to_string());

        Self { matrix, columns }
    }

    /// Number of regressors, intercept included.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Number of observations.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_category_dropped() {
        let design = DesignMatrix::build(
            &["energy", "tech", "utilities"],
            &["tech", "energy", "utilities"],
            &[1.0, 2.0, 3.0],
        );

        assert_eq!(
            design.columns,
            vec!["intercept", "industry[tech]", "industry[utilities]", "log_size"]
        );
        assert_eq!(design.matrix.row(0).to_vec(), vec![1.0, 1.0, 0.0, 1.0]);
        assert_eq!(design.matrix.row(1).to_vec(), vec![1.0, 0.0, 0.0, 2.0]);
        assert_eq!(design.matrix.row(2).to_vec(), vec![1.0, 0.0, 1.0, 3.0]);
    }

    #[test]
    fn single_category_has_no_dummies() {
        let design = DesignMatrix::build(&["tech"], &["tech", "tech"], &[4.0, 5.0]);
        assert_eq!(design.ncols(), 2);
        assert_eq!(design.nrows(), 2);
    }
}
