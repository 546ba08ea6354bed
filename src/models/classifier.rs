//! Binary logistic regression over standardized features

use crate::error::{ScoringError, ScoringResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Hyperparameters for gradient-descent fitting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub epochs: usize,
    pub learning_rate: f64,
    pub l2_penalty: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            epochs: 400,
            learning_rate: 0.5,
            l2_penalty: 1e-4,
        }
    }
}

/// Per-column z-score scaling learned from the training set
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    means: Array1<f64>,
    scales: Array1<f64>,
}

impl Standardizer {
    /// Learn column means and standard deviations. Constant columns get a scale of 1.
    pub fn fit(features: ArrayView2<f64>) -> ScoringResult<Self> {
        if features.ncols() == 0 {
            return Err(ScoringError::Training("no feature columns".to_string()));
        }
        let means = features
            .mean_axis(Axis(0))
            .ok_or_else(|| ScoringError::Training("no training rows".to_string()))?;
        let scales = features
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s.is_finite() && s >= 1e-12 { s } else { 1.0 });

        Ok(Self { means, scales })
    }

    pub fn width(&self) -> usize {
        self.means.len()
    }

    pub fn transform(&self, row: ArrayView1<f64>) -> Array1<f64> {
        (&row - &self.means) / &self.scales
    }

    /// Scale every row of a feature matrix
    pub fn transform_rows(&self, features: ArrayView2<f64>) -> Array2<f64> {
        (&features - &self.means) / &self.scales
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Fitted logistic regression model. Immutable after [`LogisticModel::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    standardizer: Standardizer,
    weights: Array1<f64>,
    bias: f64,
}

impl LogisticModel {
    /// Fit by full-batch gradient descent on the log loss.
    ///
    /// `targets` holds 1.0 for the positive class and 0.0 otherwise.
    pub fn fit(
        features: &Array2<f64>,
        targets: &Array1<f64>,
        params: &FitParams,
    ) -> ScoringResult<Self> {
        if features.nrows() != targets.len() {
            return Err(ScoringError::Training(format!(
                "{} rows but {} targets",
                features.nrows(),
                targets.len()
            )));
        }
        if params.epochs == 0 || !params.learning_rate.is_finite() || params.learning_rate <= 0.0 {
            return Err(ScoringError::Training(
                "epochs and learning rate must be positive".to_string(),
            ));
        }

        let standardizer = Standardizer::fit(features.view())?;
        let scaled = standardizer.transform_rows(features.view());
        let n = scaled.nrows() as f64;

        let mut weights = Array1::<f64>::zeros(standardizer.width());
        let mut bias = 0.0;

        for _ in 0..params.epochs {
            let error = (scaled.dot(&weights) + bias).mapv(sigmoid) - targets;
            let grad = scaled.t().dot(&error) / n + &weights * params.l2_penalty;
            weights.scaled_add(-params.learning_rate, &grad);
            bias -= params.learning_rate * error.sum() / n;
        }

        Ok(Self {
            standardizer,
            weights,
            bias,
        })
    }

    pub fn feature_count(&self) -> usize {
        self.weights.len()
    }

    /// Weights in standardized feature space, in column order
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Probability of the positive class
    pub fn predict_proba(&self, features: &[f64]) -> ScoringResult<f64> {
        if features.len() != self.feature_count() {
            return Err(ScoringError::invalid(
                "features",
                format!("expected {} values, got {}", self.feature_count(), features.len()),
            ));
        }
        let scaled = self.standardizer.transform(ArrayView1::from(features));
        Ok(sigmoid(self.weights.dot(&scaled) + self.bias).clamp(0.0, 1.0))
    }

    /// Class label (probability >= 0.5) and the positive-class probability
    pub fn predict(&self, features: &[f64]) -> ScoringResult<(bool, f64)> {
        let probability = self.predict_proba(features)?;
        Ok((probability >= 0.5, probability))
    }

    /// Fraction of rows whose predicted label matches its target
    pub fn accuracy(&self, features: &Array2<f64>, targets: &Array1<f64>) -> ScoringResult<f64> {
        if features.ncols() != self.feature_count() {
            return Err(ScoringError::invalid(
                "features",
                format!("expected {} columns, got {}", self.feature_count(), features.ncols()),
            ));
        }
        if features.nrows() == 0 {
            return Ok(0.0);
        }
        let probabilities = (self.standardizer.transform_rows(features.view()).dot(&self.weights)
            + self.bias)
            .mapv(sigmoid);
        let correct = probabilities
            .iter()
            .zip(targets)
            .filter(|(&p, &y)| (p >= 0.5) == (y >= 0.5))
            .count();
        Ok(correct as f64 / features.nrows() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// One informative column, one constant column
    fn separable() -> (Array2<f64>, Array1<f64>) {
        let features = Array2::from_shape_fn((200, 2), |(i, j)| if j == 0 { i as f64 } else { 5.0 });
        let targets = Array1::from_shape_fn(200, |i| if i >= 100 { 1.0 } else { 0.0 });
        (features, targets)
    }

    #[test]
    fn test_standardizer_handles_constant_columns() {
        let (features, _) = separable();
        let standardizer = Standardizer::fit(features.view()).unwrap();
        let scaled = standardizer.transform(array![99.5, 5.0].view());
        assert!(scaled[0].abs() < 1e-9);
        assert!(scaled[1].abs() < 1e-9);

        let far = standardizer.transform(array![199.0, 6.0].view());
        assert!(far[0] > 1.5);
        // Scale of 1 for the constant column
        assert!((far[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_learns_separable_data() {
        let (features, targets) = separable();
        let model = LogisticModel::fit(&features, &targets, &FitParams::default()).unwrap();

        assert!(model.accuracy(&features, &targets).unwrap() > 0.95);
        assert!(model.weights()[0] > 0.0);

        let (label, p) = model.predict(&[190.0, 5.0]).unwrap();
        assert!(label);
        assert!(p > 0.9);
        let (label, p) = model.predict(&[5.0, 5.0]).unwrap();
        assert!(!label);
        assert!(p < 0.1);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let params = FitParams::default();
        let empty = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            LogisticModel::fit(&empty, &Array1::zeros(0), &params),
            Err(ScoringError::Training(_))
        ));

        let one_row = array![[1.0]];
        assert!(LogisticModel::fit(&one_row, &array![1.0, 0.0], &params).is_err());

        let zero_epochs = FitParams {
            epochs: 0,
            ..params
        };
        assert!(LogisticModel::fit(&one_row, &array![1.0], &zero_epochs).is_err());
    }

    #[test]
    fn test_predict_checks_width() {
        let (features, targets) = separable();
        let model = LogisticModel::fit(&features, &targets, &FitParams::default()).unwrap();
        assert!(matches!(
            model.predict_proba(&[1.0]),
            Err(ScoringError::InvalidInput { .. })
        ));
        assert!(model.accuracy(&Array2::zeros((3, 1)), &Array1::zeros(3)).is_err());
    }

    #[test]
    fn test_sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }
}
