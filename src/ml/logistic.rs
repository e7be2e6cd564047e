//! Binary logistic regression with L2 regularization.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::{MLError, feature_width, sigmoid};

/// Hyperparameters for [`LogisticRegression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionConfig {
    /// Inverse regularization strength.
    pub c: f64,
    /// Upper bound on gradient-descent iterations.
    pub max_iter: usize,
    /// Stop once every gradient component is below this value.
    pub tol: f64,
    /// Learn an (unpenalized) intercept.
    pub fit_intercept: bool,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 200,
            tol: 1e-4,
            fit_intercept: true,
        }
    }
}

/// Binary logistic regression classifier. Class `1` is the positive class.
///
/// Fitting minimizes `0.5 * |w|^2 + C * sum(log_loss)` with full-batch
/// gradient descent. The step size is the inverse of a Lipschitz bound on the
/// gradient, so every step decreases the objective and the result depends
/// only on the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    config: LogisticRegressionConfig,
    weights: Vec<f64>,
    intercept: f64,
    n_features: usize,
    n_iter: usize,
    fitted: bool,
}

impl LogisticRegression {
    pub fn new(config: LogisticRegressionConfig) -> Result<Self> {
        if !(config.c > 0.0) {
            return Err(MLError::InvalidParameter {
                message: format!("C must be positive, got {}", config.c),
            }
            .into());
        }
        if config.max_iter == 0 {
            return Err(MLError::InvalidParameter {
                message: "max_iter must be positive".to_string(),
            }
            .into());
        }
        Ok(Self {
            config,
            weights: Vec::new(),
            intercept: 0.0,
            n_features: 0,
            n_iter: 0,
            fitted: false,
        })
    }

    /// Fit on feature rows `x` with labels `y` in `{0, 1}`.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()> {
        if x.len() != y.len() {
            return Err(MLError::InvalidParameter {
                message: format!("{} rows but {} labels", x.len(), y.len()),
            }
            .into());
        }
        if let Some(label) = y.iter().find(|&&label| label > 1) {
            return Err(MLError::InvalidParameter {
                message: format!("labels must be 0 or 1, got {label}"),
            }
            .into());
        }
        if !(y.contains(&0) && y.contains(&1)) {
            return Err(MLError::InvalidParameter {
                message: "training labels must contain both classes".to_string(),
            }
            .into());
        }
        let n_features = feature_width(x)?;
        let c = self.config.c;
        let intercept_term = if self.config.fit_intercept { 1.0 } else { 0.0 };

        let lipschitz = 1.0
            + 0.25
                * c
                * x.iter()
                    .map(|row| row.iter().map(|v| v * v).sum::<f64>() + intercept_term)
                    .sum::<f64>();
        let step = 1.0 / lipschitz;

        let mut weights = vec![0.0; n_features];
        let mut intercept = 0.0;
        let mut n_iter = 0;
        let mut converged = false;

        while n_iter < self.config.max_iter {
            let mut grad_w = weights.clone();
            let mut grad_b = 0.0;
            for (row, &label) in x.iter().zip(y) {
                let residual = c * (sigmoid(dot(&weights, row) + intercept) - f64::from(label));
                for (g, v) in grad_w.iter_mut().zip(row) {
                    *g += residual * v;
                }
                grad_b += residual;
            }
            if !self.config.fit_intercept {
                grad_b = 0.0;
            }

            let max_grad = grad_w
                .iter()
                .fold(grad_b.abs(), |acc, g| acc.max(g.abs()));
            if max_grad < self.config.tol {
                converged = true;
                break;
            }

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= step * g;
            }
            intercept -= step * grad_b;
            n_iter += 1;
        }

        if converged {
            log::debug!("logistic regression converged after {n_iter} iterations");
        } else {
            log::warn!(
                "logistic regression did not converge within {} iterations",
                self.config.max_iter
            );
        }

        self.weights = weights;
        self.intercept = intercept;
        self.n_features = n_features;
        self.n_iter = n_iter;
        self.fitted = true;
        Ok(())
    }

    /// Signed distance to the decision boundary; positive favours class 1.
    pub fn decision_function(&self, x: &[f64]) -> Result<f64> {
        self.check_input(x)?;
        Ok(dot(&self.weights, x) + self.intercept)
    }

    /// Class probabilities `[P(0), P(1)]`.
    pub fn predict_proba(&self, x: &[f64]) -> Result<[f64; 2]> {
        let positive = sigmoid(self.decision_function(x)?);
        Ok([1.0 - positive, positive])
    }

    /// Most likely class.
    pub fn predict(&self, x: &[f64]) -> Result<u8> {
        Ok(u8::from(self.decision_function(x)? > 0.0))
    }

    fn check_input(&self, x: &[f64]) -> Result<()> {
        if !self.fitted {
            return Err(MLError::NotFitted {
                model: "LogisticRegression".to_string(),
            }
            .into());
        }
        if x.len() != self.n_features {
            return Err(MLError::DimensionMismatch {
                expected: self.n_features,
                actual: x.len(),
            }
            .into());
        }
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Gradient steps taken by the last fit.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
