/*!
This crate computes evaluation metrics for the outputs of machine learning models. It defines the [`Metric`](trait.Metric.html) trait for single metrics such as [`CrossEntropy`](struct.CrossEntropy.html), the [`Evaluator`](trait.Evaluator.html) trait for the metric sets of multiclass classification, binary classification, and regression, and a [`ModelComparison`](struct.ModelComparison.html) that tracks which model achieved the best value of each metric.

Degenerate inputs are not masked. The log of a zero probability, or a ratio whose denominator is zero, shows up as `NaN` or infinity in the output.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod auc_roc;
mod binary_classification;
mod binary_cross_entropy;
mod comparison;
mod cross_entropy;
mod error;
mod multiclass_classification;
mod regression;

pub use self::auc_roc::{auc_roc, compute_roc_curve, ROCCurvePoint, N_ROC_THRESHOLDS};
pub use self::binary_classification::{
	BinaryClassificationMetrics, BinaryClassificationMetricsInput,
	BinaryClassificationMetricsOutput, BinaryConfusionMatrix, DEFAULT_THRESHOLD,
};
pub use self::binary_cross_entropy::{BinaryCrossEntropy, BinaryCrossEntropyInput};
pub use self::comparison::{BestModel, ComparisonMetric, Direction, MetricValues, ModelComparison};
pub use self::cross_entropy::{CrossEntropy, CrossEntropyInput};
pub use self::error::{Error, Result};
pub use self::multiclass_classification::{
	argmax, confusion_matrix, MulticlassClassificationMetrics,
	MulticlassClassificationMetricsInput, MulticlassClassificationMetricsOutput, DEFAULT_N_CLASSES,
};
pub use self::regression::{
	mean_absolute_error, mean_absolute_relative_error, mean_squared_error, RegressionMetrics,
	RegressionMetricsInput, RegressionMetricsOutput,
};

/**
The `Metric` trait defines a common interface to metrics that are computed when the entire input is available at once.

The seemingly unused generic lifetime `'a` exists here to allow `Input`s and `Output`s to borrow from their enclosing scope.
*/
pub trait Metric<'a> {
	type Input;
	type Output;
	fn compute(input: Self::Input) -> Self::Output;
}

/**
The `Evaluator` trait is implemented by the metric set of each kind of model. An evaluator turns one dataset's actual and predicted values into an `Output` holding every metric for that dataset. The output exposes its values by name through [`MetricValues`](trait.MetricValues.html), which is what allows a single [`ModelComparison`](struct.ModelComparison.html) to rank models of any kind.

# Examples

```
use modeleval_metrics::{Evaluator, ModelComparison, RegressionMetrics, RegressionMetricsInput};
use ndarray::prelude::*;

let evaluator = RegressionMetrics::default();
let labels = arr1(&[1.0, 2.0, 4.0]);
let predictions = arr1(&[1.5, 2.0, 3.0]);
let output = evaluator
	.evaluate(RegressionMetricsInput {
		predictions: predictions.view(),
		labels: labels.view(),
	})
	.unwrap();
let comparison = ModelComparison::new(evaluator.comparison_metrics()).update("model.csv", &output);
assert_eq!(comparison.best_models()[0].id, Some("model.csv"));
```
*/
pub trait Evaluator<'a> {
	/// `Input` holds one dataset's actual and predicted values.
	type Input;
	/// `Output` holds every metric computed for one dataset.
	type Output: MetricValues;
	/// The metrics that models evaluated by this evaluator are compared on, in reporting order.
	fn comparison_metrics(&self) -> &'static [ComparisonMetric];
	/// Compute the metric set. Inputs whose dimensions disagree are rejected before any metric is computed.
	fn evaluate(&self, input: Self::Input) -> Result<Self::Output>;
}
