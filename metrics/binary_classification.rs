use crate::{
	auc_roc, error::check_dimensions, BinaryCrossEntropy, BinaryCrossEntropyInput,
	ComparisonMetric, Evaluator, Metric, MetricValues, Result,
};
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// The classification threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// The metric set for binary classifiers, evaluated at a single operating threshold, plus the area under the ROC curve, which sweeps over all thresholds.
#[derive(Clone, Copy, Debug)]
pub struct BinaryClassificationMetrics {
	threshold: f32,
}

pub struct BinaryClassificationMetricsInput<'a> {
	/// The predicted probability of the positive class for each example.
	pub probabilities: ArrayView1<'a, f32>,
	/// The actual class of each example. An example is positive if its label is exactly 1.0.
	pub labels: ArrayView1<'a, f32>,
}

#[derive(Debug)]
pub struct BinaryClassificationMetricsOutput {
	pub threshold: f32,
	pub binary_cross_entropy: f32,
	pub confusion_matrix: BinaryConfusionMatrix,
	pub accuracy: f32,
	pub precision: f32,
	pub recall: f32,
	pub f1_score: f32,
	pub auc_roc: f32,
}

/// The counts of a binary confusion matrix. The cells are laid out as
///
/// ```text
/// | TP | FP |
/// | FN | TN |
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinaryConfusionMatrix {
	pub true_positives: u64,
	pub false_positives: u64,
	pub false_negatives: u64,
	pub true_negatives: u64,
}

impl BinaryClassificationMetrics {
	pub fn new(threshold: f32) -> Self {
		Self { threshold }
	}

	pub fn threshold(&self) -> f32 {
		self.threshold
	}
}

impl Default for BinaryClassificationMetrics {
	fn default() -> Self {
		Self::new(DEFAULT_THRESHOLD)
	}
}

impl<'a> Evaluator<'a> for BinaryClassificationMetrics {
	type Input = BinaryClassificationMetricsInput<'a>;
	type Output = BinaryClassificationMetricsOutput;

	fn comparison_metrics(&self) -> &'static [ComparisonMetric] {
		&[
			ComparisonMetric::BinaryCrossEntropy,
			ComparisonMetric::Accuracy,
			ComparisonMetric::Precision,
			ComparisonMetric::Recall,
			ComparisonMetric::F1,
			ComparisonMetric::AucRoc,
		]
	}

	fn evaluate(&self, input: BinaryClassificationMetricsInput<'a>) -> Result<Self::Output> {
		let BinaryClassificationMetricsInput {
			probabilities,
			labels,
		} = input;
		check_dimensions(labels.len(), probabilities.len())?;
		let binary_cross_entropy = BinaryCrossEntropy::compute(BinaryCrossEntropyInput {
			probabilities,
			labels,
		})?;
		let confusion_matrix = BinaryConfusionMatrix::count(probabilities, labels, self.threshold);
		let precision = confusion_matrix.precision();
		let recall = confusion_matrix.recall();
		Ok(BinaryClassificationMetricsOutput {
			threshold: self.threshold,
			binary_cross_entropy,
			confusion_matrix,
			accuracy: confusion_matrix.accuracy(),
			precision,
			recall,
			f1_score: f1_score(precision, recall),
			auc_roc: auc_roc(probabilities, labels)?,
		})
	}
}

impl MetricValues for BinaryClassificationMetricsOutput {
	fn value(&self, metric: ComparisonMetric) -> Option<f32> {
		match metric {
			ComparisonMetric::BinaryCrossEntropy => Some(self.binary_cross_entropy),
			ComparisonMetric::Accuracy => Some(self.accuracy),
			ComparisonMetric::Precision => Some(self.precision),
			ComparisonMetric::Recall => Some(self.recall),
			ComparisonMetric::F1 => Some(self.f1_score),
			ComparisonMetric::AucRoc => Some(self.auc_roc),
			_ => None,
		}
	}
}

impl BinaryConfusionMatrix {
	/// Compute the confusion matrix at `threshold`. An example is predicted positive if its probability is greater than or equal to the threshold.
	pub fn compute(
		probabilities: ArrayView1<f32>,
		labels: ArrayView1<f32>,
		threshold: f32,
	) -> Result<Self> {
		check_dimensions(labels.len(), probabilities.len())?;
		Ok(Self::count(probabilities, labels, threshold))
	}

	/// The caller is responsible for checking that the dimensions agree.
	pub(crate) fn count(
		probabilities: ArrayView1<f32>,
		labels: ArrayView1<f32>,
		threshold: f32,
	) -> Self {
		let mut confusion_matrix = Self::default();
		for (probability, label) in probabilities.iter().zip(labels.iter()) {
			let predicted_positive = *probability >= threshold;
			let actual_positive = *label == 1.0;
			match (predicted_positive, actual_positive) {
				(true, true) => confusion_matrix.true_positives += 1,
				(true, false) => confusion_matrix.false_positives += 1,
				(false, true) => confusion_matrix.false_negatives += 1,
				(false, false) => confusion_matrix.true_negatives += 1,
			}
		}
		confusion_matrix
	}

	pub fn n_examples(&self) -> u64 {
		self.true_positives + self.false_positives + self.false_negatives + self.true_negatives
	}

	pub fn accuracy(&self) -> f32 {
		(self.true_positives + self.true_negatives).to_f32().unwrap()
			/ self.n_examples().to_f32().unwrap()
	}

	/// This is `NaN` if no example was predicted positive.
	pub fn precision(&self) -> f32 {
		self.true_positives.to_f32().unwrap()
			/ (self.true_positives + self.false_positives).to_f32().unwrap()
	}

	/// This is `NaN` if no example is actually positive.
	pub fn recall(&self) -> f32 {
		self.true_positives.to_f32().unwrap()
			/ (self.true_positives + self.false_negatives).to_f32().unwrap()
	}

	pub fn f1_score(&self) -> f32 {
		f1_score(self.precision(), self.recall())
	}

	/// (prediction, label), with the positive class first.
	pub fn to_array(&self) -> Array2<u64> {
		arr2(&[
			[self.true_positives, self.false_positives],
			[self.false_negatives, self.true_negatives],
		])
	}
}

fn f1_score(precision: f32, recall: f32) -> f32 {
	2.0 * (precision * recall) / (precision + recall)
}

#[test]
fn test_binary_classification() {
	let metrics = BinaryClassificationMetrics::default();
	let labels = arr1(&[1.0, 1.0, 0.0, 0.0]);
	let probabilities = arr1(&[0.9, 0.4, 0.3, 0.2]);
	let output = metrics
		.evaluate(BinaryClassificationMetricsInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		})
		.unwrap();
	insta::assert_debug_snapshot!(output.confusion_matrix, @r###"
 BinaryConfusionMatrix {
     true_positives: 1,
     false_positives: 0,
     false_negatives: 1,
     true_negatives: 2,
 }
 "###);
	assert_eq!(output.accuracy, 0.75);
	assert_eq!(output.precision, 1.0);
	assert_eq!(output.recall, 0.5);
	assert!((output.f1_score - 2.0 / 3.0).abs() < 1e-6);
	assert_eq!(output.auc_roc, 1.0);
	assert_eq!(output.value(ComparisonMetric::F1), Some(output.f1_score));
}

#[test]
fn test_threshold_is_inclusive() {
	let labels = arr1(&[1.0, 0.0, 1.0]);
	let probabilities = arr1(&[0.5, 0.5, 0.49]);
	let confusion_matrix =
		BinaryConfusionMatrix::compute(probabilities.view(), labels.view(), 0.5).unwrap();
	assert_eq!(
		confusion_matrix,
		BinaryConfusionMatrix {
			true_positives: 1,
			false_positives: 1,
			false_negatives: 1,
			true_negatives: 0,
		}
	);
	let expected: Array2<u64> = arr2(&[[1, 1], [1, 0]]);
	assert_eq!(confusion_matrix.to_array(), expected);
}

#[test]
fn test_accuracy_matches_counts() {
	let labels = arr1(&[1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0]);
	let probabilities = arr1(&[0.8, 0.7, 0.1, 0.2, 0.65, 0.55, 0.45]);
	for &threshold in &[0.0, 0.3, 0.5, 0.6, 0.9, 1.0] {
		let confusion_matrix =
			BinaryConfusionMatrix::compute(probabilities.view(), labels.view(), threshold).unwrap();
		assert_eq!(confusion_matrix.n_examples(), 7);
		let n_correct = confusion_matrix.true_positives + confusion_matrix.true_negatives;
		assert_eq!(confusion_matrix.accuracy(), n_correct as f32 / 7.0);
	}
}

#[test]
fn test_degenerate_ratios_are_nan() {
	// Nothing is predicted positive, so precision and f1 are undefined.
	let labels = arr1(&[1.0, 0.0]);
	let probabilities = arr1(&[0.1, 0.2]);
	let confusion_matrix =
		BinaryConfusionMatrix::compute(probabilities.view(), labels.view(), 0.5).unwrap();
	assert!(confusion_matrix.precision().is_nan());
	assert_eq!(confusion_matrix.recall(), 0.0);
	assert!(confusion_matrix.f1_score().is_nan());
	// Nothing is actually positive, so recall is undefined.
	let labels = arr1(&[0.0, 0.0]);
	let probabilities = arr1(&[0.9, 0.2]);
	let confusion_matrix =
		BinaryConfusionMatrix::compute(probabilities.view(), labels.view(), 0.5).unwrap();
	assert_eq!(confusion_matrix.precision(), 0.0);
	assert!(confusion_matrix.recall().is_nan());
}

#[test]
fn test_dimension_mismatch() {
	let metrics = BinaryClassificationMetrics::new(0.3);
	let labels = arr1(&[1.0, 0.0]);
	let probabilities = arr1(&[0.9]);
	let result = metrics.evaluate(BinaryClassificationMetricsInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	});
	assert_eq!(
		result.unwrap_err(),
		crate::Error::DimensionMismatch {
			actual: 2,
			predicted: 1
		}
	);
}
