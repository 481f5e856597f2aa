use crate::{
	error::{check_dimensions, class_index},
	ComparisonMetric, CrossEntropy, CrossEntropyInput, Error, Evaluator, Metric, MetricValues,
	Result,
};
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// The number of classes assumed when none is configured.
pub const DEFAULT_N_CLASSES: usize = 5;

/// The metric set for multiclass classifiers: cross entropy, accuracy, and the confusion matrix.
#[derive(Clone, Copy, Debug)]
pub struct MulticlassClassificationMetrics {
	n_classes: usize,
}

pub struct MulticlassClassificationMetricsInput<'a> {
	/// (n_examples, n_classes)
	pub probabilities: ArrayView2<'a, f32>,
	/// (n_examples), 1-indexed
	pub labels: ArrayView1<'a, usize>,
}

#[derive(Debug)]
pub struct MulticlassClassificationMetricsOutput {
	pub cross_entropy: f32,
	pub accuracy: f32,
	/// The shape of the confusion matrix is (n_classes x n_classes). It is indexed by (prediction, label).
	pub confusion_matrix: Array2<u64>,
}

impl MulticlassClassificationMetrics {
	pub fn new(n_classes: usize) -> Self {
		Self { n_classes }
	}

	pub fn n_classes(&self) -> usize {
		self.n_classes
	}
}

impl Default for MulticlassClassificationMetrics {
	fn default() -> Self {
		Self::new(DEFAULT_N_CLASSES)
	}
}

impl<'a> Evaluator<'a> for MulticlassClassificationMetrics {
	type Input = MulticlassClassificationMetricsInput<'a>;
	type Output = MulticlassClassificationMetricsOutput;

	fn comparison_metrics(&self) -> &'static [ComparisonMetric] {
		&[ComparisonMetric::CrossEntropy, ComparisonMetric::Accuracy]
	}

	fn evaluate(&self, input: MulticlassClassificationMetricsInput<'a>) -> Result<Self::Output> {
		let MulticlassClassificationMetricsInput {
			probabilities,
			labels,
		} = input;
		check_dimensions(labels.len(), probabilities.nrows())?;
		if probabilities.ncols() != self.n_classes {
			return Err(Error::ClassCountMismatch {
				expected: self.n_classes,
				found: probabilities.ncols(),
			});
		}
		let cross_entropy = CrossEntropy::compute(CrossEntropyInput {
			probabilities,
			labels,
		})?;
		let confusion_matrix = confusion_matrix(probabilities, labels)?;
		let n_examples = confusion_matrix.sum();
		let n_correct: u64 = confusion_matrix.diag().sum();
		let accuracy = n_correct.to_f32().unwrap() / n_examples.to_f32().unwrap();
		Ok(MulticlassClassificationMetricsOutput {
			cross_entropy,
			accuracy,
			confusion_matrix,
		})
	}
}

impl MetricValues for MulticlassClassificationMetricsOutput {
	fn value(&self, metric: ComparisonMetric) -> Option<f32> {
		match metric {
			ComparisonMetric::CrossEntropy => Some(self.cross_entropy),
			ComparisonMetric::Accuracy => Some(self.accuracy),
			_ => None,
		}
	}
}

/// Compute the confusion matrix, indexed by (predicted class, actual class), where the predicted class of each example is the [argmax](fn.argmax.html) of its probabilities.
pub fn confusion_matrix(
	probabilities: ArrayView2<f32>,
	labels: ArrayView1<usize>,
) -> Result<Array2<u64>> {
	check_dimensions(labels.len(), probabilities.nrows())?;
	let n_classes = probabilities.ncols();
	//                                           prediction    label
	//                                               |           |
	//                                               v           v
	let mut confusion_matrix = <Array2<u64>>::zeros((n_classes, n_classes));
	for (probabilities, label) in probabilities.outer_iter().zip(labels.iter()) {
		let label = class_index(*label, n_classes)?;
		let prediction = argmax(probabilities);
		confusion_matrix[(prediction, label)] += 1;
	}
	Ok(confusion_matrix)
}

/// Return the index of the largest probability. Only a strictly greater probability replaces the running maximum, so the first of several tied probabilities wins.
pub fn argmax(probabilities: ArrayView1<f32>) -> usize {
	let mut max_index = 0;
	let mut max_probability = match probabilities.get(0) {
		Some(probability) => *probability,
		None => return 0,
	};
	for (index, probability) in probabilities.iter().enumerate().skip(1) {
		if *probability > max_probability {
			max_probability = *probability;
			max_index = index;
		}
	}
	max_index
}

#[test]
fn test_single_example() {
	let metrics = MulticlassClassificationMetrics::default();
	let labels = arr1(&[1]);
	let probabilities = arr2(&[[1.0, 0.0, 0.0, 0.0, 0.0]]);
	let output = metrics
		.evaluate(MulticlassClassificationMetricsInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		})
		.unwrap();
	let mut expected: Array2<u64> = Array2::zeros((5, 5));
	expected[(0, 0)] = 1;
	assert_eq!(output.confusion_matrix, expected);
	assert_eq!(output.cross_entropy, 0.0);
	assert_eq!(output.accuracy, 1.0);
}

#[test]
fn test_confusion_matrix() {
	let labels = arr1(&[1, 1, 2, 3, 3, 3]);
	let probabilities = arr2(&[
		[0.7, 0.2, 0.1], // correct
		[0.2, 0.7, 0.1], // incorrect
		[0.1, 0.8, 0.1], // correct
		[0.1, 0.1, 0.8], // correct
		[0.5, 0.2, 0.3], // incorrect
		[0.2, 0.2, 0.6], // correct
	]);
	let confusion_matrix = confusion_matrix(probabilities.view(), labels.view()).unwrap();
	let expected: Array2<u64> = arr2(&[[1, 0, 1], [1, 1, 0], [0, 0, 2]]);
	assert_eq!(confusion_matrix, expected);
	assert_eq!(confusion_matrix.sum(), 6);
}

#[test]
fn test_argmax_ties() {
	assert_eq!(argmax(arr1(&[0.4, 0.4, 0.2]).view()), 0);
	assert_eq!(argmax(arr1(&[0.1, 0.3, 0.3, 0.3]).view()), 1);
	assert_eq!(argmax(arr1(&[0.2, 0.2, 0.2, 0.2, 0.2]).view()), 0);
	assert_eq!(argmax(arr1(&[0.1, 0.2, 0.7]).view()), 2);
}

#[test]
fn test_accuracy() {
	let metrics = MulticlassClassificationMetrics::new(3);
	let labels = arr1(&[1, 2, 3, 3]);
	let probabilities = arr2(&[
		[0.8, 0.1, 0.1],
		[0.1, 0.8, 0.1],
		[0.1, 0.8, 0.1],
		[0.1, 0.1, 0.8],
	]);
	let output = metrics
		.evaluate(MulticlassClassificationMetricsInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		})
		.unwrap();
	assert_eq!(output.accuracy, 0.75);
	assert_eq!(output.value(ComparisonMetric::Accuracy), Some(0.75));
	assert_eq!(output.value(ComparisonMetric::MeanSquaredError), None);
}

#[test]
fn test_errors() {
	let metrics = MulticlassClassificationMetrics::default();
	let probabilities = arr2(&[[0.5, 0.5, 0.0, 0.0, 0.0]]);
	let labels = arr1(&[6]);
	let result = metrics.evaluate(MulticlassClassificationMetricsInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	});
	assert_eq!(
		result.unwrap_err(),
		Error::LabelOutOfRange {
			label: 6,
			n_classes: 5
		}
	);
	let probabilities = arr2(&[[0.5, 0.5]]);
	let labels = arr1(&[1]);
	let result = metrics.evaluate(MulticlassClassificationMetricsInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	});
	assert_eq!(
		result.unwrap_err(),
		Error::ClassCountMismatch {
			expected: 5,
			found: 2
		}
	);
	let labels = arr1(&[1, 1]);
	let result = metrics.evaluate(MulticlassClassificationMetricsInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	});
	assert_eq!(
		result.unwrap_err(),
		Error::DimensionMismatch {
			actual: 2,
			predicted: 1
		}
	);
}
