use crate::{error::check_dimensions, BinaryConfusionMatrix, Result};
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// The number of evenly spaced thresholds, from 0.00 to 1.00 inclusive, at which the ROC curve is computed.
pub const N_ROC_THRESHOLDS: usize = 101;

/// This function computes the area under the receiver operating characteristic curve using the trapezoid method.
///
/// The points are visited in order of increasing threshold, which is the order of decreasing false positive rate, so the raw sum is negative. Its absolute value is returned.
pub fn auc_roc(probabilities: ArrayView1<f32>, labels: ArrayView1<f32>) -> Result<f32> {
	let roc_curve = compute_roc_curve(probabilities, labels)?;
	let area: f32 = roc_curve
		.windows(2)
		.map(|points| {
			let left = &points[0];
			let right = &points[1];
			let dx = right.false_positive_rate - left.false_positive_rate;
			(left.true_positive_rate + right.true_positive_rate) * dx / 2.0
		})
		.sum();
	Ok(area.abs())
}

#[derive(Debug, PartialEq)]
pub struct ROCCurvePoint {
	/// The classification threshold.
	pub threshold: f32,
	/// The true positive rate for all predictions with probability >= threshold.
	pub true_positive_rate: f32,
	/// The false positive rate for all predictions with probability >= threshold.
	pub false_positive_rate: f32,
}

/**
This function computes the ROC curve. The ROC curve plots the false positive rate on the x axis and the true positive rate on the y axis for various classification thresholds.

The curve has [`N_ROC_THRESHOLDS`](constant.N_ROC_THRESHOLDS.html) points, and the confusion matrix is recounted from scratch at each threshold. The rates are `NaN` if there are no actual positives or no actual negatives.
*/
pub fn compute_roc_curve(
	probabilities: ArrayView1<f32>,
	labels: ArrayView1<f32>,
) -> Result<Vec<ROCCurvePoint>> {
	check_dimensions(labels.len(), probabilities.len())?;
	let count_positives = labels.iter().filter(|label| **label == 1.0).count();
	let count_negatives = labels.len() - count_positives;
	let count_positives = count_positives.to_f32().unwrap();
	let count_negatives = count_negatives.to_f32().unwrap();
	let n_steps = (N_ROC_THRESHOLDS - 1).to_f32().unwrap();
	let roc_curve = (0..N_ROC_THRESHOLDS)
		.map(|threshold_index| {
			let threshold = threshold_index.to_f32().unwrap() / n_steps;
			let confusion_matrix = BinaryConfusionMatrix::count(probabilities, labels, threshold);
			ROCCurvePoint {
				threshold,
				true_positive_rate: confusion_matrix.true_positives.to_f32().unwrap()
					/ count_positives,
				false_positive_rate: confusion_matrix.false_positives.to_f32().unwrap()
					/ count_negatives,
			}
		})
		.collect();
	Ok(roc_curve)
}

#[test]
fn test_roc_curve() {
	let labels = arr1(&[1.0, 0.0, 1.0, 0.0]);
	let probabilities = arr1(&[0.8, 0.6, 0.4, 0.2]);
	let roc_curve = compute_roc_curve(probabilities.view(), labels.view()).unwrap();
	assert_eq!(roc_curve.len(), N_ROC_THRESHOLDS);
	let rates = |index: usize| {
		let point = &roc_curve[index];
		(point.false_positive_rate, point.true_positive_rate)
	};
	assert_eq!(rates(0), (1.0, 1.0));
	assert_eq!(rates(20), (1.0, 1.0));
	assert_eq!(rates(21), (0.5, 1.0));
	assert_eq!(rates(40), (0.5, 1.0));
	assert_eq!(rates(41), (0.5, 0.5));
	assert_eq!(rates(61), (0.0, 0.5));
	assert_eq!(rates(81), (0.0, 0.0));
	assert_eq!(rates(100), (0.0, 0.0));
	assert_eq!(roc_curve[0].threshold, 0.0);
	assert_eq!(roc_curve[50].threshold, 0.5);
	assert_eq!(roc_curve[100].threshold, 1.0);
	let auc = auc_roc(probabilities.view(), labels.view()).unwrap();
	assert!(f32::abs(auc - 0.75) < f32::EPSILON);
}

#[test]
fn test_perfect_separation() {
	let labels = arr1(&[1.0, 1.0, 0.0, 0.0]);
	let probabilities = arr1(&[0.9, 0.8, 0.2, 0.1]);
	let auc = auc_roc(probabilities.view(), labels.view()).unwrap();
	assert_eq!(auc, 1.0);
}

#[test]
fn test_inverted_predictions() {
	let labels = arr1(&[0.0, 0.0, 1.0, 1.0]);
	let probabilities = arr1(&[0.9, 0.8, 0.2, 0.1]);
	let auc = auc_roc(probabilities.view(), labels.view()).unwrap();
	assert_eq!(auc, 0.0);
}

#[test]
fn test_single_class_is_nan() {
	let labels = arr1(&[1.0, 1.0]);
	let probabilities = arr1(&[0.9, 0.3]);
	let roc_curve = compute_roc_curve(probabilities.view(), labels.view()).unwrap();
	assert!(roc_curve
		.iter()
		.all(|point| point.false_positive_rate.is_nan()));
	let auc = auc_roc(probabilities.view(), labels.view()).unwrap();
	assert!(auc.is_nan());
}
