use crate::{error::check_dimensions, Metric, Result};
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// BinaryCrossEntropy is the loss function used for binary classification. [Learn more](https://en.wikipedia.org/wiki/Cross_entropy#Cross-entropy_loss_function_and_logistic_regression).
///
/// Binary cross entropy is undefined when a probability is exactly 0 or 1. The probabilities are not clamped, so such inputs produce `NaN` or infinity.
pub struct BinaryCrossEntropy;

/// The input to [BinaryCrossEntropy](struct.BinaryCrossEntropy.html).
pub struct BinaryCrossEntropyInput<'a> {
	/// The predicted probability of the positive class for each example.
	pub probabilities: ArrayView1<'a, f32>,
	/// The actual class of each example, 1.0 for the positive class and 0.0 for the negative class.
	pub labels: ArrayView1<'a, f32>,
}

impl<'a> Metric<'a> for BinaryCrossEntropy {
	type Input = BinaryCrossEntropyInput<'a>;
	type Output = Result<f32>;

	fn compute(input: BinaryCrossEntropyInput<'a>) -> Result<f32> {
		let BinaryCrossEntropyInput {
			probabilities,
			labels,
		} = input;
		check_dimensions(labels.len(), probabilities.len())?;
		let total = probabilities
			.iter()
			.zip(labels.iter())
			.fold(0.0, |total, (probability, label)| {
				let probability = f64::from(*probability);
				let label = f64::from(*label);
				total - (label * probability.ln() + (1.0 - label) * (1.0 - probability).ln())
			});
		Ok((total / labels.len().to_f64().unwrap()) as f32)
	}
}

#[test]
fn test_binary_cross_entropy() {
	let labels = arr1(&[1.0, 0.0]);
	let probabilities = arr1(&[0.75, 0.5]);
	let binary_cross_entropy = BinaryCrossEntropy::compute(BinaryCrossEntropyInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	})
	.unwrap();
	let expected = -(0.75f64.ln() + 0.5f64.ln()) / 2.0;
	assert!((f64::from(binary_cross_entropy) - expected).abs() < 1e-6);
}

#[test]
fn test_certain_probabilities_are_not_clamped() {
	// 0 * ln(0) is NaN.
	let labels = arr1(&[1.0]);
	let probabilities = arr1(&[1.0]);
	let binary_cross_entropy = BinaryCrossEntropy::compute(BinaryCrossEntropyInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	})
	.unwrap();
	assert!(binary_cross_entropy.is_nan());
	// A confident wrong prediction is infinitely bad.
	let labels = arr1(&[1.0]);
	let probabilities = arr1(&[0.0]);
	let binary_cross_entropy = BinaryCrossEntropy::compute(BinaryCrossEntropyInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	})
	.unwrap();
	assert!(binary_cross_entropy.is_infinite());
}

#[test]
fn test_dimension_mismatch() {
	let labels = arr1(&[1.0, 0.0, 1.0]);
	let probabilities = arr1(&[0.5, 0.5]);
	let result = BinaryCrossEntropy::compute(BinaryCrossEntropyInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	});
	assert_eq!(
		result,
		Err(crate::Error::DimensionMismatch {
			actual: 3,
			predicted: 2
		})
	);
}
