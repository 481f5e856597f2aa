use crate::{
	error::{check_dimensions, class_index},
	Metric, Result,
};
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// CrossEntropy is the loss function used in multiclass classification. [Learn more](https://en.wikipedia.org/wiki/Cross_entropy#Cross-entropy_loss_function_and_logistic_regression).
///
/// The probabilities are not clamped. If the probability assigned to an example's actual class is zero, the cross entropy is infinite.
pub struct CrossEntropy;

/// The input to [CrossEntropy](struct.CrossEntropy.html).
pub struct CrossEntropyInput<'a> {
	/// (n_examples, n_classes)
	pub probabilities: ArrayView2<'a, f32>,
	/// (n_examples), 1-indexed
	pub labels: ArrayView1<'a, usize>,
}

impl<'a> Metric<'a> for CrossEntropy {
	type Input = CrossEntropyInput<'a>;
	type Output = Result<f32>;

	fn compute(input: CrossEntropyInput<'a>) -> Result<f32> {
		let CrossEntropyInput {
			probabilities,
			labels,
		} = input;
		check_dimensions(labels.len(), probabilities.nrows())?;
		let n_classes = probabilities.ncols();
		let class_indexes = labels
			.iter()
			.map(|label| class_index(*label, n_classes))
			.collect::<Result<Vec<_>>>()?;
		let total = probabilities
			.outer_iter()
			.zip(class_indexes.iter())
			.fold(0.0, |total, (probabilities, class_index)| {
				total - f64::from(probabilities[*class_index]).ln()
			});
		Ok((total / labels.len().to_f64().unwrap()) as f32)
	}
}

#[test]
fn test_certain_predictions() {
	let labels = arr1(&[1, 3, 5]);
	let probabilities = arr2(&[
		[1.0, 0.0, 0.0, 0.0, 0.0],
		[0.0, 0.0, 1.0, 0.0, 0.0],
		[0.0, 0.0, 0.0, 0.0, 1.0],
	]);
	let cross_entropy = CrossEntropy::compute(CrossEntropyInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	})
	.unwrap();
	assert_eq!(cross_entropy, 0.0);
}

#[test]
fn test_cross_entropy() {
	let labels = arr1(&[1, 2]);
	let probabilities = arr2(&[[0.5, 0.5], [0.75, 0.25]]);
	let cross_entropy = CrossEntropy::compute(CrossEntropyInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	})
	.unwrap();
	let expected = -(0.5f64.ln() + 0.25f64.ln()) / 2.0;
	assert!((f64::from(cross_entropy) - expected).abs() < 1e-6);
}

#[test]
fn test_zero_probability_is_infinite() {
	let labels = arr1(&[2]);
	let probabilities = arr2(&[[1.0, 0.0, 0.0, 0.0, 0.0]]);
	let cross_entropy = CrossEntropy::compute(CrossEntropyInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	})
	.unwrap();
	assert!(cross_entropy.is_infinite() && cross_entropy.is_sign_positive());
}

#[test]
fn test_dimension_mismatch() {
	let labels = arr1(&[1, 2]);
	let probabilities = arr2(&[[1.0, 0.0]]);
	let result = CrossEntropy::compute(CrossEntropyInput {
		probabilities: probabilities.view(),
		labels: labels.view(),
	});
	assert_eq!(
		result,
		Err(crate::Error::DimensionMismatch {
			actual: 2,
			predicted: 1
		})
	);
}
