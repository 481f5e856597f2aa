use modeleval_metrics::{
	auc_roc, confusion_matrix, BinaryConfusionMatrix, CrossEntropy, CrossEntropyInput, Metric,
};
use ndarray::prelude::*;
use proptest::collection::vec;
use proptest::prelude::*;

const N_CLASSES: usize = 5;

/// Generate (probabilities, labels) for a multiclass dataset with 1-indexed labels.
fn multiclass_dataset() -> impl Strategy<Value = (Array2<f32>, Array1<usize>)> {
	(1usize..64).prop_flat_map(|n_examples| {
		(
			vec(0.0f32..=1.0, n_examples * N_CLASSES),
			vec(1..=N_CLASSES, n_examples),
		)
			.prop_map(move |(probabilities, labels)| {
				let probabilities =
					Array2::from_shape_vec((n_examples, N_CLASSES), probabilities).unwrap();
				(probabilities, Array1::from(labels))
			})
	})
}

/// Generate (probabilities, labels) for a binary dataset with labels of 0.0 or 1.0.
fn binary_dataset() -> impl Strategy<Value = (Array1<f32>, Array1<f32>)> {
	(1usize..64).prop_flat_map(|n_examples| {
		(
			vec(0.0f32..=1.0, n_examples),
			vec(any::<bool>(), n_examples),
		)
			.prop_map(|(probabilities, labels)| {
				let labels = labels
					.into_iter()
					.map(|label| if label { 1.0 } else { 0.0 })
					.collect::<Vec<f32>>();
				(Array1::from(probabilities), Array1::from(labels))
			})
	})
}

/// Generate a binary dataset together with a random permutation of its example indexes.
fn permuted_binary_dataset() -> impl Strategy<Value = (Array1<f32>, Array1<f32>, Vec<usize>)> {
	binary_dataset().prop_flat_map(|(probabilities, labels)| {
		let indexes: Vec<usize> = (0..labels.len()).collect();
		(Just(probabilities), Just(labels), Just(indexes).prop_shuffle())
	})
}

proptest! {
	#[test]
	fn confusion_matrix_counts_every_example((probabilities, labels) in multiclass_dataset()) {
		let confusion_matrix = confusion_matrix(probabilities.view(), labels.view()).unwrap();
		prop_assert_eq!(confusion_matrix.dim(), (N_CLASSES, N_CLASSES));
		prop_assert_eq!(confusion_matrix.sum(), labels.len() as u64);
		// Each column holds the examples of one actual class.
		for (class_index, column) in confusion_matrix.columns().into_iter().enumerate() {
			let n_actual = labels.iter().filter(|label| **label == class_index + 1).count();
			prop_assert_eq!(column.sum(), n_actual as u64);
		}
	}

	#[test]
	fn cross_entropy_of_certain_predictions_is_zero(labels in vec(1..=N_CLASSES, 1..64)) {
		let mut probabilities = Array2::<f32>::zeros((labels.len(), N_CLASSES));
		for (example_index, label) in labels.iter().enumerate() {
			probabilities[(example_index, label - 1)] = 1.0;
		}
		let labels = Array1::from(labels);
		let cross_entropy = CrossEntropy::compute(CrossEntropyInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		})
		.unwrap();
		prop_assert_eq!(cross_entropy, 0.0);
	}

	#[test]
	fn binary_accuracy_matches_counts(
		(probabilities, labels) in binary_dataset(),
		threshold in 0.0f32..=1.0,
	) {
		let confusion_matrix =
			BinaryConfusionMatrix::compute(probabilities.view(), labels.view(), threshold).unwrap();
		let n_examples = labels.len() as u64;
		prop_assert_eq!(confusion_matrix.n_examples(), n_examples);
		let n_correct = confusion_matrix.true_positives + confusion_matrix.true_negatives;
		prop_assert_eq!(confusion_matrix.accuracy(), n_correct as f32 / n_examples as f32);
	}

	#[test]
	fn auc_roc_is_bounded_and_order_independent(
		(probabilities, labels, permutation) in permuted_binary_dataset(),
	) {
		let n_positives = labels.iter().filter(|label| **label == 1.0).count();
		prop_assume!(n_positives > 0 && n_positives < labels.len());
		let auc = auc_roc(probabilities.view(), labels.view()).unwrap();
		prop_assert!((-1e-5..=1.0 + 1e-5).contains(&auc), "auc {} is out of bounds", auc);
		let permuted_probabilities: Array1<f32> =
			permutation.iter().map(|index| probabilities[*index]).collect();
		let permuted_labels: Array1<f32> = permutation.iter().map(|index| labels[*index]).collect();
		let permuted_auc = auc_roc(permuted_probabilities.view(), permuted_labels.view()).unwrap();
		prop_assert_eq!(auc, permuted_auc);
	}
}
