use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
	#[error("dimension mismatch: {actual} actual values but {predicted} predicted values")]
	DimensionMismatch { actual: usize, predicted: usize },
	#[error("expected {expected} class probabilities per example but found {found}")]
	ClassCountMismatch { expected: usize, found: usize },
	#[error("class label {label} is out of range for {n_classes} classes")]
	LabelOutOfRange { label: usize, n_classes: usize },
}

pub(crate) fn check_dimensions(actual: usize, predicted: usize) -> Result<()> {
	if actual == predicted {
		Ok(())
	} else {
		Err(Error::DimensionMismatch { actual, predicted })
	}
}

/// Convert a 1-indexed class label to a 0-indexed class index.
pub(crate) fn class_index(label: usize, n_classes: usize) -> Result<usize> {
	match label.checked_sub(1) {
		Some(index) if index < n_classes => Ok(index),
		_ => Err(Error::LabelOutOfRange { label, n_classes }),
	}
}

#[test]
fn test_class_index() {
	assert_eq!(class_index(1, 5), Ok(0));
	assert_eq!(class_index(5, 5), Ok(4));
	assert_eq!(
		class_index(0, 5),
		Err(Error::LabelOutOfRange {
			label: 0,
			n_classes: 5
		})
	);
	assert_eq!(
		class_index(6, 5),
		Err(Error::LabelOutOfRange {
			label: 6,
			n_classes: 5
		})
	);
}

#[test]
fn test_error_message() {
	let error = check_dimensions(3, 2).unwrap_err();
	assert_eq!(
		error.to_string(),
		"dimension mismatch: 3 actual values but 2 predicted values"
	);
}
