/*!
This crate loads the CSV files that hold model outputs. A [`DataFrame`](struct.DataFrame.html) is a list of named number columns, one per CSV column, and can be converted into the labels and predictions that each kind of evaluator takes.

Multiclass files hold the actual class in the first column followed by one probability column per class. Binary and regression files hold the actual value in the first column and the predicted value in the second.
*/

use anyhow::{format_err, Result};
use ndarray::prelude::*;
use num_traits::ToPrimitive;

mod load;

#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
	pub columns: Vec<NumberColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumn {
	pub name: String,
	pub data: Vec<f32>,
}

/// The labels and predicted probabilities of a multiclass classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct MulticlassSamples {
	/// (n_examples), 1-indexed
	pub labels: Array1<usize>,
	/// (n_examples, n_classes)
	pub probabilities: Array2<f32>,
}

/// The labels and predicted probabilities of a binary classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BinarySamples {
	pub labels: Array1<f32>,
	pub probabilities: Array1<f32>,
}

/// The actual and predicted values of a regressor.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionSamples {
	pub labels: Array1<f32>,
	pub predictions: Array1<f32>,
}

impl DataFrame {
	pub fn new(column_names: Vec<String>) -> Self {
		let columns = column_names
			.into_iter()
			.map(|name| NumberColumn {
				name,
				data: Vec::new(),
			})
			.collect();
		Self { columns }
	}

	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn nrows(&self) -> usize {
		self.columns
			.first()
			.map(|column| column.data.len())
			.unwrap_or(0)
	}

	/// Interpret the first column as 1-indexed class labels and the next `n_classes` columns as the predicted probability of each class. Any further columns are ignored.
	pub fn to_multiclass(&self, n_classes: usize) -> Result<MulticlassSamples> {
		let n_columns = n_classes
			.checked_add(1)
			.ok_or_else(|| format_err!("too many classes: {}", n_classes))?;
		self.require_columns(n_columns)?;
		let labels = self.columns[0]
			.data
			.iter()
			.enumerate()
			.map(|(row_index, label)| {
				class_label(*label).ok_or_else(|| {
					format_err!(
						"invalid class label {} in row {}, the label must be a positive integer",
						label,
						row_index + 1
					)
				})
			})
			.collect::<Result<Array1<usize>>>()?;
		let probability_columns = &self.columns[1..=n_classes];
		let probabilities = Array2::from_shape_fn(
			(self.nrows(), n_classes),
			|(row_index, class_index)| probability_columns[class_index].data[row_index],
		);
		Ok(MulticlassSamples {
			labels,
			probabilities,
		})
	}

	/// Interpret the first column as labels and the second column as the predicted probability of the positive class.
	pub fn to_binary(&self) -> Result<BinarySamples> {
		let (labels, probabilities) = self.actual_and_predicted()?;
		Ok(BinarySamples {
			labels,
			probabilities,
		})
	}

	/// Interpret the first column as the actual values and the second column as the predicted values.
	pub fn to_regression(&self) -> Result<RegressionSamples> {
		let (labels, predictions) = self.actual_and_predicted()?;
		Ok(RegressionSamples {
			labels,
			predictions,
		})
	}

	fn actual_and_predicted(&self) -> Result<(Array1<f32>, Array1<f32>)> {
		self.require_columns(2)?;
		let actual = Array1::from(self.columns[0].data.clone());
		let predicted = Array1::from(self.columns[1].data.clone());
		Ok((actual, predicted))
	}

	fn require_columns(&self, n_columns: usize) -> Result<()> {
		if self.ncols() < n_columns {
			return Err(format_err!(
				"expected at least {} columns but found {}",
				n_columns,
				self.ncols()
			));
		}
		Ok(())
	}
}

fn class_label(value: f32) -> Option<usize> {
	if value.fract() != 0.0 {
		return None;
	}
	value.to_usize()
}

#[test]
fn test_to_multiclass() {
	let mut dataframe = DataFrame::new(vec![
		"label".to_owned(),
		"p1".to_owned(),
		"p2".to_owned(),
		"p3".to_owned(),
	]);
	dataframe.columns[0].data = vec![1.0, 3.0];
	dataframe.columns[1].data = vec![0.5, 0.1];
	dataframe.columns[2].data = vec![0.3, 0.2];
	dataframe.columns[3].data = vec![0.2, 0.7];
	let samples = dataframe.to_multiclass(3).unwrap();
	let expected_labels: Array1<usize> = arr1(&[1, 3]);
	assert_eq!(samples.labels, expected_labels);
	let expected_probabilities: Array2<f32> = arr2(&[[0.5, 0.3, 0.2], [0.1, 0.2, 0.7]]);
	assert_eq!(samples.probabilities, expected_probabilities);
	// The extra column is ignored.
	let samples = dataframe.to_multiclass(2).unwrap();
	let expected_probabilities: Array2<f32> = arr2(&[[0.5, 0.3], [0.1, 0.2]]);
	assert_eq!(samples.probabilities, expected_probabilities);
	assert_eq!(
		dataframe.to_multiclass(5).unwrap_err().to_string(),
		"expected at least 6 columns but found 4"
	);
	assert_eq!(
		dataframe.to_multiclass(usize::MAX).unwrap_err().to_string(),
		format!("too many classes: {}", usize::MAX)
	);
}

#[test]
fn test_invalid_class_labels() {
	let mut dataframe = DataFrame::new(vec!["label".to_owned(), "p1".to_owned()]);
	dataframe.columns[0].data = vec![1.0, 1.5];
	dataframe.columns[1].data = vec![1.0, 1.0];
	assert_eq!(
		dataframe.to_multiclass(1).unwrap_err().to_string(),
		"invalid class label 1.5 in row 2, the label must be a positive integer"
	);
	dataframe.columns[0].data = vec![-1.0, 1.0];
	assert!(dataframe.to_multiclass(1).is_err());
	dataframe.columns[0].data = vec![f32::NAN, 1.0];
	assert!(dataframe.to_multiclass(1).is_err());
}

#[test]
fn test_to_binary_and_regression() {
	let mut dataframe = DataFrame::new(vec!["actual".to_owned(), "predicted".to_owned()]);
	dataframe.columns[0].data = vec![1.0, 0.0];
	dataframe.columns[1].data = vec![0.75, 0.25];
	let actual: Array1<f32> = arr1(&[1.0, 0.0]);
	let predicted: Array1<f32> = arr1(&[0.75, 0.25]);
	let samples = dataframe.to_binary().unwrap();
	assert_eq!(samples.labels, actual);
	assert_eq!(samples.probabilities, predicted);
	let samples = dataframe.to_regression().unwrap();
	assert_eq!(samples.labels, actual);
	assert_eq!(samples.predictions, predicted);
	let dataframe = DataFrame::new(vec!["actual".to_owned()]);
	assert!(dataframe.to_binary().is_err());
	assert_eq!(dataframe.nrows(), 0);
}
