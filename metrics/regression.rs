use crate::{error::check_dimensions, ComparisonMetric, Evaluator, MetricValues, Result};
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// The metric set for regressors: mean squared error, its root, mean absolute error, and mean absolute relative error.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegressionMetrics;

pub struct RegressionMetricsInput<'a> {
	pub predictions: ArrayView1<'a, f32>,
	pub labels: ArrayView1<'a, f32>,
}

#[derive(Debug)]
pub struct RegressionMetricsOutput {
	pub mse: f32,
	pub rmse: f32,
	pub mae: f32,
	pub mare: f32,
}

impl<'a> Evaluator<'a> for RegressionMetrics {
	type Input = RegressionMetricsInput<'a>;
	type Output = RegressionMetricsOutput;

	fn comparison_metrics(&self) -> &'static [ComparisonMetric] {
		&[
			ComparisonMetric::MeanSquaredError,
			ComparisonMetric::RootMeanSquaredError,
			ComparisonMetric::MeanAbsoluteError,
			ComparisonMetric::MeanAbsoluteRelativeError,
		]
	}

	fn evaluate(&self, input: RegressionMetricsInput<'a>) -> Result<Self::Output> {
		let RegressionMetricsInput {
			predictions,
			labels,
		} = input;
		let mse = mean_squared_error(predictions, labels)?;
		Ok(RegressionMetricsOutput {
			mse,
			rmse: mse.sqrt(),
			mae: mean_absolute_error(predictions, labels)?,
			mare: mean_absolute_relative_error(predictions, labels)?,
		})
	}
}

impl MetricValues for RegressionMetricsOutput {
	fn value(&self, metric: ComparisonMetric) -> Option<f32> {
		match metric {
			ComparisonMetric::MeanSquaredError => Some(self.mse),
			ComparisonMetric::RootMeanSquaredError => Some(self.rmse),
			ComparisonMetric::MeanAbsoluteError => Some(self.mae),
			ComparisonMetric::MeanAbsoluteRelativeError => Some(self.mare),
			_ => None,
		}
	}
}

pub fn mean_squared_error(predictions: ArrayView1<f32>, labels: ArrayView1<f32>) -> Result<f32> {
	mean_error(predictions, labels, |prediction, label| {
		(prediction - label).powi(2)
	})
}

pub fn mean_absolute_error(predictions: ArrayView1<f32>, labels: ArrayView1<f32>) -> Result<f32> {
	mean_error(predictions, labels, |prediction, label| {
		(prediction - label).abs()
	})
}

/**
Compute the mean of `|prediction - label| / |label|`.

Examples whose label is zero add nothing to the sum but are still counted in the mean, so a dataset with zero labels has a lower error than the same dataset with those examples removed.
*/
pub fn mean_absolute_relative_error(
	predictions: ArrayView1<f32>,
	labels: ArrayView1<f32>,
) -> Result<f32> {
	mean_error(predictions, labels, |prediction, label| {
		if label != 0.0 {
			((prediction - label) / label).abs()
		} else {
			0.0
		}
	})
}

fn mean_error(
	predictions: ArrayView1<f32>,
	labels: ArrayView1<f32>,
	error: impl Fn(f64, f64) -> f64,
) -> Result<f32> {
	check_dimensions(labels.len(), predictions.len())?;
	let total = predictions
		.iter()
		.zip(labels.iter())
		.fold(0.0, |total, (prediction, label)| {
			total + error(f64::from(*prediction), f64::from(*label))
		});
	Ok((total / labels.len().to_f64().unwrap()) as f32)
}

#[test]
fn test_regression() {
	let labels = arr1(&[1.0, 2.0, 3.0]);
	let predictions = arr1(&[2.0, 2.0, 5.0]);
	let output = RegressionMetrics
		.evaluate(RegressionMetricsInput {
			predictions: predictions.view(),
			labels: labels.view(),
		})
		.unwrap();
	assert!((output.mse - 5.0 / 3.0).abs() < 1e-6);
	assert!((output.rmse - (5.0f32 / 3.0).sqrt()).abs() < 1e-6);
	assert_eq!(output.mae, 1.0);
	assert!((output.mare - (1.0 + 0.0 + 2.0 / 3.0) / 3.0).abs() < 1e-6);
}

#[test]
fn test_mean_absolute_relative_error() {
	let labels = arr1(&[2.0, 4.0]);
	let predictions = arr1(&[3.0, 2.0]);
	let mare = mean_absolute_relative_error(predictions.view(), labels.view()).unwrap();
	assert_eq!(mare, 0.5);
	let labels = arr1(&[-2.0, -4.0]);
	let predictions = arr1(&[-3.0, -2.0]);
	let mare = mean_absolute_relative_error(predictions.view(), labels.view()).unwrap();
	assert_eq!(mare, 0.5);
}

#[test]
fn test_mean_absolute_relative_error_zero_labels() {
	// The zero labels contribute nothing to the sum but still count toward n.
	let labels = arr1(&[2.0, 0.0, 4.0, 0.0]);
	let predictions = arr1(&[3.0, 1.0, 2.0, 7.0]);
	let mare = mean_absolute_relative_error(predictions.view(), labels.view()).unwrap();
	assert_eq!(mare, 0.25);
}

#[test]
fn test_dimension_mismatch() {
	let labels = arr1(&[1.0, 2.0]);
	let predictions = arr1(&[1.0]);
	let error = crate::Error::DimensionMismatch {
		actual: 2,
		predicted: 1,
	};
	assert_eq!(
		mean_squared_error(predictions.view(), labels.view()),
		Err(error.clone())
	);
	assert_eq!(
		mean_absolute_error(predictions.view(), labels.view()),
		Err(error.clone())
	);
	assert_eq!(
		mean_absolute_relative_error(predictions.view(), labels.view()),
		Err(error.clone())
	);
	let result = RegressionMetrics.evaluate(RegressionMetricsInput {
		predictions: predictions.view(),
		labels: labels.view(),
	});
	assert_eq!(result.unwrap_err(), error);
}
