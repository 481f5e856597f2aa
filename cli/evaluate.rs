/*!
This module runs an evaluator over a list of datasets in order and folds each result into a `ModelComparison`. Datasets that fail to load or evaluate are skipped, and so are datasets with no rows.
*/

use anyhow::{format_err, Context, Result};
use modeleval_dataframe::DataFrame;
use modeleval_metrics::{
	BinaryClassificationMetrics, BinaryClassificationMetricsInput,
	BinaryClassificationMetricsOutput, ComparisonMetric, Evaluator, MetricValues, ModelComparison,
	MulticlassClassificationMetrics, MulticlassClassificationMetricsInput,
	MulticlassClassificationMetricsOutput, RegressionMetrics, RegressionMetricsInput,
	RegressionMetricsOutput,
};
use std::path::{Path, PathBuf};

/// A `Task` turns a loaded dataset into the samples its evaluator takes and evaluates them.
pub trait Task {
	type Output: MetricValues;
	fn comparison_metrics(&self) -> &'static [ComparisonMetric];
	fn evaluate_dataframe(&self, dataframe: &DataFrame) -> Result<Self::Output>;
}

pub enum Event<'a, O> {
	Skipped { path: &'a Path, error: anyhow::Error },
	Evaluated { path: &'a Path, output: &'a O },
}

pub fn evaluate<'a, T>(
	task: &T,
	datasets: &'a [PathBuf],
	load: &mut dyn FnMut(&Path) -> Result<DataFrame>,
	handle_event: &mut dyn FnMut(Event<T::Output>),
) -> ModelComparison<&'a Path>
where
	T: Task,
{
	let mut comparison = ModelComparison::new(task.comparison_metrics());
	for path in datasets.iter() {
		let path = path.as_path();
		let output = load(path).and_then(|dataframe| {
			if dataframe.nrows() == 0 {
				return Err(format_err!("no data found"));
			}
			task.evaluate_dataframe(&dataframe)
				.context("failed to evaluate the dataset")
		});
		match output {
			Ok(output) => {
				handle_event(Event::Evaluated {
					path,
					output: &output,
				});
				comparison = comparison.update(path, &output);
			}
			Err(error) => handle_event(Event::Skipped { path, error }),
		}
	}
	comparison
}

impl Task for MulticlassClassificationMetrics {
	type Output = MulticlassClassificationMetricsOutput;

	fn comparison_metrics(&self) -> &'static [ComparisonMetric] {
		Evaluator::comparison_metrics(self)
	}

	fn evaluate_dataframe(&self, dataframe: &DataFrame) -> Result<Self::Output> {
		let samples = dataframe.to_multiclass(self.n_classes())?;
		let output = Evaluator::evaluate(
			self,
			MulticlassClassificationMetricsInput {
				probabilities: samples.probabilities.view(),
				labels: samples.labels.view(),
			},
		)?;
		Ok(output)
	}
}

impl Task for BinaryClassificationMetrics {
	type Output = BinaryClassificationMetricsOutput;

	fn comparison_metrics(&self) -> &'static [ComparisonMetric] {
		Evaluator::comparison_metrics(self)
	}

	fn evaluate_dataframe(&self, dataframe: &DataFrame) -> Result<Self::Output> {
		let samples = dataframe.to_binary()?;
		let output = Evaluator::evaluate(
			self,
			BinaryClassificationMetricsInput {
				probabilities: samples.probabilities.view(),
				labels: samples.labels.view(),
			},
		)?;
		Ok(output)
	}
}

impl Task for RegressionMetrics {
	type Output = RegressionMetricsOutput;

	fn comparison_metrics(&self) -> &'static [ComparisonMetric] {
		Evaluator::comparison_metrics(self)
	}

	fn evaluate_dataframe(&self, dataframe: &DataFrame) -> Result<Self::Output> {
		let samples = dataframe.to_regression()?;
		let output = Evaluator::evaluate(
			self,
			RegressionMetricsInput {
				predictions: samples.predictions.view(),
				labels: samples.labels.view(),
			},
		)?;
		Ok(output)
	}
}

#[cfg(test)]
fn dataframe(columns: &[&[f32]]) -> DataFrame {
	let mut dataframe = DataFrame::new(
		(0..columns.len())
			.map(|column_index| format!("column_{}", column_index))
			.collect(),
	);
	for (column, values) in dataframe.columns.iter_mut().zip(columns.iter()) {
		column.data = values.to_vec();
	}
	dataframe
}

#[cfg(test)]
fn load_in_memory(path: &Path) -> Result<DataFrame> {
	match path.to_str() {
		Some("model_1.csv") => Ok(dataframe(&[&[1.0, 2.0, 4.0], &[2.0, 2.0, 5.0]])),
		Some("model_2.csv") => Ok(dataframe(&[&[1.0, 2.0, 4.0], &[1.0, 2.0, 2.0]])),
		Some("model_3.csv") => Ok(dataframe(&[&[1.0, 2.0, 4.0], &[1.0, 2.0, 5.5]])),
		Some("empty.csv") => Ok(dataframe(&[&[], &[]])),
		Some("ragged.csv") => Ok(dataframe(&[&[1.0, 2.0], &[1.0]])),
		_ => Err(format_err!("failed to open {}", path.display())),
	}
}

#[test]
fn test_evaluate_regression() {
	let datasets: Vec<PathBuf> = ["model_1.csv", "model_2.csv", "model_3.csv"]
		.iter()
		.map(PathBuf::from)
		.collect();
	let mut evaluated = Vec::new();
	let comparison = evaluate(
		&RegressionMetrics,
		&datasets,
		&mut load_in_memory,
		&mut |event| match event {
			Event::Evaluated { path, output } => evaluated.push((path.to_owned(), output.mse)),
			Event::Skipped { path, .. } => panic!("{} was skipped", path.display()),
		},
	);
	assert_eq!(
		evaluated,
		vec![
			(PathBuf::from("model_1.csv"), 2.0 / 3.0),
			(PathBuf::from("model_2.csv"), 4.0 / 3.0),
			(PathBuf::from("model_3.csv"), 0.75),
		]
	);
	let best_model = |metric| comparison.get(metric).unwrap().id.unwrap();
	assert_eq!(
		best_model(ComparisonMetric::MeanSquaredError),
		Path::new("model_1.csv")
	);
	assert_eq!(
		best_model(ComparisonMetric::MeanAbsoluteError),
		Path::new("model_3.csv")
	);
}

#[test]
fn test_skipped_datasets() {
	let datasets: Vec<PathBuf> = ["missing.csv", "empty.csv", "ragged.csv", "model_2.csv"]
		.iter()
		.map(PathBuf::from)
		.collect();
	let mut skipped = Vec::new();
	let mut n_evaluated = 0;
	let comparison = evaluate(
		&RegressionMetrics,
		&datasets,
		&mut load_in_memory,
		&mut |event| match event {
			Event::Evaluated { .. } => n_evaluated += 1,
			Event::Skipped { path, error } => {
				skipped.push(format!("{}: {:#}", path.display(), error))
			}
		},
	);
	assert_eq!(n_evaluated, 1);
	assert_eq!(
		skipped,
		vec![
			"missing.csv: failed to open missing.csv".to_owned(),
			"empty.csv: no data found".to_owned(),
			"ragged.csv: failed to evaluate the dataset: dimension mismatch: 2 actual values but 1 predicted values".to_owned(),
		]
	);
	for best_model in comparison.best_models() {
		assert_eq!(best_model.id, Some(Path::new("model_2.csv")));
	}
}

#[test]
fn test_evaluate_multiclass() {
	let datasets = vec![PathBuf::from("model.csv")];
	let mut load = |_: &Path| -> Result<DataFrame> {
		Ok(dataframe(&[
			&[1.0, 2.0],
			&[0.7, 0.4],
			&[0.3, 0.6],
		]))
	};
	let mut confusion_matrices = Vec::new();
	let comparison = evaluate(
		&MulticlassClassificationMetrics::new(2),
		&datasets,
		&mut load,
		&mut |event| {
			if let Event::Evaluated { output, .. } = event {
				confusion_matrices.push(output.confusion_matrix.clone());
			}
		},
	);
	let expected: ndarray::Array2<u64> = ndarray::arr2(&[[1, 0], [0, 1]]);
	assert_eq!(confusion_matrices, vec![expected]);
	let accuracy = comparison.get(ComparisonMetric::Accuracy).unwrap();
	assert_eq!(accuracy.value, 1.0);
	assert_eq!(accuracy.id, Some(Path::new("model.csv")));
}

#[test]
fn test_evaluate_binary() {
	let datasets = vec![PathBuf::from("model_1.csv"), PathBuf::from("model_2.csv")];
	let mut load = |path: &Path| -> Result<DataFrame> {
		if path == Path::new("model_1.csv") {
			Ok(dataframe(&[&[1.0, 1.0, 0.0, 0.0], &[0.9, 0.4, 0.3, 0.2]]))
		} else {
			Ok(dataframe(&[&[1.0, 1.0, 0.0, 0.0], &[0.9, 0.6, 0.3, 0.2]]))
		}
	};
	let comparison = evaluate(
		&BinaryClassificationMetrics::default(),
		&datasets,
		&mut load,
		&mut |_| {},
	);
	let best_model = |metric| comparison.get(metric).unwrap().id.unwrap();
	assert_eq!(best_model(ComparisonMetric::Accuracy), Path::new("model_2.csv"));
	assert_eq!(best_model(ComparisonMetric::Precision), Path::new("model_1.csv"));
	assert_eq!(best_model(ComparisonMetric::AucRoc), Path::new("model_1.csv"));
}
