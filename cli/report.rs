use derive_more::Constructor;
use modeleval_metrics::{
	BinaryClassificationMetricsOutput, ComparisonMetric, MetricValues, ModelComparison,
	MulticlassClassificationMetricsOutput, RegressionMetricsOutput,
};
use modeleval_util::{Align, Table};
use ndarray::prelude::*;
use std::path::Path;

#[derive(Constructor)]
pub struct MulticlassReport<'a> {
	path: &'a Path,
	comparison_metrics: &'a [ComparisonMetric],
	output: &'a MulticlassClassificationMetricsOutput,
}

impl<'a> std::fmt::Display for MulticlassReport<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		writeln!(f, "## Results for {}", self.path.display())?;
		writeln!(f)?;
		let metrics = Metrics::new(self.comparison_metrics, self.output);
		write!(f, "{}", metrics)?;
		writeln!(f)?;
		let class_names: Vec<String> = (1..=self.output.confusion_matrix.nrows())
			.map(|class| class.to_string())
			.collect();
		let confusion_matrix =
			ConfusionMatrix::new(self.output.confusion_matrix.view(), &class_names);
		write!(f, "{}", confusion_matrix)?;
		Ok(())
	}
}

#[derive(Constructor)]
pub struct BinaryReport<'a> {
	path: &'a Path,
	comparison_metrics: &'a [ComparisonMetric],
	output: &'a BinaryClassificationMetricsOutput,
}

impl<'a> std::fmt::Display for BinaryReport<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		writeln!(f, "## Results for {}", self.path.display())?;
		writeln!(f)?;
		writeln!(f, "The threshold is {}.", self.output.threshold)?;
		writeln!(f)?;
		let metrics = Metrics::new(self.comparison_metrics, self.output);
		write!(f, "{}", metrics)?;
		writeln!(f)?;
		// The positive class comes first.
		let class_names = ["1".to_owned(), "0".to_owned()];
		let counts = self.output.confusion_matrix.to_array();
		let confusion_matrix = ConfusionMatrix::new(counts.view(), &class_names);
		write!(f, "{}", confusion_matrix)?;
		Ok(())
	}
}

#[derive(Constructor)]
pub struct RegressionReport<'a> {
	path: &'a Path,
	comparison_metrics: &'a [ComparisonMetric],
	output: &'a RegressionMetricsOutput,
}

impl<'a> std::fmt::Display for RegressionReport<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		writeln!(f, "## Results for {}", self.path.display())?;
		writeln!(f)?;
		let metrics = Metrics::new(self.comparison_metrics, self.output);
		write!(f, "{}", metrics)?;
		Ok(())
	}
}

#[derive(Constructor)]
struct Metrics<'a> {
	comparison_metrics: &'a [ComparisonMetric],
	output: &'a dyn MetricValues,
}

impl<'a> std::fmt::Display for Metrics<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let cells: Vec<[String; 2]> = self
			.comparison_metrics
			.iter()
			.map(|metric| {
				let value = self
					.output
					.value(*metric)
					.map(|value| value.to_string())
					.unwrap_or_else(|| "-".to_owned());
				[metric.to_string(), value]
			})
			.collect();
		let values = Array2::from_shape_fn((cells.len(), 2), |(row_index, column_index)| {
			cells[row_index][column_index].as_str()
		});
		let table = Table::new().values(values.view());
		write!(f, "{}", table)?;
		Ok(())
	}
}

/// The confusion matrix as a grid with one column per actual class and one row per predicted class.
#[derive(Constructor)]
struct ConfusionMatrix<'a> {
	counts: ArrayView2<'a, u64>,
	class_names: &'a [String],
}

impl<'a> std::fmt::Display for ConfusionMatrix<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "### Confusion Matrix")?;
		writeln!(f)?;
		let actual: Vec<String> = self
			.class_names
			.iter()
			.map(|class_name| format!("y={}", class_name))
			.collect();
		let header: Vec<&str> = std::iter::once("")
			.chain(actual.iter().map(|actual| actual.as_str()))
			.collect();
		let align: Vec<Align> = std::iter::once(Align::Left)
			.chain(std::iter::repeat(Align::Right).take(self.class_names.len()))
			.collect();
		let cells = Array2::from_shape_fn(
			(self.counts.nrows(), self.counts.ncols() + 1),
			|(row_index, column_index)| match column_index {
				0 => format!("y^={}", self.class_names[row_index]),
				_ => self.counts[(row_index, column_index - 1)].to_string(),
			},
		);
		let values = cells.map(|cell| cell.as_str());
		let table = Table::new()
			.header(&header)
			.align(&align)
			.values(values.view());
		write!(f, "{}", table)?;
		Ok(())
	}
}

/// The best model for each metric, or "none" if no model beat the metric's initial value.
#[derive(Constructor)]
pub struct Summary<'a> {
	comparison: &'a ModelComparison<&'a Path>,
}

impl<'a> std::fmt::Display for Summary<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "## Best Models")?;
		writeln!(f)?;
		let cells: Vec<[String; 3]> = self
			.comparison
			.best_models()
			.iter()
			.map(|best_model| match best_model.id {
				Some(id) => [
					best_model.metric.short_name().to_owned(),
					id.display().to_string(),
					best_model.value.to_string(),
				],
				None => [
					best_model.metric.short_name().to_owned(),
					"none".to_owned(),
					"-".to_owned(),
				],
			})
			.collect();
		let values = Array2::from_shape_fn((cells.len(), 3), |(row_index, column_index)| {
			cells[row_index][column_index].as_str()
		});
		let table = Table::new()
			.header(&["Metric", "Model", "Value"])
			.values(values.view());
		write!(f, "{}", table)?;
		Ok(())
	}
}

#[test]
fn test_regression_report() {
	let output = RegressionMetricsOutput {
		mse: 0.25,
		rmse: 0.5,
		mae: 0.5,
		mare: 0.125,
	};
	let comparison_metrics = [
		ComparisonMetric::MeanSquaredError,
		ComparisonMetric::RootMeanSquaredError,
		ComparisonMetric::MeanAbsoluteError,
		ComparisonMetric::MeanAbsoluteRelativeError,
	];
	let report = RegressionReport::new(Path::new("model_1.csv"), &comparison_metrics, &output);
	insta::assert_snapshot!(report.to_string().trim_end(), @r###"
 ## Results for model_1.csv

 | Mean Squared Error           | 0.25  |
 | Root Mean Squared Error      | 0.5   |
 | Mean Absolute Error          | 0.5   |
 | Mean Absolute Relative Error | 0.125 |
 "###);
}

#[test]
fn test_binary_report() {
	let output = BinaryClassificationMetricsOutput {
		threshold: 0.5,
		binary_cross_entropy: 0.5,
		confusion_matrix: modeleval_metrics::BinaryConfusionMatrix {
			true_positives: 1,
			false_positives: 0,
			false_negatives: 1,
			true_negatives: 2,
		},
		accuracy: 0.75,
		precision: 1.0,
		recall: 0.5,
		f1_score: 2.0 / 3.0,
		auc_roc: 1.0,
	};
	let comparison_metrics = [
		ComparisonMetric::BinaryCrossEntropy,
		ComparisonMetric::Accuracy,
		ComparisonMetric::Precision,
		ComparisonMetric::Recall,
		ComparisonMetric::F1,
		ComparisonMetric::AucRoc,
	];
	let report = BinaryReport::new(Path::new("model_1.csv"), &comparison_metrics, &output);
	insta::assert_snapshot!(report.to_string().trim_end(), @r###"
 ## Results for model_1.csv

 The threshold is 0.5.

 | Binary Cross Entropy     | 0.5       |
 | Accuracy                 | 0.75      |
 | Precision                | 1         |
 | Recall                   | 0.5       |
 | F1 Score                 | 0.6666667 |
 | Area Under the ROC Curve | 1         |

 ### Confusion Matrix

 |      | y=1 | y=0 |
 |------|-----|-----|
 | y^=1 |   1 |   0 |
 | y^=0 |   1 |   2 |
 "###);
}

#[test]
fn test_multiclass_report() {
	let output = MulticlassClassificationMetricsOutput {
		cross_entropy: 0.5,
		accuracy: 0.75,
		confusion_matrix: arr2(&[[2, 0, 0], [1, 0, 0], [0, 0, 13]]),
	};
	let comparison_metrics = [ComparisonMetric::CrossEntropy, ComparisonMetric::Accuracy];
	let report = MulticlassReport::new(Path::new("model.csv"), &comparison_metrics, &output);
	insta::assert_snapshot!(report.to_string().trim_end(), @r###"
 ## Results for model.csv

 | Cross Entropy | 0.5  |
 | Accuracy      | 0.75 |

 ### Confusion Matrix

 |      | y=1 | y=2 | y=3 |
 |------|-----|-----|-----|
 | y^=1 |   2 |   0 |   0 |
 | y^=2 |   1 |   0 |   0 |
 | y^=3 |   0 |   0 |  13 |
 "###);
}

#[test]
fn test_summary() {
	let comparison = ModelComparison::new(&[
		ComparisonMetric::MeanSquaredError,
		ComparisonMetric::RootMeanSquaredError,
		ComparisonMetric::MeanAbsoluteError,
		ComparisonMetric::MeanAbsoluteRelativeError,
	]);
	let model_1 = RegressionMetricsOutput {
		mse: 1.0,
		rmse: 1.0,
		mae: 0.5,
		mare: f32::NAN,
	};
	let model_2 = RegressionMetricsOutput {
		mse: 0.25,
		rmse: 0.5,
		mae: 0.75,
		mare: f32::NAN,
	};
	let comparison = comparison
		.update(Path::new("model_1.csv"), &model_1)
		.update(Path::new("model_2.csv"), &model_2);
	let summary = Summary::new(&comparison);
	insta::assert_snapshot!(summary.to_string().trim_end(), @r###"
 ## Best Models

 | Metric | Model       | Value |
 |--------|-------------|-------|
 | MSE    | model_2.csv | 0.25  |
 | RMSE   | model_2.csv | 0.5   |
 | MAE    | model_1.csv | 0.5   |
 | MARE   | none        | -     |
 "###);
}
