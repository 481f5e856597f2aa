/*!
This module tracks which of several models achieved the best value of each metric. Models are compared in the order they are evaluated, with a strict comparison, so when two models tie, the one evaluated first keeps the record.
*/

/// The metrics that models can be compared on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonMetric {
	CrossEntropy,
	BinaryCrossEntropy,
	Accuracy,
	Precision,
	Recall,
	F1,
	AucRoc,
	MeanSquaredError,
	RootMeanSquaredError,
	MeanAbsoluteError,
	MeanAbsoluteRelativeError,
}

/// Whether lower or higher values of a metric are better.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	Minimize,
	Maximize,
}

/// The outputs of an [`Evaluator`](trait.Evaluator.html) implement `MetricValues` so that they can be compared by name.
pub trait MetricValues {
	/// Return the value of `metric`, or `None` if this output does not have it.
	fn value(&self, metric: ComparisonMetric) -> Option<f32>;
}

/// The best value of a single metric seen so far and the model that achieved it.
#[derive(Clone, Debug, PartialEq)]
pub struct BestModel<Id> {
	pub metric: ComparisonMetric,
	pub value: f32,
	/// This is `None` until some model beats the metric's initial value.
	pub id: Option<Id>,
}

/// The best models for each of a set of metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelComparison<Id> {
	best_models: Vec<BestModel<Id>>,
}

impl ComparisonMetric {
	pub fn direction(self) -> Direction {
		match self {
			ComparisonMetric::CrossEntropy
			| ComparisonMetric::BinaryCrossEntropy
			| ComparisonMetric::MeanSquaredError
			| ComparisonMetric::RootMeanSquaredError
			| ComparisonMetric::MeanAbsoluteError
			| ComparisonMetric::MeanAbsoluteRelativeError => Direction::Minimize,
			ComparisonMetric::Accuracy
			| ComparisonMetric::Precision
			| ComparisonMetric::Recall
			| ComparisonMetric::F1
			| ComparisonMetric::AucRoc => Direction::Maximize,
		}
	}

	/// The abbreviation used in reports.
	pub fn short_name(self) -> &'static str {
		match self {
			ComparisonMetric::CrossEntropy => "CE",
			ComparisonMetric::BinaryCrossEntropy => "BCE",
			ComparisonMetric::Accuracy => "Accuracy",
			ComparisonMetric::Precision => "Precision",
			ComparisonMetric::Recall => "Recall",
			ComparisonMetric::F1 => "F1",
			ComparisonMetric::AucRoc => "AUC ROC",
			ComparisonMetric::MeanSquaredError => "MSE",
			ComparisonMetric::RootMeanSquaredError => "RMSE",
			ComparisonMetric::MeanAbsoluteError => "MAE",
			ComparisonMetric::MeanAbsoluteRelativeError => "MARE",
		}
	}
}

impl std::fmt::Display for ComparisonMetric {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			ComparisonMetric::CrossEntropy => "Cross Entropy",
			ComparisonMetric::BinaryCrossEntropy => "Binary Cross Entropy",
			ComparisonMetric::Accuracy => "Accuracy",
			ComparisonMetric::Precision => "Precision",
			ComparisonMetric::Recall => "Recall",
			ComparisonMetric::F1 => "F1 Score",
			ComparisonMetric::AucRoc => "Area Under the ROC Curve",
			ComparisonMetric::MeanSquaredError => "Mean Squared Error",
			ComparisonMetric::RootMeanSquaredError => "Root Mean Squared Error",
			ComparisonMetric::MeanAbsoluteError => "Mean Absolute Error",
			ComparisonMetric::MeanAbsoluteRelativeError => "Mean Absolute Relative Error",
		};
		write!(f, "{}", s)
	}
}

impl Direction {
	/// The value every model has to beat. For maximized metrics this is the lower bound of metrics bounded to [0, 1].
	pub fn initial_value(self) -> f32 {
		match self {
			Direction::Minimize => f32::INFINITY,
			Direction::Maximize => 0.0,
		}
	}

	/// Return true if `value` is strictly better than `best`. `NaN` is never better.
	pub fn is_better(self, value: f32, best: f32) -> bool {
		match self {
			Direction::Minimize => value < best,
			Direction::Maximize => value > best,
		}
	}
}

impl<Id> BestModel<Id> {
	pub fn new(metric: ComparisonMetric) -> Self {
		Self {
			metric,
			value: metric.direction().initial_value(),
			id: None,
		}
	}

	pub fn update(self, id: Id, value: f32) -> Self {
		if self.metric.direction().is_better(value, self.value) {
			Self {
				metric: self.metric,
				value,
				id: Some(id),
			}
		} else {
			self
		}
	}
}

impl<Id> ModelComparison<Id>
where
	Id: Clone,
{
	pub fn new(metrics: &[ComparisonMetric]) -> Self {
		let best_models = metrics
			.iter()
			.map(|metric| BestModel::new(*metric))
			.collect();
		Self { best_models }
	}

	/// Fold one model's metric values into the comparison. Metrics that `values` does not have are left unchanged.
	pub fn update<V>(self, id: Id, values: &V) -> Self
	where
		V: MetricValues + ?Sized,
	{
		let best_models = self
			.best_models
			.into_iter()
			.map(|best_model| match values.value(best_model.metric) {
				Some(value) => best_model.update(id.clone(), value),
				None => best_model,
			})
			.collect();
		Self { best_models }
	}

	pub fn best_models(&self) -> &[BestModel<Id>] {
		&self.best_models
	}

	pub fn get(&self, metric: ComparisonMetric) -> Option<&BestModel<Id>> {
		self.best_models
			.iter()
			.find(|best_model| best_model.metric == metric)
	}
}

#[cfg(test)]
struct Values(Vec<(ComparisonMetric, f32)>);

#[cfg(test)]
impl MetricValues for Values {
	fn value(&self, metric: ComparisonMetric) -> Option<f32> {
		self.0
			.iter()
			.find(|(m, _)| *m == metric)
			.map(|(_, value)| *value)
	}
}

#[test]
fn test_first_model_wins_ties() {
	let best_model = [("A", 0.5), ("B", 0.3), ("C", 0.3)].iter().fold(
		BestModel::new(ComparisonMetric::MeanSquaredError),
		|best_model, (id, value)| best_model.update(*id, *value),
	);
	insta::assert_debug_snapshot!(best_model, @r###"
 BestModel {
     metric: MeanSquaredError,
     value: 0.3,
     id: Some(
         "B",
     ),
 }
 "###);
}

#[test]
fn test_maximize() {
	let best_model = [("A", 0.5), ("B", 0.75), ("C", 0.75), ("D", 0.25)]
		.iter()
		.fold(
			BestModel::new(ComparisonMetric::Accuracy),
			|best_model, (id, value)| best_model.update(*id, *value),
		);
	assert_eq!(best_model.id, Some("B"));
	assert_eq!(best_model.value, 0.75);
}

#[test]
fn test_initial_values() {
	// No model beats the initial value, so no model is chosen.
	let best_model = BestModel::new(ComparisonMetric::Precision).update("A", 0.0);
	assert_eq!(best_model.id, None);
	let best_model = BestModel::new(ComparisonMetric::MeanAbsoluteError).update("A", f32::INFINITY);
	assert_eq!(best_model.id, None);
	let best_model = BestModel::new(ComparisonMetric::MeanAbsoluteError).update("A", 1e30);
	assert_eq!(best_model.id, Some("A"));
}

#[test]
fn test_nan_never_wins() {
	let best_model = BestModel::new(ComparisonMetric::F1)
		.update("A", f32::NAN)
		.update("B", 0.1)
		.update("C", f32::NAN);
	assert_eq!(best_model.id, Some("B"));
	let best_model = BestModel::new(ComparisonMetric::CrossEntropy).update("A", f32::NAN);
	assert_eq!(best_model.id, None);
	assert_eq!(best_model.value, f32::INFINITY);
}

#[test]
fn test_model_comparison() {
	let comparison = ModelComparison::new(&[
		ComparisonMetric::MeanSquaredError,
		ComparisonMetric::Accuracy,
	]);
	let comparison = comparison
		.update(
			"model_1.csv",
			&Values(vec![
				(ComparisonMetric::MeanSquaredError, 2.0),
				(ComparisonMetric::Accuracy, 0.5),
			]),
		)
		.update(
			"model_2.csv",
			&Values(vec![
				(ComparisonMetric::MeanSquaredError, 1.0),
				(ComparisonMetric::Accuracy, 0.25),
			]),
		)
		.update(
			"model_3.csv",
			&Values(vec![(ComparisonMetric::Accuracy, 0.75)]),
		);
	let mse = comparison.get(ComparisonMetric::MeanSquaredError).unwrap();
	assert_eq!(mse.id, Some("model_2.csv"));
	assert_eq!(mse.value, 1.0);
	let accuracy = comparison.get(ComparisonMetric::Accuracy).unwrap();
	assert_eq!(accuracy.id, Some("model_3.csv"));
	assert!(comparison.get(ComparisonMetric::F1).is_none());
	assert_eq!(comparison.best_models().len(), 2);
}

#[test]
fn test_directions() {
	assert_eq!(
		ComparisonMetric::CrossEntropy.direction(),
		Direction::Minimize
	);
	assert_eq!(ComparisonMetric::AucRoc.direction(), Direction::Maximize);
	assert_eq!(
		ComparisonMetric::MeanAbsoluteRelativeError.direction(),
		Direction::Minimize
	);
	assert_eq!(ComparisonMetric::Recall.direction(), Direction::Maximize);
}
