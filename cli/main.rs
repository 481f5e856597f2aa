//! This module contains the main entrypoint to the modeleval cli.

use self::{
	config::{check_n_classes, check_threshold, load_config, Config},
	evaluate::{evaluate, Event, Task},
	report::{BinaryReport, MulticlassReport, RegressionReport, Summary},
};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use modeleval_dataframe::DataFrame;
use modeleval_metrics::{
	BinaryClassificationMetrics, ComparisonMetric, MulticlassClassificationMetrics,
	RegressionMetrics, DEFAULT_N_CLASSES, DEFAULT_THRESHOLD,
};
use std::path::{Path, PathBuf};

mod config;
mod evaluate;
mod report;

#[derive(Parser)]
#[clap(
	about = "Evaluate and compare the outputs of machine learning models.",
	setting = clap::AppSettings::DisableHelpSubcommand,
)]
enum Options {
	#[clap(name = "multiclass")]
	Multiclass(MulticlassOptions),
	#[clap(name = "binary")]
	Binary(BinaryOptions),
	#[clap(name = "regression")]
	Regression(RegressionOptions),
}

#[derive(Parser, Debug)]
#[clap(about = "evaluate multiclass classifiers")]
#[clap(
	long_about = "evaluate multiclass classifiers from .csv files whose rows are the actual class followed by the predicted probability of each class"
)]
struct MulticlassOptions {
	#[clap(help = "the paths to your .csv files, model.csv by default")]
	files: Vec<PathBuf>,
	#[clap(short, long, help = "the path to a config file")]
	config: Option<PathBuf>,
	#[clap(short, long, help = "the number of classes")]
	n_classes: Option<usize>,
}

#[derive(Parser, Debug)]
#[clap(about = "evaluate binary classifiers")]
#[clap(
	long_about = "evaluate binary classifiers from .csv files whose rows are the actual class followed by the predicted probability of the positive class"
)]
struct BinaryOptions {
	#[clap(help = "the paths to your .csv files, model_1.csv model_2.csv model_3.csv by default")]
	files: Vec<PathBuf>,
	#[clap(short, long, help = "the path to a config file")]
	config: Option<PathBuf>,
	#[clap(short, long, help = "the classification threshold")]
	threshold: Option<f32>,
}

#[derive(Parser, Debug)]
#[clap(about = "evaluate regressors")]
#[clap(
	long_about = "evaluate regressors from .csv files whose rows are the actual value followed by the predicted value"
)]
struct RegressionOptions {
	#[clap(help = "the paths to your .csv files, model_1.csv model_2.csv model_3.csv by default")]
	files: Vec<PathBuf>,
	#[clap(short, long, help = "the path to a config file")]
	config: Option<PathBuf>,
}

const DEFAULT_MULTICLASS_DATASETS: &[&str] = &["model.csv"];
const DEFAULT_DATASETS: &[&str] = &["model_1.csv", "model_2.csv", "model_3.csv"];

fn main() {
	let options = Options::parse();
	let result = match options {
		Options::Multiclass(options) => cli_multiclass(options),
		Options::Binary(options) => cli_binary(options),
		Options::Regression(options) => cli_regression(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {:#}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_multiclass(options: MulticlassOptions) -> Result<()> {
	let config = load_config(options.config.as_deref())?;
	let n_classes = options
		.n_classes
		.or_else(|| config.as_ref().and_then(|config| config.n_classes))
		.unwrap_or(DEFAULT_N_CLASSES);
	check_n_classes(n_classes)?;
	let datasets = datasets(options.files, &config, DEFAULT_MULTICLASS_DATASETS);
	let metrics = MulticlassClassificationMetrics::new(n_classes);
	run(&metrics, &datasets, |path, comparison_metrics, output| {
		MulticlassReport::new(path, comparison_metrics, output).to_string()
	});
	Ok(())
}

fn cli_binary(options: BinaryOptions) -> Result<()> {
	let config = load_config(options.config.as_deref())?;
	let threshold = options
		.threshold
		.or_else(|| config.as_ref().and_then(|config| config.threshold))
		.unwrap_or(DEFAULT_THRESHOLD);
	check_threshold(threshold)?;
	let datasets = datasets(options.files, &config, DEFAULT_DATASETS);
	let metrics = BinaryClassificationMetrics::new(threshold);
	run(&metrics, &datasets, |path, comparison_metrics, output| {
		BinaryReport::new(path, comparison_metrics, output).to_string()
	});
	Ok(())
}

fn cli_regression(options: RegressionOptions) -> Result<()> {
	let config = load_config(options.config.as_deref())?;
	let datasets = datasets(options.files, &config, DEFAULT_DATASETS);
	run(&RegressionMetrics, &datasets, |path, comparison_metrics, output| {
		RegressionReport::new(path, comparison_metrics, output).to_string()
	});
	Ok(())
}

/// Evaluate each dataset, print its report to stdout as soon as it is evaluated, and finish with the best model for each metric. Skipped datasets are reported on stderr.
fn run<T>(
	task: &T,
	datasets: &[PathBuf],
	report: impl Fn(&Path, &[ComparisonMetric], &T::Output) -> String,
) where
	T: Task,
{
	let comparison_metrics = task.comparison_metrics();
	let comparison = evaluate(
		task,
		datasets,
		&mut |path| DataFrame::from_path(path),
		&mut |event| match event {
			Event::Skipped { path, error } => {
				eprintln!(
					"{}: skipping {}: {:#}",
					"warning".yellow().bold(),
					path.display(),
					error
				);
			}
			Event::Evaluated { path, output } => {
				println!("{}", report(path, comparison_metrics, output));
			}
		},
	);
	print!("{}", Summary::new(&comparison));
}

/// The datasets given on the command line, or else the ones in the config file, or else the defaults.
fn datasets(files: Vec<PathBuf>, config: &Option<Config>, defaults: &[&str]) -> Vec<PathBuf> {
	if !files.is_empty() {
		return files;
	}
	if let Some(datasets) = config.as_ref().and_then(|config| config.datasets.clone()) {
		return datasets;
	}
	defaults.iter().map(PathBuf::from).collect()
}

#[test]
fn test_datasets() {
	let config = Some(Config {
		datasets: Some(vec![PathBuf::from("a.csv")]),
		..Default::default()
	});
	assert_eq!(
		datasets(vec![PathBuf::from("b.csv")], &config, DEFAULT_DATASETS),
		vec![PathBuf::from("b.csv")]
	);
	assert_eq!(
		datasets(Vec::new(), &config, DEFAULT_DATASETS),
		vec![PathBuf::from("a.csv")]
	);
	assert_eq!(
		datasets(Vec::new(), &None, DEFAULT_MULTICLASS_DATASETS),
		vec![PathBuf::from("model.csv")]
	);
	assert_eq!(datasets(Vec::new(), &None, DEFAULT_DATASETS).len(), 3);
}

#[test]
fn test_parse_options() {
	let options = Options::try_parse_from(&[
		"modeleval",
		"binary",
		"a.csv",
		"b.csv",
		"--threshold",
		"0.3",
	])
	.unwrap();
	match options {
		Options::Binary(options) => {
			assert_eq!(
				options.files,
				vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]
			);
			assert_eq!(options.threshold, Some(0.3));
			assert!(options.config.is_none());
		}
		_ => panic!("expected the binary subcommand"),
	}
	let options =
		Options::try_parse_from(&["modeleval", "multiclass", "--n-classes", "3"]).unwrap();
	match options {
		Options::Multiclass(options) => {
			assert!(options.files.is_empty());
			assert_eq!(options.n_classes, Some(3));
		}
		_ => panic!("expected the multiclass subcommand"),
	}
}

#[test]
fn test_zero_classes_on_the_command_line_is_an_error() {
	let options = MulticlassOptions {
		files: vec![PathBuf::from("does_not_exist.csv")],
		config: None,
		n_classes: Some(0),
	};
	let error = cli_multiclass(options).unwrap_err();
	assert_eq!(error.to_string(), "n_classes must be at least 1");
}
