/*!
This module defines the `Config` struct, which is read from the YAML file passed with `--config`. Every field is optional. Values given on the command line take precedence over values in the config file.
*/

use anyhow::{format_err, Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, serde::Deserialize)]
pub struct Config {
	/// The classification threshold for binary classifiers.
	pub threshold: Option<f32>,
	/// The number of classes for multiclass classifiers.
	pub n_classes: Option<usize>,
	/// The CSV files to evaluate when none are given on the command line.
	pub datasets: Option<Vec<PathBuf>>,
}

pub fn load_config(config_path: Option<&Path>) -> Result<Option<Config>> {
	if let Some(config_path) = config_path {
		let config = std::fs::read_to_string(config_path)
			.with_context(|| format!("failed to read config file {}", config_path.display()))?;
		let config = parse_config(&config)
			.with_context(|| format!("failed to parse config file {}", config_path.display()))?;
		Ok(Some(config))
	} else {
		Ok(None)
	}
}

fn parse_config(config: &str) -> Result<Config> {
	let config: Config = serde_yaml::from_str(config)?;
	if let Some(threshold) = config.threshold {
		check_threshold(threshold)?;
	}
	if let Some(n_classes) = config.n_classes {
		check_n_classes(n_classes)?;
	}
	Ok(config)
}

pub fn check_n_classes(n_classes: usize) -> Result<()> {
	if n_classes == 0 {
		return Err(format_err!("n_classes must be at least 1"));
	}
	Ok(())
}

pub fn check_threshold(threshold: f32) -> Result<()> {
	if !(0.0..=1.0).contains(&threshold) {
		return Err(format_err!(
			"the threshold must be between 0 and 1, but it was {}",
			threshold
		));
	}
	Ok(())
}

#[test]
fn test_parse_config() {
	let config = parse_config(
		r#"
threshold: 0.25
n_classes: 3
datasets:
  - a.csv
  - b.csv
"#,
	)
	.unwrap();
	insta::assert_debug_snapshot!(config, @r###"
 Config {
     threshold: Some(
         0.25,
     ),
     n_classes: Some(
         3,
     ),
     datasets: Some(
         [
             "a.csv",
             "b.csv",
         ],
     ),
 }
 "###);
}

#[test]
fn test_partial_config() {
	let config = parse_config("threshold: 0.75\n").unwrap();
	assert_eq!(config.threshold, Some(0.75));
	assert_eq!(config.n_classes, None);
	assert!(config.datasets.is_none());
}

#[test]
fn test_invalid_config() {
	assert!(parse_config("threshold: 1.5\n").is_err());
	assert!(parse_config("n_classes: 0\n").is_err());
	assert!(parse_config("threshold: high\n").is_err());
	assert!(load_config(Some(Path::new("does_not_exist.yaml"))).is_err());
	assert!(load_config(None).unwrap().is_none());
}

#[test]
fn test_check_n_classes() {
	assert_eq!(
		check_n_classes(0).unwrap_err().to_string(),
		"n_classes must be at least 1"
	);
	assert!(check_n_classes(1).is_ok());
	assert!(check_n_classes(usize::MAX).is_ok());
}
