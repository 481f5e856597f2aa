use super::*;
use anyhow::Context;
use std::path::Path;

impl DataFrame {
	pub fn from_path(path: &Path) -> Result<Self> {
		let mut reader = csv::ReaderBuilder::new()
			.trim(csv::Trim::All)
			.from_path(path)
			.with_context(|| format!("failed to open {}", path.display()))?;
		Self::from_csv(&mut reader).with_context(|| format!("failed to read {}", path.display()))
	}

	/// Read a CSV whose first row is a header. Every other cell must be a number.
	pub fn from_csv<R>(reader: &mut csv::Reader<R>) -> Result<Self>
	where
		R: std::io::Read,
	{
		let column_names: Vec<String> = reader
			.headers()?
			.into_iter()
			.map(|column_name| column_name.to_owned())
			.collect();
		let mut dataframe = Self::new(column_names);
		let mut record = csv::ByteRecord::new();
		while reader.read_byte_record(&mut record)? {
			let line = record
				.position()
				.map(|position| position.line())
				.unwrap_or(0);
			for (column_index, (column, value)) in
				dataframe.columns.iter_mut().zip(record.iter()).enumerate()
			{
				let value = lexical::parse::<f32, _>(value).map_err(|_| {
					format_err!(
						"invalid number \"{}\" on line {} in column {}",
						String::from_utf8_lossy(value),
						line,
						column_index + 1
					)
				})?;
				column.data.push(value);
			}
		}
		Ok(dataframe)
	}
}

#[test]
fn test_from_csv() {
	let csv = r#"actual,predicted
1,0.9
0,0.25
1,1e-3
"#;
	let dataframe =
		DataFrame::from_csv(&mut csv::Reader::from_reader(std::io::Cursor::new(csv))).unwrap();
	insta::assert_debug_snapshot!(dataframe, @r###"
 DataFrame {
     columns: [
         NumberColumn {
             name: "actual",
             data: [
                 1.0,
                 0.0,
                 1.0,
             ],
         },
         NumberColumn {
             name: "predicted",
             data: [
                 0.9,
                 0.25,
                 0.001,
             ],
         },
     ],
 }
 "###);
}

#[test]
fn test_header_only() {
	let csv = "actual,predicted\n";
	let dataframe =
		DataFrame::from_csv(&mut csv::Reader::from_reader(std::io::Cursor::new(csv))).unwrap();
	assert_eq!(dataframe.ncols(), 2);
	assert_eq!(dataframe.nrows(), 0);
	let dataframe =
		DataFrame::from_csv(&mut csv::Reader::from_reader(std::io::Cursor::new(""))).unwrap();
	assert_eq!(dataframe.nrows(), 0);
}

#[test]
fn test_invalid_number() {
	let csv = "actual,predicted\n1,0.5\n0,abc\n";
	let error = DataFrame::from_csv(&mut csv::Reader::from_reader(std::io::Cursor::new(csv)))
		.unwrap_err();
	assert_eq!(
		error.to_string(),
		"invalid number \"abc\" on line 3 in column 2"
	);
}

#[test]
fn test_ragged_rows() {
	let csv = "actual,predicted\n1,0.5\n0\n";
	let result = DataFrame::from_csv(&mut csv::Reader::from_reader(std::io::Cursor::new(csv)));
	assert!(result.is_err());
}
