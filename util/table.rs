use ndarray::prelude::*;

/**
A `Table` writes a header and a grid of cells as a pipe delimited plain text table. Each column is as wide as its widest cell.

```
use modeleval_util::{Align, Table};
use ndarray::prelude::*;

let values = arr2(&[["MSE", "0.25"], ["MAE", "0.5"]]);
let table = Table::new()
	.header(&["Metric", "Value"])
	.align(&[Align::Left, Align::Right])
	.values(values.view());
assert_eq!(
	table.to_string(),
	"| Metric | Value |\n|--------|-------|\n| MSE    |  0.25 |\n| MAE    |   0.5 |\n"
);
```
*/
/// `'a` is the lifetime of the borrowed slices and view. `'b` is the lifetime of the cells.
pub struct Table<'a, 'b> {
	padding: usize,
	header: Option<&'a [&'b str]>,
	align: Option<&'a [Align]>,
	values: Option<ArrayView2<'a, &'b str>>,
}

/// The alignment of the cells in a column. Columns without an alignment are left aligned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
	Left,
	Right,
}

impl<'a, 'b> Default for Table<'a, 'b> {
	fn default() -> Self {
		Self {
			padding: 1,
			header: None,
			align: None,
			values: None,
		}
	}
}

impl<'a, 'b> Table<'a, 'b> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn header(mut self, header: &'a [&'b str]) -> Self {
		self.header = Some(header);
		self
	}

	pub fn align(mut self, align: &'a [Align]) -> Self {
		self.align = Some(align);
		self
	}

	pub fn values(mut self, values: ArrayView2<'a, &'b str>) -> Self {
		self.values = Some(values);
		self
	}
}

impl<'a, 'b> std::fmt::Display for Table<'a, 'b> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let n_columns = usize::max(
			self.header.map(|header| header.len()).unwrap_or(0),
			self.values.map(|values| values.ncols()).unwrap_or(0),
		);
		let mut column_widths: Vec<usize> = vec![0; n_columns];
		if let Some(header) = self.header {
			for (column_width, value) in column_widths.iter_mut().zip(header.iter()) {
				*column_width = usize::max(*column_width, width(value));
			}
		}
		if let Some(values) = self.values {
			for (column_width, column) in column_widths.iter_mut().zip(values.columns()) {
				for value in column.iter() {
					*column_width = usize::max(*column_width, width(value));
				}
			}
		}
		let align = self.align.unwrap_or(&[]);
		if let Some(header) = self.header {
			let row = Row {
				column_widths: &column_widths,
				padding: self.padding,
				align: &[],
				values: header.iter().copied(),
			};
			writeln!(f, "{}", row)?;
			let line = Line {
				column_widths: &column_widths,
				padding: self.padding,
			};
			writeln!(f, "{}", line)?;
		}
		if let Some(values) = self.values {
			for values in values.rows() {
				let row = Row {
					column_widths: &column_widths,
					padding: self.padding,
					align,
					values: values.iter().copied(),
				};
				writeln!(f, "{}", row)?;
			}
		}
		Ok(())
	}
}

fn width(value: &str) -> usize {
	value.chars().count()
}

struct Line<'a> {
	column_widths: &'a [usize],
	padding: usize,
}

impl<'a> std::fmt::Display for Line<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for column_width in self.column_widths.iter() {
			write!(f, "{}|", "-".repeat(column_width + 2 * self.padding))?;
		}
		Ok(())
	}
}

struct Row<'a, I> {
	column_widths: &'a [usize],
	padding: usize,
	align: &'a [Align],
	values: I,
}

impl<'a, I> std::fmt::Display for Row<'a, I>
where
	I: Iterator + Clone,
	I::Item: AsRef<str>,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let padding = " ".repeat(self.padding);
		write!(f, "|")?;
		for (column_index, (column_width, value)) in self
			.column_widths
			.iter()
			.zip(self.values.clone())
			.enumerate()
		{
			let value = value.as_ref();
			let fill = " ".repeat(column_width - width(value));
			match self.align.get(column_index).copied().unwrap_or(Align::Left) {
				Align::Left => write!(f, "{}{}{}{}|", padding, value, fill, padding)?,
				Align::Right => write!(f, "{}{}{}{}|", padding, fill, value, padding)?,
			}
		}
		Ok(())
	}
}

#[test]
fn test_table() {
	let values = arr2(&[["y^=1", "2", "0"], ["y^=2", "1", "13"]]);
	let table = Table::new()
		.header(&["", "y=1", "y=2"])
		.align(&[Align::Left, Align::Right, Align::Right])
		.values(values.view());
	insta::assert_snapshot!(table.to_string().trim_end(), @r###"
 |      | y=1 | y=2 |
 |------|-----|-----|
 | y^=1 |   2 |   0 |
 | y^=2 |   1 |  13 |
 "###);
}

#[test]
fn test_table_without_header() {
	let values = arr2(&[["Accuracy", "0.75"], ["Precision", "1"]]);
	let table = Table::new().values(values.view());
	insta::assert_snapshot!(table.to_string().trim_end(), @r###"
 | Accuracy  | 0.75 |
 | Precision | 1    |
 "###);
}

#[test]
fn test_table_from_owned_cells() {
	let header = vec!["a".to_owned(), "b".to_owned()];
	let counts = arr2(&[[3u64, 10], [0, 7]]);
	let cells = counts.map(|count| count.to_string());
	let values = cells.map(|cell| cell.as_str());
	let header: Vec<&str> = header.iter().map(|name| name.as_str()).collect();
	let table = Table::new()
		.header(&header)
		.align(&[Align::Right, Align::Right])
		.values(values.view());
	assert_eq!(
		table.to_string(),
		"| a | b  |\n|---|----|\n| 3 | 10 |\n| 0 |  7 |\n"
	);
}

#[test]
fn test_empty_table() {
	assert_eq!(Table::new().to_string(), "");
	let table = Table::new().header(&["Model"]);
	assert_eq!(table.to_string(), "| Model |\n|-------|\n");
}
