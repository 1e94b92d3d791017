use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

#[derive(clap::Args, Clone, Debug, Default)]
pub struct Output {
    /// How to format CLI output
    #[clap(global = true, short, long, value_enum)]
    pub output: Option<OutputType>,
}

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq)]
pub enum OutputType {
    /// Format output as compact JSON with items separated by newlines
    Json,
    /// Format output as YAML
    Yaml,
    /// Format the output as a pretty-printed table
    Table,
}

/// Things which can be output from the CLI as either JSON, YAML, or a table.
/// JSON and YAML use the resource's own wire encoding, so the body of this
/// trait is about tables.
pub trait CliOutput: Serialize {
    /// Alternate representation of table output, such as the wider table of
    /// `clusters describe`. `type TableAlt = ();` opts out.
    type TableAlt: Copy;
    /// The type output from `into_table_row`, typically `JsonCell`.
    type CellValue: Into<comfy_table::Cell>;

    /// Returns the column headers of the table.
    fn table_headers(alt: Self::TableAlt) -> Vec<&'static str>;

    /// Converts this item into a row, with cells in the order of `table_headers`.
    fn into_table_row(self, alt: Self::TableAlt) -> Vec<Self::CellValue>;
}

pub fn print_yaml(items: impl IntoIterator<Item = impl CliOutput>) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    for item in items {
        serde_yaml::to_writer(&mut stdout, &item)?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

pub fn print_json(items: impl IntoIterator<Item = impl CliOutput>) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    for item in items {
        serde_json::to_writer(&mut stdout, &item)?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

pub fn print_table<T: CliOutput>(
    alt: T::TableAlt,
    items: impl IntoIterator<Item = T>,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    let table = render_table(alt, items);

    for line in table.lines() {
        stdout.write_all(line.as_bytes())?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

pub fn render_table<T: CliOutput>(
    alt: T::TableAlt,
    items: impl IntoIterator<Item = T>,
) -> comfy_table::Table {
    let mut table = crate::new_table(T::table_headers(alt));
    for item in items {
        table.add_row(item.into_table_row(alt));
    }
    table
}

/// Converts an item implementing `Serialize` into a table row by extracting values
/// using the given list of JSON `pointers`. This function is often used to implement
/// `CliOutput::into_table_row`.
pub fn to_table_row<T: Serialize>(value: T, pointers: &[&str]) -> Vec<JsonCell> {
    let mut json = serde_json::to_value(value).unwrap_or_default();

    let mut row = Vec::with_capacity(pointers.len());
    for column in pointers {
        let val = json.pointer_mut(column).map(Value::take);
        row.push(JsonCell(val));
    }
    row
}

/// A wrapper around an `Option<Value>` to allow it to be converted into a table cell.
pub struct JsonCell(pub Option<Value>);

impl From<String> for JsonCell {
    fn from(value: String) -> Self {
        JsonCell(Some(Value::String(value)))
    }
}

impl From<JsonCell> for comfy_table::Cell {
    fn from(cell: JsonCell) -> Self {
        match cell.0 {
            None => comfy_table::Cell::new(String::new()),
            Some(Value::String(s)) => comfy_table::Cell::new(s),
            Some(other) => comfy_table::Cell::new(other),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_pointer_rows() {
        let row = to_table_row(
            json!({"id": "abc", "state": "ready", "region": {"id": "us-east-1"}, "multi_az": true}),
            &["/id", "/region/id", "/multi_az", "/missing"],
        );
        let cells: Vec<_> = row.into_iter().map(|cell| cell.0).collect();

        assert_eq!(
            cells,
            vec![
                Some(json!("abc")),
                Some(json!("us-east-1")),
                Some(json!(true)),
                None
            ]
        );
    }
}
