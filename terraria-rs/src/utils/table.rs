//! Tables for world listings

use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
use prettytable::{Cell, Row, Table};

/// An empty table with bold `headers` and a rule under them.
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(
        FormatBuilder::new()
            .column_separator(' ')
            .separator(LinePosition::Title, LineSeparator::new('-', ' ', ' ', ' '))
            .padding(1, 1)
            .build(),
    );
    table.set_titles(headers.iter().map(|h| Cell::new(h).style_spec("b")).collect());
    table
}

/// Append one row; cells that look numeric are right-aligned.
pub fn add_table_row(table: &mut Table, cells: impl IntoIterator<Item = String>) {
    let row: Row = cells
        .into_iter()
        .map(|text| {
            let cell = Cell::new(&text);
            if is_numeric(&text) {
                cell.style_spec("r")
            } else {
                cell
            }
        })
        .collect();
    table.add_row(row);
}

fn is_numeric(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_keep_cell_order() {
        let mut table = create_table(&["Id", "Name"]);
        add_table_row(&mut table, ["21".to_string(), "Containers".to_string()]);
        add_table_row(&mut table, vec!["-1".to_string(), "None".to_string()]);

        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("Containers"));
        assert!(rendered.find("21").unwrap() < rendered.find("-1").unwrap());
    }

    #[test]
    fn test_numeric_detection() {
        assert!(is_numeric("4242"));
        assert!(is_numeric("-3"));
        assert!(is_numeric("1.5"));
        assert!(!is_numeric("0x10"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("-"));
    }
}
