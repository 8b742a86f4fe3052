use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A cell value mirroring the nullable dtypes the merge cares about.
///
/// Cells outside the coordinate columns stay as their original text so that
/// untouched values survive a merge byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Null => Ok(()),
        }
    }
}

impl Value {
    /// Interpret a raw CSV field. Empty fields are missing values.
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Value::Null
        } else {
            Value::Text(field.to_string())
        }
    }

    /// Try to interpret the value as an `f64` for numeric rounding.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// InputFile – one uploaded CSV
// ---------------------------------------------------------------------------

/// A named CSV byte stream. The name identifies the file in a [`MergeOrder`].
///
/// [`MergeOrder`]: crate::order::MergeOrder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        InputFile {
            name: name.into(),
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – parsed tabular data
// ---------------------------------------------------------------------------

/// Named columns plus positional rows. Every row holds exactly
/// `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append every row of `other`, widening the header with any columns
    /// not seen yet. Cells for columns a side lacks become [`Value::Null`].
    pub fn append(&mut self, other: Table) {
        let mapping: Vec<usize> = other
            .columns
            .iter()
            .map(|col| match self.column_index(col) {
                Some(idx) => idx,
                None => {
                    self.columns.push(col.clone());
                    self.columns.len() - 1
                }
            })
            .collect();

        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, Value::Null);
        }

        for row in other.rows {
            let mut widened = vec![Value::Null; width];
            for (cell, &target) in row.into_iter().zip(&mapping) {
                widened[target] = cell;
            }
            self.rows.push(widened);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn empty_field_is_null() {
        assert_eq!(Value::from_field(""), Value::Null);
        assert_eq!(Value::from_field(" "), text(" "));
    }

    #[test]
    fn as_f64_parses_text_and_integers() {
        assert_eq!(text("2.5").as_f64(), Some(2.5));
        assert_eq!(Value::Integer(-3).as_f64(), Some(-3.0));
        assert_eq!(text("abc").as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn append_unions_columns_in_first_seen_order() {
        let mut left = Table::new(vec!["Name".into(), "A".into()]);
        left.rows.push(vec![text("a"), text("1")]);

        let mut right = Table::new(vec!["B".into(), "Name".into()]);
        right.rows.push(vec![text("2"), text("b")]);

        left.append(right);

        assert_eq!(left.columns, vec!["Name", "A", "B"]);
        assert_eq!(
            left.rows,
            vec![
                vec![text("a"), text("1"), Value::Null],
                vec![text("b"), Value::Null, text("2")],
            ]
        );
    }

    #[test]
    fn append_into_empty_table_adopts_header() {
        let mut combined = Table::default();
        let mut t = Table::new(vec!["X".into()]);
        t.rows.push(vec![Value::Integer(1)]);
        combined.append(t);
        assert_eq!(combined.columns, vec!["X"]);
        assert_eq!(combined.len(), 1);
    }
}
