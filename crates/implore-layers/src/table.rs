//! Column table passed between layer stages.
//!
//! Columns are keyed by aesthetic name and all share one row count. A column
//! is either numeric (positions, densities) or discrete (labels such as a
//! colour or facet key).

use std::collections::{BTreeMap, HashMap};

use crate::error::{StatError, StatResult};

/// A single column of layer data
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Discrete(Vec<String>),
}

/// Hashable identity of one cell, used to split rows into groups
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum GroupKey {
    Number(u64),
    Label(String),
}

impl Column {
    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Discrete(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric values, or `None` for a discrete column
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Column::Numeric(v) => Some(v),
            Column::Discrete(_) => None,
        }
    }

    /// Human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "numeric",
            Column::Discrete(_) => "discrete",
        }
    }

    /// Rows at `indices`, in that order
    pub fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(indices.iter().map(|&i| v[i]).collect()),
            Column::Discrete(v) => {
                Column::Discrete(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }

    /// Whether every row holds the same value (NaN counts as equal to NaN)
    pub fn is_constant(&self) -> bool {
        match self {
            Column::Numeric(v) => v
                .windows(2)
                .all(|w| w[0] == w[1] || (w[0].is_nan() && w[1].is_nan())),
            Column::Discrete(v) => v.windows(2).all(|w| w[0] == w[1]),
        }
    }

    /// The first value repeated `len` times, or `None` for an empty column
    pub fn repeat_first(&self, len: usize) -> Option<Column> {
        match self {
            Column::Numeric(v) => v.first().map(|&x| Column::Numeric(vec![x; len])),
            Column::Discrete(v) => v.first().map(|s| Column::Discrete(vec![s.clone(); len])),
        }
    }

    /// Append `other` when both columns have the same type
    fn extend_from(&mut self, other: &Column) -> bool {
        match (self, other) {
            (Column::Numeric(a), Column::Numeric(b)) => a.extend_from_slice(b),
            (Column::Discrete(a), Column::Discrete(b)) => a.extend_from_slice(b),
            _ => return false,
        }
        true
    }

    fn key(&self, row: usize) -> GroupKey {
        match self {
            // -0.0 and 0.0 belong to the same group
            Column::Numeric(v) => GroupKey::Number((v[row] + 0.0).to_bits()),
            Column::Discrete(v) => GroupKey::Label(v[row].clone()),
        }
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Numeric(values)
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::Discrete(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::Discrete(values.into_iter().map(str::to_string).collect())
    }
}

/// Layer data: named columns of equal length
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: BTreeMap<String, Column>,
    rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column, checking its length against the table
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        column: impl Into<Column>,
    ) -> StatResult<()> {
        let name = name.into();
        let column = column.into();

        let replacing_only_column = self.columns.len() == 1 && self.columns.contains_key(&name);
        if self.columns.is_empty() || replacing_only_column {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(StatError::LengthMismatch {
                column: name,
                expected: self.rows,
                actual: column.len(),
            });
        }

        self.columns.insert(name, column);
        Ok(())
    }

    /// Builder form of [`Table::insert`]
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column: impl Into<Column>,
    ) -> StatResult<Self> {
        self.insert(name, column)?;
        Ok(self)
    }

    /// Builder shorthand for a numeric column
    pub fn with_numeric(self, name: impl Into<String>, values: Vec<f64>) -> StatResult<Self> {
        self.with_column(name, Column::Numeric(values))
    }

    /// Get a column by name
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Get a numeric column, failing if it is absent or discrete
    pub fn numeric(&self, name: &str) -> StatResult<&[f64]> {
        let column = self.get(name).ok_or_else(|| StatError::MissingColumn {
            column: name.to_string(),
        })?;
        column.as_numeric().ok_or_else(|| StatError::NonNumericColumn {
            column: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names, sorted
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Iterate over `(name, column)` pairs, sorted by name
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, column)| (name.as_str(), column))
    }

    /// A new table holding the rows at `indices`
    pub fn take(&self, indices: &[usize]) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.take(indices)))
                .collect(),
            rows: indices.len(),
        }
    }

    /// Row indices of each distinct value of `column`, in first-seen order
    pub fn group_indices(&self, column: &str) -> StatResult<Vec<Vec<usize>>> {
        let column = self.get(column).ok_or_else(|| StatError::MissingColumn {
            column: column.to_string(),
        })?;

        let mut slot_of: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for row in 0..self.rows {
            let slot = *slot_of.entry(column.key(row)).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(row);
        }
        Ok(groups)
    }

    /// Stack tables row-wise.
    ///
    /// Only columns present with the same type in every part survive.
    pub fn concat(parts: Vec<Table>) -> Table {
        let mut parts = parts.into_iter();
        let Some(mut combined) = parts.next() else {
            return Table::new();
        };

        for part in parts {
            combined.columns.retain(|name, column| {
                let kept = part
                    .columns
                    .get(name)
                    .is_some_and(|other| column.extend_from(other));
                if !kept {
                    tracing::debug!("Dropping column '{}' missing from some groups", name);
                }
                kept
            });
            combined.rows += part.rows;
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new()
            .with_numeric("x", vec![1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .with_column("group", vec!["a", "b", "a", "b"])
            .unwrap()
    }

    #[test]
    fn test_insert_length_mismatch() {
        let mut table = sample();
        let err = table.insert("y", vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            StatError::LengthMismatch {
                expected: 4,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_replace_only_column_resizes() {
        let mut table = Table::new().with_numeric("x", vec![1.0, 2.0]).unwrap();
        table.insert("x", vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_numeric_access() {
        let table = sample();
        assert_eq!(table.numeric("x").unwrap(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(
            table.numeric("group"),
            Err(StatError::NonNumericColumn { .. })
        ));
        assert!(matches!(
            table.numeric("z"),
            Err(StatError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_group_indices_first_seen_order() {
        let table = Table::new()
            .with_column("group", vec!["b", "a", "b", "c"])
            .unwrap();
        let groups = table.group_indices("group").unwrap();
        assert_eq!(groups, vec![vec![0, 2], vec![1], vec![3]]);
    }

    #[test]
    fn test_group_indices_numeric_signed_zero() {
        let table = Table::new()
            .with_numeric("group", vec![0.0, -0.0, 1.0])
            .unwrap();
        let groups = table.group_indices("group").unwrap();
        assert_eq!(groups, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_take() {
        let table = sample().take(&[2, 0]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.numeric("x").unwrap(), &[3.0, 1.0]);
        assert_eq!(
            table.get("group"),
            Some(&Column::Discrete(vec!["a".into(), "a".into()]))
        );
    }

    #[test]
    fn test_is_constant() {
        assert!(Column::from(vec![2.0, 2.0]).is_constant());
        assert!(Column::from(vec![f64::NAN, f64::NAN]).is_constant());
        assert!(!Column::from(vec!["a", "b"]).is_constant());
        assert!(Column::Numeric(Vec::new()).is_constant());
    }

    #[test]
    fn test_repeat_first() {
        let column = Column::from(vec!["red", "red"]);
        assert_eq!(
            column.repeat_first(3),
            Some(Column::Discrete(vec!["red".into(); 3]))
        );
        assert_eq!(Column::Numeric(Vec::new()).repeat_first(3), None);
    }

    #[test]
    fn test_concat_keeps_shared_columns() {
        let a = Table::new()
            .with_numeric("x", vec![1.0])
            .unwrap()
            .with_column("colour", vec!["red"])
            .unwrap();
        let b = Table::new().with_numeric("x", vec![2.0, 3.0]).unwrap();

        let combined = Table::concat(vec![a, b]);
        assert_eq!(combined.len(), 3);
        assert_eq!(combined.numeric("x").unwrap(), &[1.0, 2.0, 3.0]);
        assert!(!combined.contains("colour"));
    }

    #[test]
    fn test_concat_empty() {
        assert!(Table::concat(Vec::new()).is_empty());
    }
}
