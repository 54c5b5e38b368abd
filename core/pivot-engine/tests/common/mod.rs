//! FILENAME: tests/common/mod.rs
//! Fixtures and assertions shared by the pivot integration tests.

#![allow(dead_code)]

use engine::CellValue;
use pivot_engine::{Cell, Group, PivotIndex, SubRowGroup};

/// Sales data grouped by region (row) and team (subrow).
pub struct SalesFixture;

impl SalesFixture {
    /// (region key, region name, [(team key, team name)])
    pub fn regions() -> Vec<(&'static str, &'static str, Vec<(&'static str, &'static str)>)> {
        vec![
            ("north", "North", vec![("n1", "Alpha"), ("n2", "Bravo")]),
            ("south", "South", vec![("s1", "Charlie")]),
            ("east", "East", vec![("e1", "Delta"), ("e2", "Echo"), ("e3", "Foxtrot")]),
        ]
    }

    /// (region key, team key, column key, column name, value)
    pub fn measures() -> Vec<(&'static str, &'static str, &'static str, &'static str, f64)> {
        vec![
            ("north", "n1", "sales", "Sales", 1200.0),
            ("north", "n2", "cost", "Cost", 300.0),
            ("south", "s1", "sales_s", "Sales South", 800.0),
            ("east", "e3", "units", "Units", 42.0),
        ]
    }

    /// An index with every region and team, and no columns yet.
    pub fn skeleton() -> PivotIndex {
        let mut index = PivotIndex::new();
        for (key, name, teams) in Self::regions() {
            index.add_row(Group::new(key, name));
            for (team_key, team_name) in teams {
                index
                    .add_sub_row(key, Group::new(team_key, team_name))
                    .unwrap();
            }
        }
        index
    }

    /// The skeleton with every measure written.
    pub fn populated() -> PivotIndex {
        let mut index = Self::skeleton();
        for (row, sub_row, key, name, value) in Self::measures() {
            index
                .add_column(row, sub_row, Cell::new(key, name, CellValue::from(value)))
                .unwrap();
        }
        index
    }
}

/// Column keys of a subrow, in order.
pub fn column_keys<V>(sub_row: &SubRowGroup<V>) -> Vec<String> {
    sub_row.keys().map(str::to_string).collect()
}

/// Asserts that every subrow in the index carries the same ordered keys.
pub fn assert_uniform_schema<V>(index: &PivotIndex<V>) {
    let mut expected: Option<Vec<String>> = None;
    for row in index {
        for sub_row in row.sub_rows() {
            let keys = column_keys(sub_row);
            match &expected {
                None => expected = Some(keys),
                Some(first) => assert_eq!(
                    first, &keys,
                    "subrow [{}/{}] diverges from the schema",
                    row.key(),
                    sub_row.key()
                ),
            }
        }
    }
}
