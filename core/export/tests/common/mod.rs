//! FILENAME: tests/common/mod.rs
//! Fixtures and workbook read-back helpers for the export tests.

#![allow(dead_code)]

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use engine::CellValue;
use pivot_engine::{Cell, FlatPivotIndex, Group, PivotIndex};
use std::io::Cursor;

pub fn people() -> FlatPivotIndex {
    let mut index = FlatPivotIndex::new();
    index.add("r1", "Name", CellValue::from("Jan"));
    index.add("r1", "Age", CellValue::from(30));
    index.add("r2", "Name", CellValue::from("Ola"));
    index
}

/// North has two teams, South one, West none. Sales lands on North/Alpha,
/// Cost on South/Charlie; every other cell is a backfilled placeholder.
pub fn regions() -> PivotIndex {
    let mut index = PivotIndex::new();
    index.add_row(Group::new("north", "North"));
    index.add_row(Group::new("south", "South"));
    index.add_row(Group::new("west", "West"));
    index.add_sub_row("north", Group::new("n1", "Alpha")).unwrap();
    index.add_sub_row("north", Group::new("n2", "Bravo")).unwrap();
    index.add_sub_row("south", Group::new("s1", "Charlie")).unwrap();
    index
        .add_column("north", "n1", Cell::new("sales", "Sales", CellValue::from(1200.0)))
        .unwrap();
    index
        .add_column("south", "s1", Cell::new("cost", "Cost", CellValue::from(300.0)))
        .unwrap();
    index
}

pub struct SheetReader {
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl SheetReader {
    pub fn new(buffer: Vec<u8>) -> Self {
        SheetReader {
            workbook: open_workbook_from_rs(Cursor::new(buffer)).unwrap(),
        }
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    pub fn values(&mut self, sheet: &str) -> Range<Data> {
        self.workbook.worksheet_range(sheet).unwrap()
    }

    pub fn formulas(&mut self, sheet: &str) -> Range<String> {
        self.workbook.worksheet_formula(sheet).unwrap()
    }
}

pub fn text_at(range: &Range<Data>, row: u32, col: u32) -> Option<String> {
    match range.get_value((row, col)) {
        Some(Data::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

pub fn number_at(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        _ => None,
    }
}
