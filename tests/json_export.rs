use anyhow::Result;
use dexcel::json_export::{serialize_to_json, sheet_to_json, workbook_to_json};
use dexcel::{ExcelReader, ExcelWriter, WriterOptions};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::io::Cursor;

fn workbook(block: impl FnOnce(&mut ExcelWriter) -> Result<()>) -> ExcelReader<Cursor<Vec<u8>>> {
    let mut writer = ExcelWriter::new(WriterOptions::default());
    block(&mut writer).unwrap();
    ExcelReader::from_bytes(writer.to_bytes().unwrap()).unwrap()
}

fn people(writer: &mut ExcelWriter) -> Result<()> {
    writer.sheet("people", |sheet| {
        sheet.row(|row| row.cell("name")?.cell("age").map(|_| ()))?;
        sheet.row(|row| row.cell("kim")?.cell(30).map(|_| ()))?;
        sheet.row(|row| row.cell("lee")?.cell(41.5).map(|_| ()))
    })
}

#[test]
fn rows_become_objects_keyed_by_header() {
    let mut reader = workbook(people);

    let data = reader
        .sheet(None, |sheet| sheet_to_json(sheet, 1))
        .unwrap()
        .unwrap();
    let value: Value = serde_json::from_str(&serialize_to_json(&data).unwrap()).unwrap();

    assert_eq!(
        value,
        json!([
            {"name": "kim", "age": 30},
            {"name": "lee", "age": 41.5},
        ])
    );

    let keys: Vec<_> = data[0].keys().cloned().collect();
    assert_eq!(keys, vec!["name", "age"]);
}

#[test]
fn multi_row_headers_are_joined() {
    let mut reader = workbook(|writer| {
        writer.sheet("quarters", |sheet| {
            sheet.row(|row| row.cell("Q1")?.skip()?.cell("Q2").map(|_| ()))?;
            sheet.row(|row| row.cell("jan")?.cell("feb")?.cell("apr").map(|_| ()))?;
            sheet.row(|row| row.cell(1)?.cell(2)?.cell(4).map(|_| ()))
        })
    });

    let data = reader
        .sheet(None, |sheet| sheet_to_json(sheet, 2))
        .unwrap()
        .unwrap();

    let keys: Vec<_> = data[0].keys().cloned().collect();
    assert_eq!(keys, vec!["Q1-jan", "Q1-feb", "Q2-apr"]);
    assert_eq!(data[0]["Q1-feb"], json!(2));
}

#[test]
fn repeated_headers_keep_every_column() {
    let mut reader = workbook(|writer| {
        writer.sheet("scores", |sheet| {
            sheet.row(|row| {
                row.cell("score")?.cell("score")?.cell("score_2")?.cell("score").map(|_| ())
            })?;
            sheet.row(|row| row.cell(1)?.cell(2)?.cell(3)?.cell(4).map(|_| ()))
        })
    });

    let data = reader
        .sheet(None, |sheet| sheet_to_json(sheet, 1))
        .unwrap()
        .unwrap();

    let value: Value = serde_json::to_value(&data).unwrap();
    assert_eq!(
        value,
        json!([{"score": 1, "score_2": 2, "score_2_2": 3, "score_3": 4}])
    );
}

#[test]
fn zero_header_rows_is_an_error() {
    let mut reader = workbook(people);

    let err = reader
        .sheet(None, |sheet| sheet_to_json(sheet, 0))
        .unwrap()
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid header rows: 0");
}

#[test]
fn workbook_export_keeps_sheet_order() {
    let mut reader = workbook(|writer| {
        people(writer)?;
        writer.sheet("empty", |_| Ok(()))
    });

    let all = workbook_to_json(&mut reader, 1).unwrap();

    let names: Vec<_> = all.keys().cloned().collect();
    assert_eq!(names, vec!["people", "empty"]);
    assert_eq!(all["people"].len(), 2);
    assert!(all["empty"].is_empty());
}
