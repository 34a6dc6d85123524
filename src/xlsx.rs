use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::table::{Cell, Table};

// Fixed package parts of a single-sheet workbook. Values only; styling is out
// of scope, so styles.xml carries the bare minimum Excel insists on.
const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="1"><fill><patternFill patternType="none"/></fill></fills><borders count="1"><border/></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs></styleSheet>"#;

/// Write one workbook: the header row followed by one row per question block.
pub fn write_workbook(path: &Path, sheet_name: &str, table: &Table) -> anyhow::Result<()> {
    let f = File::create(path)
        .with_context(|| format!("create workbook: {}", path.display()))?;
    let mut zout = ZipWriter::new(f);
    let opts = SimpleFileOptions::default();

    let parts: [(&str, Vec<u8>); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.into()),
        ("_rels/.rels", ROOT_RELS_XML.into()),
        ("xl/workbook.xml", workbook_xml(sheet_name)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.into()),
        ("xl/styles.xml", STYLES_XML.into()),
        ("xl/worksheets/sheet1.xml", worksheet_xml(table)),
    ];
    for (name, data) in parts {
        zout.start_file(name, opts)
            .with_context(|| format!("start zip file: {name}"))?;
        zout.write_all(&data)
            .with_context(|| format!("write zip file: {name}"))?;
    }
    zout.finish().context("finish workbook zip")?;
    Ok(())
}

fn workbook_xml(sheet_name: &str) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name=""#,
    );
    escape_into(&mut out, sheet_name);
    out.extend_from_slice(br#"" sheetId="1" r:id="rId1"/></sheets></workbook>"#);
    out
}

fn worksheet_xml(table: &Table) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    write_row_open(&mut out, 1);
    for (col, name) in table.header.iter().enumerate() {
        write_text_cell(&mut out, 1, col, name);
    }
    out.extend_from_slice(b"</row>");

    for (i, row) in table.rows.iter().enumerate() {
        let row_num = i + 2;
        write_row_open(&mut out, row_num);
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => write_text_cell(&mut out, row_num, col, text),
                Cell::Bool(v) => write_bool_cell(&mut out, row_num, col, *v),
            }
        }
        out.extend_from_slice(b"</row>");
    }

    out.extend_from_slice(b"</sheetData></worksheet>");
    out
}

fn write_row_open(out: &mut Vec<u8>, row_num: usize) {
    out.extend_from_slice(format!(r#"<row r="{row_num}">"#).as_bytes());
}

fn write_text_cell(out: &mut Vec<u8>, row_num: usize, col: usize, text: &str) {
    out.extend_from_slice(
        format!(r#"<c r="{}{row_num}" t="inlineStr"><is><t xml:space="preserve">"#, col_name(col))
            .as_bytes(),
    );
    escape_into(out, text);
    out.extend_from_slice(b"</t></is></c>");
}

fn write_bool_cell(out: &mut Vec<u8>, row_num: usize, col: usize, value: bool) {
    out.extend_from_slice(
        format!(
            r#"<c r="{}{row_num}" t="b"><v>{}</v></c>"#,
            col_name(col),
            if value { 1 } else { 0 }
        )
        .as_bytes(),
    );
}

/// 0-based column index to spreadsheet letters: 0 -> A, 25 -> Z, 26 -> AA.
fn col_name(mut col: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    name
}

fn escape_into(out: &mut Vec<u8>, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.extend_from_slice(b"&amp;"),
            '<' => out.extend_from_slice(b"&lt;"),
            '>' => out.extend_from_slice(b"&gt;"),
            '"' => out.extend_from_slice(b"&quot;"),
            _ => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
}
