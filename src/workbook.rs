use std::fmt::Write as _;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ExportError, Result};
use crate::export::{Sheet, Workbook};

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIP_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const DOC_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Style indices in `styles.xml`.
const STYLE_BODY: u32 = 1;
const STYLE_HEADER: u32 = 2;

/// Padding added to the longest cell of a column.
const WIDTH_PADDING: usize = 4;

/// Writes `workbook` as an Office Open XML spreadsheet and hands the writer back.
pub fn write_xlsx<W: Write + Seek>(workbook: &Workbook, writer: W) -> Result<W> {
    if workbook.sheets.is_empty() {
        return Err(ExportError::EmptyWorkbook(workbook.file_name.clone()));
    }

    let mut zip = ZipWriter::new(writer);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut parts = vec![
        ("[Content_Types].xml".to_string(), content_types(workbook.sheets.len())),
        ("_rels/.rels".to_string(), root_rels()),
        ("docProps/core.xml".to_string(), core_props()),
        ("xl/workbook.xml".to_string(), workbook_xml(&workbook.sheets)),
        ("xl/_rels/workbook.xml.rels".to_string(), workbook_rels(workbook.sheets.len())),
        ("xl/styles.xml".to_string(), styles_xml()),
    ];
    for (index, sheet) in workbook.sheets.iter().enumerate() {
        parts.push((format!("xl/worksheets/sheet{}.xml", index + 1), sheet_xml(sheet)));
    }

    for (name, body) in parts {
        zip.start_file(name, opts)?;
        zip.write_all(body.as_bytes())?;
    }

    Ok(zip.finish()?)
}

/// Saves the workbook under `dir` using its own file name.
pub fn save_xlsx(workbook: &Workbook, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&workbook.file_name);
    write_xlsx(workbook, File::create(&path)?)?;
    tracing::info!(path = %path.display(), sheets = workbook.sheets.len(), "wrote workbook");
    Ok(path)
}

/// Writes one CSV file per sheet, named `<stem>_<n>.csv`.
pub fn save_csv(workbook: &Workbook, dir: &Path) -> Result<Vec<PathBuf>> {
    if workbook.sheets.is_empty() {
        return Err(ExportError::EmptyWorkbook(workbook.file_name.clone()));
    }
    std::fs::create_dir_all(dir)?;

    let stem = Path::new(&workbook.file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| workbook.file_name.clone());

    let mut paths = Vec::with_capacity(workbook.sheets.len());
    for (index, sheet) in workbook.sheets.iter().enumerate() {
        let path = dir.join(format!("{stem}_{}.csv", index + 1));
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&sheet.columns)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        tracing::debug!(path = %path.display(), sheet = %sheet.name, rows = sheet.rows.len(), "wrote csv sheet");
        paths.push(path);
    }
    Ok(paths)
}

fn content_types(sheet_count: usize) -> String {
    let mut xml = String::new();
    let _ = write!(
        xml,
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#
    );
    let _ = write!(
        xml,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#
    );
    let _ = write!(xml, r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    let _ = write!(
        xml,
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#
    );
    let _ = write!(
        xml,
        r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#
    );
    for n in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        );
    }
    let _ = write!(
        xml,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#
    );
    xml.push_str("</Types>");
    xml
}

fn root_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{RELATIONSHIP_NS}"><Relationship Id="rId1" Type="{DOC_REL}/officeDocument" Target="xl/workbook.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#
    )
}

fn core_props() -> String {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        r#"{XML_DECL}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:creator>{}</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified></cp:coreProperties>"#,
        env!("CARGO_PKG_NAME")
    )
}

fn workbook_xml(sheets: &[Sheet]) -> String {
    let mut xml = String::new();
    let _ = write!(
        xml,
        r#"{XML_DECL}<workbook xmlns="{SPREADSHEET_NS}" xmlns:r="{DOC_REL}"><sheets>"#
    );
    for (index, sheet) in sheets.iter().enumerate() {
        let n = index + 1;
        let _ = write!(
            xml,
            r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
            escape_xml(&sheet.name)
        );
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn workbook_rels(sheet_count: usize) -> String {
    let mut xml = String::new();
    let _ = write!(xml, r#"{XML_DECL}<Relationships xmlns="{RELATIONSHIP_NS}">"#);
    for n in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{n}" Type="{DOC_REL}/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        );
    }
    let _ = write!(
        xml,
        r#"<Relationship Id="rId{}" Type="{DOC_REL}/styles" Target="styles.xml"/></Relationships>"#,
        sheet_count + 1
    );
    xml
}

/// Body cells: thin borders, wrapped. Header cells: bold Arial on yellow, centred.
fn styles_xml() -> String {
    let thin = |side: &str| format!(r#"<{side} style="thin"><color auto="1"/></{side}>"#);
    format!(
        concat!(
            r#"{decl}<styleSheet xmlns="{ns}">"#,
            r#"<fonts count="2"><font><sz val="11"/><name val="Arial"/></font><font><b/><sz val="11"/><name val="Arial"/></font></fonts>"#,
            r#"<fills count="3"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill>"#,
            r#"<fill><patternFill patternType="solid"><fgColor rgb="FFFFFF00"/><bgColor indexed="64"/></patternFill></fill></fills>"#,
            r#"<borders count="2"><border><left/><right/><top/><bottom/><diagonal/></border>"#,
            r#"<border>{left}{right}{top}{bottom}<diagonal/></border></borders>"#,
            r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
            r#"<cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
            r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="1" xfId="0" applyBorder="1" applyAlignment="1"><alignment vertical="center" wrapText="1"/></xf>"#,
            r#"<xf numFmtId="0" fontId="1" fillId="2" borderId="1" xfId="0" applyFont="1" applyFill="1" applyBorder="1" applyAlignment="1"><alignment horizontal="center" vertical="center" wrapText="1"/></xf></cellXfs>"#,
            r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#
        ),
        decl = XML_DECL,
        ns = SPREADSHEET_NS,
        left = thin("left"),
        right = thin("right"),
        top = thin("top"),
        bottom = thin("bottom"),
    )
}

fn sheet_xml(sheet: &Sheet) -> String {
    let mut xml = String::new();
    let _ = write!(xml, r#"{XML_DECL}<worksheet xmlns="{SPREADSHEET_NS}">"#);

    let widths = column_widths(sheet);
    if !widths.is_empty() {
        xml.push_str("<cols>");
        for (index, width) in widths.iter().enumerate() {
            let n = index + 1;
            let _ = write!(xml, r#"<col min="{n}" max="{n}" width="{width}" customWidth="1"/>"#);
        }
        xml.push_str("</cols>");
    }

    xml.push_str("<sheetData>");
    write_row(&mut xml, 1, &sheet.columns, STYLE_HEADER);
    for (index, row) in sheet.rows.iter().enumerate() {
        write_row(&mut xml, index + 2, row, STYLE_BODY);
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn write_row(xml: &mut String, row_number: usize, cells: &[String], style: u32) {
    let _ = write!(xml, r#"<row r="{row_number}">"#);
    for (index, value) in cells.iter().enumerate() {
        let reference = format!("{}{row_number}", column_letter(index));
        match numeric_value(value) {
            Some(number) if style == STYLE_BODY => {
                let _ = write!(xml, r#"<c r="{reference}" s="{style}"><v>{number}</v></c>"#);
            }
            _ => {
                let _ = write!(
                    xml,
                    r#"<c r="{reference}" s="{style}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    escape_xml(value)
                );
            }
        }
    }
    xml.push_str("</row>");
}

/// Cells that read as plain finite numbers are stored as numbers.
fn numeric_value(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() != value.len() {
        return None;
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn column_widths(sheet: &Sheet) -> Vec<usize> {
    sheet
        .columns
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let longest = sheet
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            longest + WIDTH_PADDING
        })
        .collect()
}

/// Zero-based column index to spreadsheet letters: 0 -> A, 26 -> AA.
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn sample() -> Workbook {
        Workbook {
            file_name: "Thong_ke_Hoc_sinh.xlsx".to_string(),
            sheets: vec![
                Sheet {
                    name: "Thống kê Học sinh".to_string(),
                    columns: vec!["Hạng".to_string(), "Học sinh".to_string(), "Tỷ lệ".to_string()],
                    rows: vec![
                        vec!["1".to_string(), "Lê <Anh> & Co".to_string(), "90%".to_string()],
                        vec!["2".to_string(), "Trần Bình".to_string(), "85%".to_string()],
                    ],
                },
                Sheet {
                    name: "Trống".to_string(),
                    columns: vec!["STT".to_string()],
                    rows: Vec::new(),
                },
            ],
        }
    }

    fn read_entry(bytes: Vec<u8>, name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut body = String::new();
        entry.read_to_string(&mut body).unwrap();
        body
    }

    #[test]
    fn column_letters_roll_over() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_xml("Tiếng Việt"), "Tiếng Việt");
    }

    #[test]
    fn only_plain_numbers_become_numeric_cells() {
        assert_eq!(numeric_value("12"), Some(12.0));
        assert_eq!(numeric_value("8.5"), Some(8.5));
        assert_eq!(numeric_value("90%"), None);
        assert_eq!(numeric_value("inf"), None);
        assert_eq!(numeric_value("NaN"), None);
        assert_eq!(numeric_value(" 3"), None);
        assert_eq!(numeric_value("8 - Lớp 8A1"), None);
        assert_eq!(numeric_value(""), None);
    }

    #[test]
    fn writes_all_package_parts() {
        let bytes = write_xlsx(&sample(), Cursor::new(Vec::new())).unwrap().into_inner();
        let archive = ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
            "xl/worksheets/sheet2.xml",
        ] {
            assert!(names.contains(&part), "missing {part}");
        }

        let workbook = read_entry(bytes.clone(), "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Thống kê Học sinh" sheetId="1" r:id="rId1"/>"#));
        let rels = read_entry(bytes, "xl/_rels/workbook.xml.rels");
        assert!(rels.contains(r#"Id="rId3""#));
        assert!(rels.contains("styles.xml"));
    }

    #[test]
    fn sheet_cells_carry_styles_and_types() {
        let bytes = write_xlsx(&sample(), Cursor::new(Vec::new())).unwrap().into_inner();
        let sheet = read_entry(bytes, "xl/worksheets/sheet1.xml");

        assert!(sheet.contains(r#"<c r="A1" s="2" t="inlineStr"><is><t xml:space="preserve">Hạng</t></is></c>"#));
        assert!(sheet.contains(r#"<c r="A2" s="1"><v>1</v></c>"#));
        assert!(sheet.contains("Lê &lt;Anh&gt; &amp; Co"));
        assert!(sheet.contains(r#"<t xml:space="preserve">90%</t>"#));
        // "Lê <Anh> & Co" is 13 characters.
        assert!(sheet.contains(r#"<col min="2" max="2" width="17" customWidth="1"/>"#));
    }

    #[test]
    fn refuses_workbook_without_sheets() {
        let empty = Workbook {
            file_name: "x.xlsx".to_string(),
            sheets: Vec::new(),
        };
        let err = write_xlsx(&empty, Cursor::new(Vec::new())).unwrap_err();
        assert!(matches!(err, ExportError::EmptyWorkbook(name) if name == "x.xlsx"));
    }

    #[test]
    fn saves_xlsx_and_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        let wb = sample();

        let xlsx = save_xlsx(&wb, dir.path()).unwrap();
        assert_eq!(xlsx.file_name().unwrap(), "Thong_ke_Hoc_sinh.xlsx");
        assert!(xlsx.metadata().unwrap().len() > 0);

        let csvs = save_csv(&wb, &dir.path().join("csv")).unwrap();
        assert_eq!(csvs.len(), 2);
        let mut reader = csv::Reader::from_path(&csvs[0]).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "Hạng");
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Lê <Anh> & Co");
    }
}
