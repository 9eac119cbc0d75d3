//! Uploaded tabular files flattened into rows of trimmed cell text.
//!
//! `.xlsx` goes through calamine (first worksheet), `.csv` through the csv
//! reader, and `.docx` is unzipped so that every `w:tbl` contributes its rows.

use actix_multipart::Multipart;
use calamine::{Reader, Xlsx};
use futures_util::StreamExt;
use quick_xml::Reader as XmlReader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};

use crate::errors::{GradeSysError, Result};

pub type Rows = Vec<Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
    Docx,
}

impl SheetFormat {
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".xlsx") {
            Some(SheetFormat::Xlsx)
        } else if lower.ends_with(".csv") {
            Some(SheetFormat::Csv)
        } else if lower.ends_with(".docx") {
            Some(SheetFormat::Docx)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => ".xlsx",
            SheetFormat::Csv => ".csv",
            SheetFormat::Docx => ".docx",
        }
    }
}

/// File part named `file` of a multipart upload
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub async fn read_upload(payload: &mut Multipart) -> std::result::Result<UploadedFile, String> {
    let mut bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("Failed to read form field: {e}"))?;

        if field.name() == Some("file") {
            if let Some(disposition) = field.content_disposition() {
                file_name = disposition.get_filename().unwrap_or("upload.csv").to_string();
            }
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("Failed to read upload: {e}"))?;
                bytes.extend_from_slice(&data);
            }
        }
    }

    if bytes.is_empty() {
        return Err("No file field found in upload".to_string());
    }
    Ok(UploadedFile { file_name, bytes })
}

/// Reads every row of the file, keeping blank rows so row numbers line up
pub fn read_rows(data: &[u8], format: SheetFormat) -> Result<Rows> {
    match format {
        SheetFormat::Xlsx => read_xlsx(data),
        SheetFormat::Csv => read_csv(data),
        SheetFormat::Docx => read_docx_tables(data),
    }
}

fn read_csv(data: &[u8]) -> Result<Rows> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record
            .map_err(|e| {
                GradeSysError::import_parse(format!("Row {} is malformed: {e}", idx + 1))
            })?;
        rows.push(record.iter().map(|c| c.trim().to_string()).collect());
    }
    Ok(rows)
}

fn read_xlsx(data: &[u8]) -> Result<Rows> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| GradeSysError::import_parse(format!("Cannot open XLSX file: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| GradeSysError::import_parse("Workbook has no worksheet"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| GradeSysError::import_parse(format!("Cannot read worksheet: {e}")))?;

    // calamine starts the range at the first used cell
    let leading_blank_rows = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows: Rows = vec![Vec::new(); leading_blank_rows];
    rows.extend(
        range
            .rows()
            .map(|row| row.iter().map(|c| c.to_string().trim().to_string()).collect()),
    );
    Ok(rows)
}

fn read_docx_tables(data: &[u8]) -> Result<Rows> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| GradeSysError::import_parse(format!("Cannot open DOCX file: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| GradeSysError::import_parse(format!("DOCX has no document body: {e}")))?
        .read_to_string(&mut xml)?;

    parse_document_tables(&xml)
}

/// Collects the rows of every table in a WordprocessingML body
fn parse_document_tables(xml: &str) -> Result<Rows> {
    let mut reader = XmlReader::from_str(xml);
    let mut rows: Rows = Vec::new();
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:tr" => row = Some(Vec::new()),
                b"w:tc" => cell = Some(String::new()),
                b"w:t" => in_text = true,
                b"w:p" => {
                    // paragraphs inside one cell read as space-separated text
                    if let Some(text) = cell.as_mut()
                        && !text.is_empty()
                        && !text.ends_with(' ')
                    {
                        text.push(' ');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                if let Some(text) = cell.as_mut() {
                    let value = t
                        .unescape()
                        .map_err(|e| GradeSysError::import_parse(format!("Bad DOCX text: {e}")))?;
                    text.push_str(&value);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:tc" => {
                    if let (Some(r), Some(text)) = (row.as_mut(), cell.take()) {
                        r.push(text.trim().to_string());
                    }
                }
                b"w:tr" => {
                    if let Some(r) = row.take() {
                        rows.push(r);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(GradeSysError::import_parse(format!(
                    "DOCX XML error at position {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    Ok(rows)
}

/// Header key used for column matching: lowercase, spaces and hyphens folded to `_`
pub fn header_key(cell: &str) -> String {
    cell.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_are_trimmed_and_ragged_rows_allowed() {
        let data = b"School ID, Grade\nSTU-AAAA1111 , 1.5\n\nSTU-BBBB2222\n";
        let rows = read_rows(data, SheetFormat::Csv).unwrap();
        assert_eq!(rows[0], vec!["School ID", "Grade"]);
        assert_eq!(rows[1], vec!["STU-AAAA1111", "1.5"]);
        assert_eq!(rows.last().unwrap(), &vec!["STU-BBBB2222".to_string()]);
    }

    #[test]
    fn docx_table_cells_are_concatenated() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>Grade sheet</w:t></w:r></w:p>
            <w:tbl>
              <w:tr>
                <w:tc><w:p><w:r><w:t>STUDENT</w:t></w:r><w:r><w:t xml:space="preserve"> ID</w:t></w:r></w:p></w:tc>
                <w:tc><w:p><w:r><w:t>FINAL GRADE</w:t></w:r></w:p></w:tc>
              </w:tr>
              <w:tr>
                <w:tc><w:p><w:r><w:t>STU-AAAA1111</w:t></w:r></w:p></w:tc>
                <w:tc><w:p><w:r><w:t>1.75</w:t></w:r></w:p></w:tc>
              </w:tr>
            </w:tbl>
            </w:body></w:document>"#;
        let rows = parse_document_tables(xml).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["STUDENT ID", "FINAL GRADE"]);
        assert_eq!(rows[1], vec!["STU-AAAA1111", "1.75"]);
    }

    #[test]
    fn header_keys_fold_separators() {
        assert_eq!(header_key(" First Name "), "first_name");
        assert_eq!(header_key("year-level"), "year_level");
        assert_eq!(header_key("school_id"), "school_id");
    }

    #[test]
    fn format_is_taken_from_extension() {
        assert_eq!(SheetFormat::from_file_name("BSIT.XLSX"), Some(SheetFormat::Xlsx));
        assert_eq!(SheetFormat::from_file_name("grades.docx"), Some(SheetFormat::Docx));
        assert_eq!(SheetFormat::from_file_name("notes.txt"), None);
    }
}
