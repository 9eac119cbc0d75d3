//! Printable tables rendered as CSV or XLSX downloads.

use actix_web::HttpResponse;
use rust_xlsxwriter::{Format, Workbook};

use crate::errors::{GradeSysError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// `xlsx` when asked for, CSV otherwise
    pub fn from_param(format: Option<&str>) -> Self {
        match format.map(|f| f.trim().to_ascii_lowercase()) {
            Some(f) if f == "xlsx" => ExportFormat::Xlsx,
            _ => ExportFormat::Csv,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// A titled table: `preamble` lines (label, value) above a header row and body
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub preamble: Vec<(String, String)>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: Vec<(String, String)>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn preamble(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.preamble.push((label.into(), value.into()));
        self
    }

    pub fn footer(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.footer.push((label.into(), value.into()));
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(vec![]);

        let csv_err =
            |e: csv::Error| GradeSysError::file_operation(format!("CSV write failed: {e}"));

        for (label, value) in &self.preamble {
            wtr.write_record([label, value]).map_err(csv_err)?;
        }
        if !self.preamble.is_empty() {
            wtr.write_record([""]).map_err(csv_err)?;
        }
        wtr.write_record(&self.headers).map_err(csv_err)?;
        for row in &self.rows {
            wtr.write_record(row).map_err(csv_err)?;
        }
        if !self.footer.is_empty() {
            wtr.write_record([""]).map_err(csv_err)?;
        }
        for (label, value) in &self.footer {
            wtr.write_record([label, value]).map_err(csv_err)?;
        }

        wtr.into_inner()
            .map_err(|e| GradeSysError::file_operation(format!("CSV generation failed: {e}")))
    }

    pub fn to_xlsx(&self, sheet_name: &str) -> Result<Vec<u8>> {
        let xlsx_err = |e: rust_xlsxwriter::XlsxError| {
            GradeSysError::file_operation(format!("XLSX write failed: {e}"))
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name).map_err(xlsx_err)?;
        let bold = Format::new().set_bold();

        let mut row: u32 = 0;
        for (label, value) in &self.preamble {
            worksheet
                .write_string_with_format(row, 0, label, &bold)
                .map_err(xlsx_err)?;
            worksheet.write_string(row, 1, value).map_err(xlsx_err)?;
            row += 1;
        }
        if !self.preamble.is_empty() {
            row += 1;
        }

        for (col, header) in self.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, header, &bold)
                .map_err(xlsx_err)?;
        }
        row += 1;

        for data in &self.rows {
            for (col, cell) in data.iter().enumerate() {
                worksheet.write_string(row, col as u16, cell).map_err(xlsx_err)?;
            }
            row += 1;
        }

        if !self.footer.is_empty() {
            row += 1;
        }
        for (label, value) in &self.footer {
            worksheet
                .write_string_with_format(row, 0, label, &bold)
                .map_err(xlsx_err)?;
            worksheet.write_string(row, 1, value).map_err(xlsx_err)?;
            row += 1;
        }

        worksheet.autofit();
        workbook
            .save_to_buffer()
            .map_err(|e| GradeSysError::file_operation(format!("XLSX generation failed: {e}")))
    }

    pub fn render(&self, format: ExportFormat, sheet_name: &str) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Xlsx => self.to_xlsx(sheet_name),
        }
    }
}

/// Download response with the right content type and file name
pub fn attachment(format: ExportFormat, base_name: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{base_name}.{}\"", format.extension()),
        ))
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_contains_preamble_header_rows_and_footer() {
        let mut table = Table::new(["Code", "Grade"])
            .preamble("School ID", "STU-AAAA1111")
            .footer("GWA", "1.5000");
        table.push_row(vec!["IT101".into(), "1.50".into()]);

        let text = String::from_utf8(table.to_csv().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "School ID,STU-AAAA1111");
        assert_eq!(lines[2], "Code,Grade");
        assert_eq!(lines[3], "IT101,1.50");
        assert_eq!(lines.last().copied(), Some("GWA,1.5000"));
    }

    #[test]
    fn xlsx_output_is_a_zip_container() {
        let mut table = Table::new(["Code"]);
        table.push_row(vec!["IT101".into()]);
        let bytes = table.to_xlsx("Report").unwrap();
        assert!(bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }

    #[test]
    fn unknown_formats_fall_back_to_csv() {
        assert_eq!(ExportFormat::from_param(Some("XLSX")), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_param(Some("pdf")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_param(None), ExportFormat::Csv);
    }
}
