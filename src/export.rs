use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::fmt::round_total;
use crate::models::{ParsedRecord, SectionAggregate};

pub const SUMS_SHEET: &str = "Sumas Macro y Calle";
pub const DATA_SHEET: &str = "Datos Cartir_total";

pub const SUMS_HEADER: [&str; 3] = ["Macro bloque", "Calle", "Total"];
pub const DATA_HEADER: [&str; 7] = ["ID", "Fecha", "Turno", "Calle", "Zanja", "Macro Bloque", "Total"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Text(String),
    Number(i64),
}

impl ExportCell {
    fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

/// One row per street within each section, totals rounded.
pub fn sums_rows(sums: &[SectionAggregate]) -> Vec<Vec<ExportCell>> {
    sums.iter()
        .flat_map(|s| {
            s.streets.iter().map(move |st| {
                vec![
                    ExportCell::Text(s.section.clone()),
                    ExportCell::Text(st.street.clone()),
                    ExportCell::Number(round_total(st.total_value)),
                ]
            })
        })
        .collect()
}

/// One row per record, in source order.
pub fn data_rows(records: &[ParsedRecord]) -> Vec<Vec<ExportCell>> {
    records
        .iter()
        .map(|r| {
            vec![
                ExportCell::Text(r.id.clone()),
                ExportCell::Text(r.date.clone()),
                ExportCell::Text(r.shift.clone()),
                ExportCell::Text(r.street.clone()),
                ExportCell::Text(r.trench.clone()),
                ExportCell::Text(r.section.clone()),
                ExportCell::Number(round_total(r.value)),
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// XLSX
// ---------------------------------------------------------------------------

#[cfg(feature = "xlsx")]
fn fill_sheet(
    sheet: &mut rust_xlsxwriter::Worksheet,
    header: &[&str],
    rows: &[Vec<ExportCell>],
) -> Result<()> {
    for (col, title) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                ExportCell::Text(s) => sheet.write_string(r, col as u16, s.as_str())?,
                ExportCell::Number(n) => sheet.write_number(r, col as u16, *n as f64)?,
            };
        }
    }
    Ok(())
}

/// Build the two-sheet workbook in memory.
#[cfg(feature = "xlsx")]
pub fn to_xlsx(sums: &[SectionAggregate], records: &[ParsedRecord]) -> Result<Vec<u8>> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();

    let mut sums_sheet = Worksheet::new();
    sums_sheet.set_name(SUMS_SHEET)?;
    fill_sheet(&mut sums_sheet, &SUMS_HEADER, &sums_rows(sums))?;
    workbook.push_worksheet(sums_sheet);

    let mut data_sheet = Worksheet::new();
    data_sheet.set_name(DATA_SHEET)?;
    fill_sheet(&mut data_sheet, &DATA_HEADER, &data_rows(records))?;
    workbook.push_worksheet(data_sheet);

    Ok(workbook.save_to_buffer()?)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

pub fn to_csv(header: &[&str], rows: &[Vec<ExportCell>]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row.iter().map(ExportCell::as_text))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| crate::error::CartirError::Other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `out/data.xlsx` → (`out/data_sumas.csv`, `out/data_datos.csv`).
pub fn csv_paths(output: &Path) -> (PathBuf, PathBuf) {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    let dir = output.parent().unwrap_or_else(|| Path::new(""));
    (
        dir.join(format!("{stem}_sumas.csv")),
        dir.join(format!("{stem}_datos.csv")),
    )
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Export sums and the full record set. Returns the written paths.
pub fn export(
    sums: &[SectionAggregate],
    records: &[ParsedRecord],
    output: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    match format {
        ExportFormat::Xlsx => export_xlsx(sums, records, output),
        ExportFormat::Csv => {
            let (sums_path, data_path) = csv_paths(output);
            write_file(&sums_path, to_csv(&SUMS_HEADER, &sums_rows(sums))?.as_bytes())?;
            write_file(&data_path, to_csv(&DATA_HEADER, &data_rows(records))?.as_bytes())?;
            Ok(vec![sums_path, data_path])
        }
    }
}

#[cfg(feature = "xlsx")]
fn export_xlsx(
    sums: &[SectionAggregate],
    records: &[ParsedRecord],
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let bytes = to_xlsx(sums, records)?;
    write_file(output, &bytes)?;
    Ok(vec![output.to_path_buf()])
}

#[cfg(not(feature = "xlsx"))]
fn export_xlsx(
    _sums: &[SectionAggregate],
    _records: &[ParsedRecord],
    _output: &Path,
) -> Result<Vec<PathBuf>> {
    Err(crate::error::CartirError::Other(
        "XLSX export requires the 'xlsx' feature; build with `cargo build --features xlsx` or use --format csv".into(),
    ))
}
