use std::path::PathBuf;

use crate::dataset;
use crate::error::Result;
use crate::export::{self, ExportFormat};
use crate::settings::{get_export_dir, resolve_data_file};

fn default_path(format: ExportFormat) -> PathBuf {
    let name = match format {
        ExportFormat::Xlsx => "data.xlsx",
        ExportFormat::Csv => "data.csv",
    };
    get_export_dir().join(name)
}

/// Export always covers the whole dataset, never a filtered view.
pub fn run(data: Option<&str>, output: Option<String>, format: ExportFormat) -> Result<()> {
    let ds = dataset::load(&resolve_data_file(data))?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path(format));
    for written in export::export(&ds.sums(), &ds.records, &path, format)? {
        println!("Wrote {}", written.display());
    }
    Ok(())
}
