use chrono::{DateTime, Local};

use crate::dataset;
use crate::error::Result;
use crate::fmt::total;
use crate::settings::{get_export_dir, resolve_data_file, settings_file_exists, settings_path};

pub fn run(data: Option<&str>) -> Result<()> {
    let data_file = resolve_data_file(data);

    let settings_note = if settings_file_exists() { "" } else { " (not created; run `cartir init`)" };
    println!("Settings:    {}{settings_note}", settings_path().display());
    println!("Data file:   {}", data_file.display());
    println!("Export dir:  {}", get_export_dir().display());

    if !data_file.exists() {
        println!();
        println!("Data file not found. Pass --data or run `cartir init --data-file <path>`.");
        return Ok(());
    }

    let modified: DateTime<Local> = std::fs::metadata(&data_file)?.modified()?.into();
    println!("Modified:    {}", modified.format("%Y-%m-%d %H:%M"));

    let ds = dataset::load(&data_file)?;
    let sums = ds.sums();
    let grand_total: f64 = sums.iter().map(|s| s.total_value).sum();

    println!();
    println!("Records:        {}", ds.len());
    println!("Malformed:      {}", ds.issues.len());
    println!("Macro bloques:  {}", sums.len());
    println!("Calles:         {}", sums.iter().map(|s| s.streets.len()).sum::<usize>());
    println!("Grand total:    {}", total(grand_total));
    Ok(())
}
