use super::text::format_issues;
use crate::dataset;
use crate::error::Result;
use crate::settings::resolve_data_file;

pub fn run(data: Option<&str>) -> Result<()> {
    let ds = dataset::load(&resolve_data_file(data))?;
    println!("{}", format_issues(&ds.issues, ds.len()));
    Ok(())
}
