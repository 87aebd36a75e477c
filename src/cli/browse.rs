use super::data::warn_unknown;
use super::FilterArgs;
use crate::browser::FilterBrowser;
use crate::dataset;
use crate::error::Result;
use crate::settings::resolve_data_file;
use crate::tui::run_report_view;

pub fn run(data: Option<&str>, filters: &FilterArgs) -> Result<()> {
    let state = filters.to_state()?;
    let ds = dataset::load(&resolve_data_file(data))?;
    if ds.is_empty() {
        println!("No records found.");
        return Ok(());
    }
    warn_unknown(&ds, &state);
    let mut browser = FilterBrowser::new(ds.records, state);
    run_report_view(&mut browser)
}
