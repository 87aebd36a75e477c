use tracing::error;

use super::interactive;
use super::view::SumsView;
use crate::dataset::{self, Dataset};
use crate::error::Result;
use crate::settings::resolve_data_file;
use crate::tui::run_report_view;

/// A dataset that fails to load is logged and shown as an empty table.
pub fn run(data: Option<&str>, text: bool) -> Result<()> {
    let ds = match dataset::load(&resolve_data_file(data)) {
        Ok(ds) => ds,
        Err(e) => {
            error!("{e}");
            Dataset::default()
        }
    };
    let sums = ds.sums();

    if interactive(text) {
        let mut view = SumsView::new(&sums);
        return run_report_view(&mut view);
    }

    println!("{}", super::text::format_sums(&sums));
    Ok(())
}
