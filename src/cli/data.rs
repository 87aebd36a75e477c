use tracing::warn;

use super::{interactive, FilterArgs};
use crate::browser::FilterBrowser;
use crate::dataset::{self, Dataset};
use crate::error::{CartirError, Result};
use crate::filter::FilterState;
use crate::settings::resolve_data_file;
use crate::tui::run_report_view;

impl FilterArgs {
    /// Apply the flags as successive selections, widest first, so the
    /// cascade holds. A calle needs a macro bloque and a zanja needs a calle.
    pub fn to_state(&self) -> Result<FilterState> {
        if self.street.is_some() && self.section.is_none() {
            return Err(CartirError::Filter(
                "--street requires --section (calles are chosen within a macro bloque)".into(),
            ));
        }
        if self.trench.is_some() && self.street.is_none() {
            return Err(CartirError::Filter(
                "--trench requires --street (zanjas are chosen within a calle)".into(),
            ));
        }
        let mut state = FilterState::default();
        if let Some(shift) = &self.shift {
            state.select_shift(shift.as_str());
        }
        if let Some(section) = &self.section {
            state.select_section(section.as_str());
        }
        if let Some(street) = &self.street {
            state.select_street(street.as_str());
        }
        if let Some(trench) = &self.trench {
            state.select_trench(trench.as_str());
        }
        Ok(state)
    }
}

/// Log selections that match nothing in the dataset; the view will be empty.
pub(crate) fn warn_unknown(ds: &Dataset, state: &FilterState) {
    let checks = [
        ("turno", &state.shift, ds.shifts()),
        ("macro bloque", &state.section, ds.sections()),
        ("calle", &state.street, ds.streets(&state.section)),
        ("zanja", &state.trench, ds.trenches(&state.section, &state.street)),
    ];
    for (name, value, options) in checks {
        if !value.is_empty() && !options.contains(value) {
            warn!("no records with {name} {value:?}");
        }
    }
}

pub fn run(data: Option<&str>, filters: &FilterArgs, text: bool) -> Result<()> {
    let state = filters.to_state()?;
    let ds = dataset::load(&resolve_data_file(data))?;
    warn_unknown(&ds, &state);

    if interactive(text) {
        let mut browser = FilterBrowser::new(ds.records, state);
        return run_report_view(&mut browser);
    }

    let view = ds.view(&state);
    println!("{}", super::text::format_records(&view, &state));
    Ok(())
}
