use super::text::format_options;
use crate::dataset;
use crate::error::{CartirError, Result};
use crate::settings::resolve_data_file;

pub fn run(data: Option<&str>, section: Option<String>, street: Option<String>) -> Result<()> {
    if street.is_some() && section.is_none() {
        return Err(CartirError::Filter(
            "--street requires --section (calles are chosen within a macro bloque)".into(),
        ));
    }
    let ds = dataset::load(&resolve_data_file(data))?;
    let section = section.unwrap_or_default();
    let street = street.unwrap_or_default();

    let mut groups = vec![("Turno", ds.shifts()), ("Macro Bloque", ds.sections())];
    if !section.is_empty() {
        groups.push(("Calle", ds.streets(&section)));
    }
    if !street.is_empty() {
        groups.push(("Zanja", ds.trenches(&section, &street)));
    }
    println!("{}", format_options(&groups));
    Ok(())
}
