use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};

/// Resolve relative paths against the current directory so the setting keeps
/// working from anywhere.
fn absolute(path: &str) -> String {
    let expanded = PathBuf::from(shellexpand_path(path));
    std::fs::canonicalize(&expanded)
        .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(&expanded)))
        .unwrap_or(expanded)
        .to_string_lossy()
        .to_string()
}

pub fn run(data_file: Option<String>, export_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(f) = data_file {
        settings.data_file = absolute(&f);
    }
    if let Some(d) = export_dir {
        settings.export_dir = absolute(&d);
        std::fs::create_dir_all(&settings.export_dir)?;
    }
    save_settings(&settings)?;

    println!("Saved {}", settings_path().display());
    println!("Data file:   {}", settings.data_file);
    println!("Export dir:  {}", settings.export_dir);
    Ok(())
}
