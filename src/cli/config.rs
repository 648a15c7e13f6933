use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_file_path, shellexpand_path};

pub fn run(export_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = export_dir {
        settings.export_dir = shellexpand_path(&dir);
        save_settings(&settings)?;
        println!("Export dir set to {}", settings.export_dir);
        return Ok(());
    }

    println!("Settings:   {}", settings_file_path().display());
    println!("Export dir: {}", settings.export_dir);
    Ok(())
}
