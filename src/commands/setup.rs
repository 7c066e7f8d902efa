use std::path::Path;

use anyhow::Result;
use console::style;

use super::Workspace;
use crate::config::{Checklist, Settings, CHECKLIST_FILE, CONFIG_FILE, MOB_DIR};

pub fn handle_setup(workspace: &Workspace) -> Result<i32> {
    report(CONFIG_FILE, Settings::write_default(&workspace.workdir)?);
    report(CHECKLIST_FILE, Checklist::write_default(&workspace.workdir)?);
    Ok(0)
}

fn report(file: &str, written: bool) {
    let path = Path::new(MOB_DIR).join(file);
    if written {
        println!(
            "{} Wrote {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        );
    } else {
        println!(
            "{} Kept existing {}",
            style("⚠").yellow().bold(),
            style(path.display()).cyan()
        );
    }
}
