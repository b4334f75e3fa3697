use std::io::Write;

use anyhow::Result;

use crate::cli::Command;
use crate::overlay::Overlay;
use crate::types::RepoId;

impl Command {
    pub fn run(&self, overlay: &Overlay) -> Result<()> {
        let stdout = std::io::stdout();
        self.run_to(overlay, &mut stdout.lock())
    }

    /// Runs the command against the store, printing results to `out`.
    pub fn run_to<W: Write>(&self, overlay: &Overlay, out: &mut W) -> Result<()> {
        match self {
            Command::Show { id } => {
                let id = parse_id(id)?;
                match overlay.read(&id)?.text() {
                    Some(text) => writeln!(out, "{text}")?,
                    None => writeln!(out, "(no override)")?,
                }
            }
            Command::Set { id, text } => {
                let id = parse_id(id)?;
                let record = overlay.write(&id, text)?;
                log::info!("override stored for repository {}", id);
                writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
            }
            Command::Clear { id } => {
                let id = parse_id(id)?;
                overlay.remove(&id)?;
                log::info!("override cleared for repository {}", id);
            }
            Command::Export => {
                let all = overlay.overrides()?;
                writeln!(out, "{}", serde_json::to_string_pretty(&all)?)?;
            }
        }
        Ok(())
    }
}

fn parse_id(raw: &str) -> Result<RepoId> {
    Ok(raw.parse::<RepoId>()?)
}
