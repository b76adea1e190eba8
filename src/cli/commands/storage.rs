use crate::cli::parser::Commands;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::persist::PartStatus;
use crate::ui::messages::{info, success, warning};

fn describe(part: PartStatus) -> &'static str {
    match part {
        PartStatus::Restored => "restored",
        PartStatus::Absent => "absent (defaults)",
        PartStatus::Corrupt => "unreadable (defaults)",
    }
}

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Storage {
        save,
        restore,
        clear,
    } = cmd
    {
        if *save {
            let session = ws.restore()?;
            ws.persist(&session)?;
            success(format!(
                "Saved {} events and settings to local storage.",
                session.store.len()
            ));
            ws.log("storage_save", "", &format!("{} events", session.store.len()));
        } else if *restore {
            let restored = ws.load_snapshot()?;
            if restored.is_empty() {
                info("Local storage holds no session; a new one starts with defaults.");
            }
            info(format!("Events:   {}", describe(restored.events)));
            info(format!("Settings: {}", describe(restored.settings)));
            info(format!(
                "{} events, view {}",
                restored.session.store.len(),
                restored.session.settings.timeline_view
            ));
        } else if *clear {
            ws.clear_snapshot()?;
            warning("Local storage cleared; the next command starts a fresh session.");
            ws.log("storage_clear", "", "snapshot removed");
        }
    }
    Ok(())
}
