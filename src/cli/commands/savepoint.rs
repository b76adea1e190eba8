use crate::cli::parser::{Commands, SavePointAction};
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Savepoint { action } = cmd {
        let repo = ws.save_points();
        match action {
            SavePointAction::Create { name } => {
                let session = ws.restore()?;
                let handle = repo.create(name, &session)?;
                success(format!(
                    "Save point '{}' created: {} ({} image files)",
                    handle.name,
                    handle.path.display(),
                    handle.images.len()
                ));
                ws.log(
                    "savepoint_create",
                    &handle.name,
                    &format!("{} events", session.store.len()),
                );
            }
            SavePointAction::List => {
                let list = repo.list()?;
                if list.is_empty() {
                    info(format!("No save points in {}", repo.dir().display()));
                    return Ok(());
                }
                let mut table = Table::new(vec![
                    Column::new("name"),
                    Column::new("created"),
                    Column::new("events"),
                    Column::capped("title", 40),
                ]);
                for sp in list {
                    table.add_row(vec![
                        sp.name,
                        sp.created_at,
                        sp.event_count.to_string(),
                        sp.title,
                    ]);
                }
                print!("{}", table.render());
            }
            SavePointAction::Load { name } => {
                let session = repo.load(name)?;
                ws.persist(&session)?;
                success(format!(
                    "Loaded save point '{}': {} events",
                    name,
                    session.store.len()
                ));
                ws.log(
                    "savepoint_load",
                    name,
                    &format!("{} events", session.store.len()),
                );
            }
            SavePointAction::Delete { name, yes } => {
                if !*yes {
                    warning(format!("Delete save point '{name}' and its images?"));
                    if !confirm("Confirm")? {
                        info("Operation cancelled.");
                        return Ok(());
                    }
                }
                let removed = repo.delete(name)?;
                if removed.is_empty() {
                    info(format!("No save point named '{name}'; nothing removed."));
                } else {
                    success(format!("Deleted save point '{name}' ({} paths)", removed.len()));
                    ws.log(
                        "savepoint_delete",
                        name,
                        &format!("{} paths removed", removed.len()),
                    );
                }
            }
        }
    }
    Ok(())
}
