use crate::cli::parser::Commands;
use crate::core::del::DeleteLogic;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success, warning};

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut session = ws.restore()?;
        let ev = session.store.resolve(id)?;
        let target = ev.id.clone();

        if !*yes {
            warning(format!(
                "Delete '{}' on {}? This action is irreversible.",
                ev.title, ev.date
            ));
            if !confirm("Confirm")? {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let removed = DeleteLogic::apply(&mut session, &target)?;
        ws.persist(&session)?;

        success(format!("Deleted '{}' on {}", removed.title, removed.date));
        ws.log(
            "del",
            target.short(),
            &format!("Deleted '{}' on {}", removed.title, removed.date),
        );
    }
    Ok(())
}
