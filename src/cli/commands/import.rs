use crate::cli::parser::Commands;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::import::ImportLogic;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let path = expand_tilde(file);
        let mut session = ws.restore()?;
        let outcome = ImportLogic::run(&mut session, &path)?;

        if !outcome.accepted.is_empty() {
            ws.persist(&session)?;
        }
        ws.log(
            "import",
            file,
            &format!(
                "{} imported, {} skipped, {} duplicates",
                outcome.accepted.len(),
                outcome.skipped,
                outcome.duplicates
            ),
        );
    }
    Ok(())
}
