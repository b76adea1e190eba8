use crate::cli::parser::Commands;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let path = expand_tilde(file);
        let format = match format {
            Some(f) => *f,
            None => ExportFormat::from_path(&path)?,
        };

        let session = ws.restore()?;
        let written = ExportLogic::export(&session, format, &path, *force)?;

        if written > 0 {
            ws.log(
                "export",
                file,
                &format!("{} events as {}", written, format.as_str()),
            );
        }
    }
    Ok(())
}
