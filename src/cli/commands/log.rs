use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if *print {
            LogLogic::print_log(ws.pool())?;
        } else {
            info("Use `rtimeline log --print` to show the internal log.");
        }
    }
    Ok(())
}
