use crate::cli::commands::{parse_cli_date, read_image};
use crate::cli::parser::Commands;
use crate::core::add::AddLogic;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Add { title, date: d, image } = cmd {
        let day = parse_cli_date(d)?;
        let img = image.as_deref().map(read_image).transpose()?;

        let mut session = ws.restore()?;
        let id = AddLogic::apply(&mut session, title, day, img, date::today())?;
        ws.persist(&session)?;

        let title = title.trim();
        success(format!("Added '{}' on {} [{}]", title, day, id.short()));
        ws.log("add", id.short(), &format!("Added '{}' on {}", title, day));
    }
    Ok(())
}
