use crate::cli::commands::{parse_cli_date, read_image};
use crate::cli::parser::Commands;
use crate::core::edit::{EditLogic, EditRequest, ImageChange};
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date;

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Edit {
        id,
        title,
        date: d,
        image,
        no_image,
    } = cmd
    {
        let image = match (image, no_image) {
            (Some(path), _) => ImageChange::Replace(read_image(path)?),
            (None, true) => ImageChange::Remove,
            (None, false) => ImageChange::Keep,
        };
        let req = EditRequest {
            title: title.clone(),
            date: d.as_deref().map(parse_cli_date).transpose()?,
            image,
        };

        let mut session = ws.restore()?;
        let target = session.store.resolve(id)?.id.clone();

        if req.title.is_none() && req.date.is_none() && matches!(req.image, ImageChange::Keep) {
            info("Nothing to change.");
            return Ok(());
        }

        EditLogic::apply(&mut session, &target, req, date::today())?;
        ws.persist(&session)?;

        if let Some(ev) = session.store.get(&target) {
            success(format!(
                "Updated [{}]: '{}' on {}",
                target.short(),
                ev.title,
                ev.date
            ));
            ws.log(
                "edit",
                target.short(),
                &format!("'{}' on {}", ev.title, ev.date),
            );
        }
    }
    Ok(())
}
