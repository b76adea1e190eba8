use crate::cli::parser::Commands;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::List { ids } = cmd {
        let session = ws.restore()?;
        let events = session.store.list_sorted();

        if events.is_empty() {
            info("No events yet. Add one with `rtimeline add` or `rtimeline import`.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("id"),
            Column::new("date"),
            Column::capped("title", 60),
            Column::new("image"),
        ]);
        for ev in &events {
            let id = if *ids { ev.id.as_str() } else { ev.id.short() };
            let image = match &ev.image {
                Some(img) => format!("{} ({} B)", img.extension(), img.len()),
                None => "-".to_string(),
            };
            table.add_row(vec![id.to_string(), ev.date_str(), ev.title.clone(), image]);
        }

        println!("📅 {}\n", session.settings.timeline_title);
        print!("{}", table.render());
        println!("\n{} event(s)", events.len());
    }
    Ok(())
}
