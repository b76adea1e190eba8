use crate::cli::parser::Commands;
use crate::core::settings::SettingsLogic;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Settings { print, set, reset } = cmd {
        let mut session = ws.restore()?;

        if *reset {
            SettingsLogic::reset(&mut session, ws.default_view());
            ws.persist(&session)?;
            success("View settings restored to defaults.");
            ws.log("settings", "reset", "defaults restored");
        } else if !set.is_empty() {
            SettingsLogic::apply(&mut session, set)?;
            ws.persist(&session)?;
            let keys: Vec<&str> = set.iter().map(|(k, _)| k.as_str()).collect();
            success(format!("Updated: {}", keys.join(", ")));
            ws.log("settings", "set", &keys.join(","));
        }

        if *print || (!*reset && set.is_empty()) {
            let mut table = Table::new(vec![Column::new("setting"), Column::capped("value", 60)]);
            for (k, v) in SettingsLogic::rows(&session.settings) {
                table.add_row(vec![k.to_string(), v]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
