use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde_str;

/// Handle the `init` command
///
/// Creates the config directory and file, the save-point directory and the
/// local storage database with its tables.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let mut cfg = Config::init_all(cli.db.as_deref().map(expand_tilde_str), cli.test)?;
    if let Some(dir) = &cli.save_dir {
        cfg.save_points_dir = expand_tilde_str(dir);
    }

    println!("⚙️  Initializing rTimeline…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", cfg.database);
    println!("💾 Save points: {}", cfg.save_points_dir);

    let ws = Workspace::open(&cfg)?;
    ws.log(
        "init",
        "",
        &format!("Database initialized at {}", cfg.database),
    );

    println!("🎉 rTimeline initialization completed!");
    Ok(())
}
