use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

const MAX_OP_WIDTH: usize = 60;

/// One row of the internal audit log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "import" => Colour::Green,
        "del" | "savepoint_delete" | "storage_clear" => Colour::Red,
        "edit" | "settings" => Colour::Yellow,
        "export" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("savepoint") || other.starts_with("storage") => Colour::Blue,
        _ => Colour::White,
    }
}

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

pub struct LogLogic;

impl LogLogic {
    pub fn entries(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);
            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get(3)?,
                message: row.get(4)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::entries(pool)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;

        let labels: Vec<String> = entries
            .iter()
            .map(|e| {
                let label = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                if label.chars().count() > MAX_OP_WIDTH {
                    let mut s: String = label.chars().take(MAX_OP_WIDTH - 3).collect();
                    s.push_str("...");
                    s
                } else {
                    label
                }
            })
            .collect();

        let op_w = labels.iter().map(|l| l.chars().count()).max().unwrap_or(10);
        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (e, label) in entries.iter().zip(labels) {
            let color = color_for_operation(&e.operation);
            // Only the operation word is coloured.
            let painted = match label.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(label.as_str()).to_string(),
            };
            let visible = strip_ansi(&ansi, &painted).chars().count();
            let padding = " ".repeat(op_w.saturating_sub(visible));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id, e.date, painted, padding, e.message
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::log::ttlog;

    #[test]
    fn entries_come_back_in_insertion_order() {
        let pool = DbPool::in_memory().unwrap();
        ttlog(&pool.conn, "add", "abc12345", "Added 'Launch'").unwrap();
        ttlog(&pool.conn, "export", "out.csv", "1 events").unwrap();

        let entries = LogLogic::entries(&pool).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, "add");
        assert_eq!(entries[1].target, "out.csv");
    }

    #[test]
    fn ansi_codes_are_stripped() {
        let re = Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
        let painted = Colour::Red.paint("del").to_string();
        assert_eq!(strip_ansi(&re, &painted), "del");
    }
}
