use crate::config::Config;
use crate::core::session::Session;
use crate::db::kv::SqliteKv;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::view_mode::ViewMode;
use crate::persist::save_point::SavePointRepo;
use crate::persist::snapshot::{PartStatus, RETRY_DELAY, Restored, SnapshotGateway};
use crate::ui::messages::warning;

/// Per-invocation context: the local storage database, the save-point
/// directory and the layout used for brand-new sessions.
pub struct Workspace {
    pool: DbPool,
    save_points: SavePointRepo,
    default_view: ViewMode,
}

impl Workspace {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::new(&cfg.database)?,
            save_points: SavePointRepo::new(&cfg.save_points_dir),
            default_view: cfg.default_view,
        })
    }

    pub fn with_parts(pool: DbPool, save_points: SavePointRepo, default_view: ViewMode) -> Self {
        Self {
            pool,
            save_points,
            default_view,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn save_points(&self) -> &SavePointRepo {
        &self.save_points
    }

    pub fn default_view(&self) -> ViewMode {
        self.default_view
    }

    fn gateway(&self) -> SnapshotGateway<SqliteKv<'_>> {
        SnapshotGateway::new(SqliteKv::new(&self.pool))
    }

    /// Raw snapshot load, with the part-by-part status.
    pub fn load_snapshot(&self) -> AppResult<Restored> {
        self.gateway().load_with_retry(self.default_view, RETRY_DELAY)
    }

    /// Session restored from the local snapshot; unreadable halves fall
    /// back to defaults with a warning.
    pub fn restore(&self) -> AppResult<Session> {
        let restored = self.load_snapshot()?;
        if restored.events == PartStatus::Corrupt {
            warning("Stored events could not be read; starting with an empty timeline.");
        }
        if restored.settings == PartStatus::Corrupt {
            warning("Stored settings could not be read; using defaults.");
        }
        Ok(restored.session)
    }

    /// Mirror the session into local storage.
    pub fn persist(&self, session: &Session) -> AppResult<()> {
        self.gateway().save(session)
    }

    pub fn clear_snapshot(&self) -> AppResult<()> {
        self.gateway().clear()
    }

    pub fn log(&self, operation: &str, target: &str, message: &str) {
        ttlog_soft(&self.pool.conn, operation, target, message);
    }
}
