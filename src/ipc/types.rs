use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::config::ScheduleConfig;
use crate::grid::RoutineGrid;
use crate::palette::Palette;
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// One user's scheduling session. Owned exclusively by the daemon process;
/// every request runs to completion before the next is read, so there is no
/// overlap between mutations.
pub struct Session {
    pub config: ScheduleConfig,
    pub catalog: Catalog,
    pub grid: RoutineGrid,
    pub palette: Palette,
}

impl Session {
    pub fn new() -> Self {
        Session {
            config: ScheduleConfig::default(),
            catalog: Catalog::new(),
            grid: RoutineGrid::new(),
            palette: Palette::new(),
        }
    }
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    /// Persistence mirror; absent until a workspace is selected. The session
    /// is authoritative either way.
    pub db: Option<Connection>,
    pub session: Session,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            workspace: None,
            db: None,
            session: Session::new(),
        }
    }
}
