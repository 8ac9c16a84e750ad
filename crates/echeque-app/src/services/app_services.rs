// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application services — resolves the data directory, loads the persisted
// config, and opens the SQLite-backed check service the commands run
// against.

use std::path::{Path, PathBuf};

use echeque_core::error::Result;
use echeque_core::AppConfig;
use echeque_ledger::CheckService;
use echeque_security::SqliteStore;
use tracing::{info, warn};

use super::data_dir;

const DB_FILE: &str = "echeque.db";
const CONFIG_FILE: &str = "config.json";

pub struct AppServices {
    checks: CheckService<SqliteStore>,
    data_dir: PathBuf,
}

impl AppServices {
    /// Open the ledger database and config in the data directory.
    pub fn init(explicit_dir: Option<&Path>) -> Result<Self> {
        let dir = data_dir::data_dir(explicit_dir)?;
        info!(path = %dir.display(), "initialising app services");

        // Load persisted config or use defaults
        let config = load_config(&dir).unwrap_or_default();
        let store = SqliteStore::open(dir.join(DB_FILE))?;
        let checks = CheckService::open(store, config)?;

        Ok(Self {
            checks,
            data_dir: dir,
        })
    }

    pub fn checks(&self) -> &CheckService<SqliteStore> {
        &self.checks
    }

    pub fn checks_mut(&mut self) -> &mut CheckService<SqliteStore> {
        &mut self.checks
    }

    pub fn config(&self) -> &AppConfig {
        self.checks.config()
    }

    /// Persist the config.  Takes effect the next time services are opened.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        persist_config(&self.data_dir, config)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

// -- Config file persistence -------------------------------------------------

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
