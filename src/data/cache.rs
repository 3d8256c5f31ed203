use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::Result;

use super::loader;
use super::model::{CountryTable, SalaryTable, StatusTable};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// CachedTable – load once, share forever
// ---------------------------------------------------------------------------

type LoadFn<T> = fn(&Path) -> Result<T>;

/// Memoises the result of loading one file.
///
/// The first successful [`CachedTable::get`] reads the file; later calls
/// return the same `Arc` without touching the disk. A cached table is never
/// invalidated: the source files are static for the lifetime of the process.
/// A failed load is not cached, so the next call retries.
pub struct CachedTable<T> {
    path: PathBuf,
    load: LoadFn<T>,
    cell: OnceLock<Arc<T>>,
}

impl<T> CachedTable<T> {
    pub fn new(path: impl Into<PathBuf>, load: LoadFn<T>) -> Self {
        Self {
            path: path.into(),
            load,
            cell: OnceLock::new(),
        }
    }

    /// Whether the file has been read already.
    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get(&self) -> Result<Arc<T>> {
        if let Some(table) = self.cell.get() {
            log::debug!("cache hit for {}", self.path.display());
            return Ok(Arc::clone(table));
        }
        let table = Arc::new((self.load)(&self.path)?);
        Ok(Arc::clone(self.cell.get_or_init(|| table)))
    }
}

// ---------------------------------------------------------------------------
// DataStore – one cached table per graph
// ---------------------------------------------------------------------------

/// The three source tables behind the dashboard.
pub struct DataStore {
    pub salaries: CachedTable<SalaryTable>,
    pub status: CachedTable<StatusTable>,
    pub countries: CachedTable<CountryTable>,
}

/// Loaded tables, shared with the UI state.
#[derive(Debug, Clone)]
pub struct Tables {
    pub salaries: Arc<SalaryTable>,
    pub status: Arc<StatusTable>,
    pub countries: Arc<CountryTable>,
}

impl DataStore {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            salaries: CachedTable::new(&config.salaries_path, loader::load_salaries),
            status: CachedTable::new(&config.status_path, loader::load_status),
            countries: CachedTable::new(&config.countries_path, loader::load_countries),
        }
    }

    /// Load (or fetch from cache) all three tables.
    pub fn tables(&self) -> Result<Tables> {
        Ok(Tables {
            salaries: self.salaries.get()?,
            status: self.status.get()?,
            countries: self.countries.get()?,
        })
    }
}
