//! StorageEngine — owns the write connection, runs migrations at open,
//! implements ICompanyStore.

use std::path::Path;

use peermatch_core::errors::{MatchError, MatchResult};
use peermatch_core::models::Company;
use peermatch_core::traits::ICompanyStore;
use peermatch_core::Isin;

use crate::migrations;
use crate::pool::{pragmas, WriteConnection};
use crate::queries;

/// The identity store engine. Opens the database, applies migrations,
/// and provides the full `ICompanyStore` interface.
pub struct StorageEngine {
    writer: WriteConnection,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> MatchResult<Self> {
        let writer = WriteConnection::open(path)?;
        let engine = Self { writer };
        engine.initialize(true)?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> MatchResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        let engine = Self { writer };
        engine.initialize(false)?;
        Ok(engine)
    }

    /// Existence probe: whether a database file is present at `path`.
    /// Used by callers that must not implicitly create the store.
    pub fn probe(path: &Path) -> bool {
        path.exists()
    }

    /// Run migrations; verify the journal mode on file-backed databases.
    fn initialize(&self, file_backed: bool) -> MatchResult<()> {
        self.writer.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            if file_backed && !pragmas::verify_wal_mode(conn)? {
                tracing::warn!("WAL journal mode not active");
            }
            Ok(())
        })
    }
}

impl ICompanyStore for StorageEngine {
    fn get_by_isin(&self, isin: &Isin) -> MatchResult<Company> {
        self.writer
            .with_conn(|conn| queries::company_lookup::get_by_isin(conn, isin))?
            .ok_or_else(|| MatchError::CompanyNotFound {
                key: isin.as_str().to_string(),
            })
    }

    fn get_by_isins(&self, isins: &[Isin]) -> MatchResult<Vec<(Isin, Company)>> {
        self.writer
            .with_conn(|conn| queries::company_lookup::get_by_isins(conn, isins))
    }

    fn get_by_lei(&self, lei: &str) -> MatchResult<Company> {
        self.writer
            .with_conn(|conn| queries::company_lookup::get_by_lei(conn, lei))?
            .ok_or_else(|| MatchError::CompanyNotFound {
                key: lei.to_string(),
            })
    }

    fn enrich_company(&self, lei: &str, description: &str, labels: &[String]) -> MatchResult<()> {
        self.writer
            .with_conn(|conn| queries::enrichment_ops::enrich_company(conn, lei, description, labels))
    }

    fn mark_enrichment_attempted(&self, lei: &str) -> MatchResult<()> {
        self.writer
            .with_conn(|conn| queries::enrichment_ops::mark_enrichment_attempted(conn, lei))
    }

    fn insert_company(&self, company: &Company) -> MatchResult<()> {
        self.writer
            .with_conn(|conn| queries::reference_load::insert_company(conn, company))
    }

    fn map_isin(&self, isin: &Isin, lei: &str) -> MatchResult<()> {
        self.writer
            .with_conn(|conn| queries::reference_load::map_isin(conn, isin, lei))
    }

    fn list_all(&self, limit: usize) -> MatchResult<Vec<Company>> {
        self.writer
            .with_conn(|conn| queries::company_lookup::list_all(conn, limit))
    }
}
