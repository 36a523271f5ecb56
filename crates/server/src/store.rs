//! Append-only persistence for generated roadmaps.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use roadmap_core::model::{Maturity, OrgSize, RoadmapResult, RoadmapSummary};

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the requested id.
    #[error("roadmap {0} not found")]
    NotFound(String),
    /// Backend failure: connection, SQL or row decoding.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Backend(e.into())
    }
}

/// Record store for generated roadmaps.
///
/// Append-only: `save` inserts a whole record atomically and no update or
/// delete is exposed. Listing is newest first.
pub trait Store: Send + Sync {
    /// Durably write the whole record, or nothing.
    fn save(&self, result: &RoadmapResult) -> Result<(), StoreError>;
    /// Fetch one record by id.
    fn get(&self, id: &str) -> Result<RoadmapResult, StoreError>;
    /// Summaries of every record, newest first.
    fn list(&self) -> Result<Vec<RoadmapSummary>, StoreError>;
}

/// Sqlite-backed store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) and migrate the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let conn = Connection::open(path)
            .with_context(|| format!("opening sqlite db {}", path.display()))?;
        conn.execute_batch(include_str!("../migrations/0001_init.sql"))
            .context("applying schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl Store for SqliteStore {
    fn save(&self, result: &RoadmapResult) -> Result<(), StoreError> {
        let goals_json = serde_json::to_string(&result.goals)
            .context("encoding goals")?;
        let phases_json = serde_json::to_string(&result.phases)
            .context("encoding phases")?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO roadmaps(id, organization, org_size, industry, maturity, goals_json, phases_json, chart, created_at_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                result.id,
                result.organization,
                result.size.as_str(),
                result.industry,
                result.maturity.as_str(),
                goals_json,
                phases_json,
                result.chart,
                result.created_at_ms,
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<RoadmapResult, StoreError> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT organization, org_size, industry, maturity, goals_json, phases_json, chart, created_at_ms
                 FROM roadmaps WHERE id = ?1",
                params![id],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, String>(3)?,
                        r.get::<_, String>(4)?,
                        r.get::<_, String>(5)?,
                        r.get::<_, String>(6)?,
                        r.get::<_, i64>(7)?,
                    ))
                },
            )
            .optional()?;

        let Some((organization, size, industry, maturity, goals_json, phases_json, chart, created_at_ms)) = row
        else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        Ok(RoadmapResult {
            id: id.to_string(),
            organization,
            size: parse_size(&size)?,
            industry,
            maturity: Maturity::parse(&maturity)
                .ok_or_else(|| anyhow!("stored maturity {maturity:?} is not recognized"))?,
            goals: serde_json::from_str(&goals_json).context("decoding goals")?,
            phases: serde_json::from_str(&phases_json).context("decoding phases")?,
            chart,
            created_at_ms,
        })
    }

    fn list(&self) -> Result<Vec<RoadmapSummary>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, organization, industry, org_size, created_at_ms
             FROM roadmaps ORDER BY created_at_ms DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, i64>(4)?,
            ))
        })?;

        let mut summaries = vec![];
        for row in rows {
            let (id, organization, industry, size, created_at_ms) = row?;
            summaries.push(RoadmapSummary {
                id,
                organization,
                industry,
                size: parse_size(&size)?,
                created_at_ms,
            });
        }
        Ok(summaries)
    }
}

fn parse_size(wire: &str) -> Result<OrgSize, StoreError> {
    OrgSize::parse(wire)
        .ok_or_else(|| StoreError::Backend(anyhow!("stored org size {wire:?} is not recognized")))
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemStore {
    records: Mutex<Vec<RoadmapResult>>,
}

impl MemStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemStore {
    fn save(&self, result: &RoadmapResult) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.id == result.id) {
            return Err(StoreError::Backend(anyhow!(
                "duplicate roadmap id {}",
                result.id
            )));
        }
        records.push(result.clone());
        Ok(())
    }

    fn get(&self, id: &str) -> Result<RoadmapResult, StoreError> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<RoadmapSummary>, StoreError> {
        let records = self.records.lock().unwrap();
        let mut summaries: Vec<RoadmapSummary> = records
            .iter()
            .map(|r| RoadmapSummary {
                id: r.id.clone(),
                organization: r.organization.clone(),
                industry: r.industry.clone(),
                size: r.size,
                created_at_ms: r.created_at_ms,
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.created_at_ms
                .cmp(&a.created_at_ms)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(summaries)
    }
}
