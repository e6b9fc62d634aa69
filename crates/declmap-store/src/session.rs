//! Unit of work
//!
//! A `UnitOfWork` owns the records it tracks and hands out `RecordHandle`s.
//! Records are staged with `add`, written in one transaction by `commit`,
//! and mutated through `set` / `modify`, which record changed columns in an
//! explicit change-tracking set. Mutations after commit stay in memory until
//! the next `commit`.
//!
//! Logging follows the operation boundary convention:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure

use std::collections::BTreeSet;
use std::time::Instant;

use declmap_core::{
    log_op_end, log_op_error, log_op_start, DeclMapError, ExError, FieldValue, Mapped,
};

use crate::engine::Engine;
use crate::errors::{from_rusqlite, Result};
use crate::repo::SqliteRepo;

/// Reference to a record tracked by a unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle(usize);

/// Lifecycle state of a tracked record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Staged for insertion, not yet committed
    Pending,
    /// Committed; has a primary key
    Persistent,
    /// Discarded by `rollback` before it was ever committed
    Detached,
}

#[derive(Debug)]
struct Tracked<E> {
    record: E,
    state: RecordState,
    dirty: BTreeSet<&'static str>,
}

/// Short-lived transactional context over one engine
pub struct UnitOfWork<'e, E: Mapped> {
    engine: &'e mut Engine,
    records: Vec<Tracked<E>>,
    ever_staged: bool,
}

impl<'e, E: Mapped> UnitOfWork<'e, E> {
    pub fn new(engine: &'e mut Engine) -> Self {
        Self {
            engine,
            records: Vec::new(),
            ever_staged: false,
        }
    }

    fn tracked(&self, handle: RecordHandle) -> Result<&Tracked<E>> {
        self.records
            .get(handle.0)
            .ok_or_else(|| DeclMapError::UnknownHandle { handle: handle.0 }.into())
    }

    fn tracked_mut(&mut self, handle: RecordHandle) -> Result<&mut Tracked<E>> {
        self.records
            .get_mut(handle.0)
            .ok_or_else(|| DeclMapError::UnknownHandle { handle: handle.0 }.into())
    }

    /// Stage a record for insertion
    ///
    /// Nothing reaches the backend until [`commit`](Self::commit).
    pub fn add(&mut self, record: E) -> RecordHandle {
        let handle = RecordHandle(self.records.len());
        self.records.push(Tracked {
            record,
            state: RecordState::Pending,
            dirty: BTreeSet::new(),
        });
        self.ever_staged = true;
        tracing::debug!(
            table = E::table().name,
            handle = handle.0,
            "staged record"
        );
        handle
    }

    /// The live, in-memory record
    pub fn get(&self, handle: RecordHandle) -> Result<&E> {
        Ok(&self.tracked(handle)?.record)
    }

    pub fn state(&self, handle: RecordHandle) -> Result<RecordState> {
        Ok(self.tracked(handle)?.state)
    }

    /// Set one field by name
    ///
    /// On a persistent record, a changed value is added to the change-tracking
    /// set; it is written by the next `commit`.
    ///
    /// # Errors
    ///
    /// Propagates `UnknownField`, `TypeMismatch` and `ImmutableField` from the
    /// entity, and `UnknownHandle` for a foreign handle.
    pub fn set(
        &mut self,
        handle: RecordHandle,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<()> {
        let tracked = self.tracked_mut(handle)?;
        let before = tracked.record.get_field(field)?;
        let value = value.into();
        tracked.record.set_field(field, value.clone())?;

        if tracked.state == RecordState::Persistent && before != value {
            if let Some(column) = E::table().column(field) {
                tracked.dirty.insert(column.name);
            }
        }
        Ok(())
    }

    /// Mutate a record in place through a closure
    ///
    /// Columns whose values differ afterwards are added to the change-tracking
    /// set. A closure that changes the primary key of a persistent record is
    /// rejected and the record restored.
    pub fn modify<F>(&mut self, handle: RecordHandle, f: F) -> Result<()>
    where
        F: FnOnce(&mut E),
    {
        let tracked = self.tracked_mut(handle)?;
        let snapshot = tracked.record.clone();
        let before = tracked.record.column_values()?;

        f(&mut tracked.record);

        if tracked.state == RecordState::Persistent
            && tracked.record.primary_key() != snapshot.primary_key()
        {
            tracked.record = snapshot;
            return Err(DeclMapError::ImmutableField {
                entity: tracked.record.type_name().to_string(),
                field: "id".to_string(),
            }
            .into());
        }

        if tracked.state == RecordState::Persistent {
            let after = tracked.record.column_values()?;
            for ((name, old), (_, new)) in before.iter().zip(after.iter()) {
                if old != new {
                    tracked.dirty.insert(*name);
                }
            }
        }
        Ok(())
    }

    /// Whether the record has changes not yet committed
    pub fn is_dirty(&self, handle: RecordHandle) -> Result<bool> {
        let tracked = self.tracked(handle)?;
        Ok(tracked.state == RecordState::Pending || !tracked.dirty.is_empty())
    }

    /// Columns changed since the last commit, in name order
    pub fn dirty_fields(&self, handle: RecordHandle) -> Result<Vec<&'static str>> {
        Ok(self.tracked(handle)?.dirty.iter().copied().collect())
    }

    /// Number of records staged and not yet committed
    pub fn pending_count(&self) -> usize {
        self.records
            .iter()
            .filter(|t| t.state == RecordState::Pending)
            .count()
    }

    fn dirty_count(&self) -> usize {
        self.records
            .iter()
            .filter(|t| t.state == RecordState::Persistent && !t.dirty.is_empty())
            .count()
    }

    /// Write all staged records and tracked changes in one transaction
    ///
    /// Staged records get backend-assigned primary keys. Returns the number
    /// of rows written. With nothing new to write this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotStaged` if nothing was ever added to this unit of work,
    /// and `Persistence` if the backend rejects a write; in that case the
    /// transaction is rolled back and in-memory state is unchanged.
    pub fn commit(&mut self) -> Result<usize> {
        log_op_start!(
            "commit",
            table = E::table().name,
            staged = self.pending_count(),
            dirty = self.dirty_count()
        );
        let start = Instant::now();

        let rows = self.commit_impl().map_err(|e| {
            log_op_error!(
                "commit",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "commit",
            duration_ms = start.elapsed().as_millis() as u64,
            rows = rows
        );
        Ok(rows)
    }

    fn commit_impl(&mut self) -> Result<usize> {
        if !self.ever_staged {
            return Err(DeclMapError::NotStaged.into());
        }
        if self.pending_count() == 0 && self.dirty_count() == 0 {
            return Ok(0);
        }

        let tx = self
            .engine
            .connection_mut()
            .transaction()
            .map_err(from_rusqlite)?;

        let mut inserted = Vec::new();
        let mut updated = Vec::new();
        for (idx, tracked) in self.records.iter().enumerate() {
            match tracked.state {
                RecordState::Pending => {
                    let id = SqliteRepo::insert(&tx, &tracked.record)?;
                    inserted.push((idx, id));
                }
                RecordState::Persistent if !tracked.dirty.is_empty() => {
                    let id = tracked.record.primary_key().ok_or_else(|| {
                        ExError::from(DeclMapError::Internal {
                            message: "persistent record without primary key".to_string(),
                        })
                    })?;
                    let changes = tracked
                        .dirty
                        .iter()
                        .map(|name| -> Result<(&'static str, FieldValue)> {
                            Ok((*name, tracked.record.get_field(name)?))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    SqliteRepo::update::<E>(&tx, id, &changes)?;
                    updated.push(idx);
                }
                _ => {}
            }
        }

        tx.commit().map_err(from_rusqlite)?;

        // Only touch in-memory state once the transaction is durable
        for &(idx, id) in &inserted {
            let tracked = &mut self.records[idx];
            tracked.record.assign_primary_key(id)?;
            tracked.state = RecordState::Persistent;
            tracing::debug!(table = E::table().name, row_id = id, "record persisted");
        }
        for &idx in &updated {
            self.records[idx].dirty.clear();
        }

        Ok(inserted.len() + updated.len())
    }

    /// Discard staged records and uncommitted changes
    ///
    /// Pending records become detached; persistent records with tracked
    /// changes are reloaded from the backend. Returns the number of records
    /// affected.
    pub fn rollback(&mut self) -> Result<usize> {
        let mut affected = 0;
        for idx in 0..self.records.len() {
            let (state, has_changes, id) = {
                let tracked = &self.records[idx];
                (
                    tracked.state,
                    !tracked.dirty.is_empty(),
                    tracked.record.primary_key(),
                )
            };

            match (state, id) {
                (RecordState::Pending, _) => {
                    self.records[idx].state = RecordState::Detached;
                    affected += 1;
                }
                (RecordState::Persistent, Some(id)) if has_changes => {
                    if let Some(durable) = SqliteRepo::get::<E>(self.engine.connection(), id)? {
                        self.records[idx].record = durable;
                    }
                    self.records[idx].dirty.clear();
                    affected += 1;
                }
                _ => {}
            }
        }

        tracing::debug!(table = E::table().name, affected = affected, "rolled back");
        Ok(affected)
    }

    /// Read a row straight from the backend, ignoring in-memory state
    pub fn fetch(&self, id: i64) -> Result<Option<E>> {
        SqliteRepo::get::<E>(self.engine.connection(), id)
    }
}

impl<E: Mapped> Drop for UnitOfWork<'_, E> {
    fn drop(&mut self) {
        let staged = self.pending_count();
        let dirty = self.dirty_count();
        if staged > 0 || dirty > 0 {
            tracing::warn!(
                table = E::table().name,
                staged = staged,
                dirty = dirty,
                "unit of work dropped with uncommitted changes; discarding"
            );
        }
    }
}
