//! Record store: a repository abstraction over courses, assignments, and study sessions
//!
//! The grade engine never touches storage. Callers read records out of a
//! [`Repository`], compute on the borrowed values, and write changes back.

use crate::core::models::{Assignment, Course, StudySession};
use crate::core::records::{self, Normalized, RecordError, Snapshot};
use std::path::Path;
use thiserror::Error;

/// Errors raised by repository operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with the requested id exists
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind
        kind: &'static str,
        /// Requested id
        id: u32,
    },
}

/// A storable record with an integer identity
pub trait Record: Clone {
    /// Kind label used in error messages
    const KIND: &'static str;

    /// Record id
    fn id(&self) -> u32;

    /// Replace the record id
    fn set_id(&mut self, id: u32);
}

impl Record for Course {
    const KIND: &'static str = "Course";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

impl Record for Assignment {
    const KIND: &'static str = "Assignment";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

impl Record for StudySession {
    const KIND: &'static str = "Study session";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// CRUD access to one kind of record
///
/// Reads return owned copies, so callers can never mutate stored records
/// except through [`update`](Repository::update).
pub trait Repository<T: Record> {
    /// All records in insertion order
    fn get_all(&self) -> Vec<T>;

    /// One record by id
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no record has `id`.
    fn get_by_id(&self, id: u32) -> Result<T, StoreError>;

    /// Insert a record, assigning it the next id (highest existing id + 1)
    fn create(&mut self, record: T) -> T;

    /// Apply `changes` to the record with `id`. The id itself cannot be changed.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no record has `id`.
    fn update(&mut self, id: u32, changes: &mut dyn FnMut(&mut T)) -> Result<T, StoreError>;

    /// Remove the record with `id`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no record has `id`.
    fn delete(&mut self, id: u32) -> Result<(), StoreError>;
}

/// Vector-backed repository
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryRepository<T> {
    records: Vec<T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    /// Create an empty repository
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a repository holding `records` as-is
    #[must_use]
    pub const fn from_records(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Borrow the stored records
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Consume the repository, returning its records
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the repository is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: u32) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound { kind: T::KIND, id })
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn get_all(&self) -> Vec<T> {
        self.records.clone()
    }

    fn get_by_id(&self, id: u32) -> Result<T, StoreError> {
        self.position(id).map(|idx| self.records[idx].clone())
    }

    fn create(&mut self, mut record: T) -> T {
        let next_id = self.records.iter().map(Record::id).max().map_or(1, |max| max + 1);
        record.set_id(next_id);
        self.records.push(record.clone());
        record
    }

    fn update(&mut self, id: u32, changes: &mut dyn FnMut(&mut T)) -> Result<T, StoreError> {
        let idx = self.position(id)?;
        let record = &mut self.records[idx];
        changes(record);
        record.set_id(id);
        Ok(record.clone())
    }

    fn delete(&mut self, id: u32) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        self.records.remove(idx);
        Ok(())
    }
}

/// All repositories backing the application
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Course repository
    pub courses: InMemoryRepository<Course>,
    /// Assignment repository
    pub assignments: InMemoryRepository<Assignment>,
    /// Study session repository
    pub study_sessions: InMemoryRepository<StudySession>,
}

impl Store {
    /// Build a store from a normalized snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            courses: InMemoryRepository::from_records(snapshot.courses),
            assignments: InMemoryRepository::from_records(snapshot.assignments),
            study_sessions: InMemoryRepository::from_records(snapshot.study_sessions),
        }
    }

    /// Copy the current contents out as a snapshot
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            courses: self.courses.get_all(),
            assignments: self.assignments.get_all(),
            study_sessions: self.study_sessions.get_all(),
        }
    }

    /// Load a snapshot file into a store, returning normalization warnings alongside it
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or normalized.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, Vec<String>), RecordError> {
        let Normalized { snapshot, warnings } = records::load_snapshot(path)?;
        Ok((Self::from_snapshot(snapshot), warnings))
    }

    /// Persist the store to a snapshot file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RecordError> {
        records::save_snapshot(&self.to_snapshot(), path)
    }
}
