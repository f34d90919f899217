//! Repositories over JSON-array collections held in a [`KvStore`].
//!
//! Every call reads the whole collection from the substrate and every mutation writes the whole
//! collection back. There is no cache in between and no index: lookups and filters are linear
//! scans, which is fine for the demo-scale data this store is meant for.

mod admins;
mod alerts;
mod guides;
mod incidents;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clock::{format_timestamp, unix_millis, Clock, SystemClock};
use crate::error::AppError;
use crate::ids::record_id;
use crate::kv::KvStore;

pub use admins::RegionalAdminRepository;
pub use alerts::AlertRepository;
pub use guides::GuideRepository;
pub use incidents::{IncidentRepository, IncidentStats};

/// A record kind persisted as one JSON array under its own key.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION_KEY: &'static str;
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
}

/// Identity assigned to a record when it is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStamp {
    pub id: String,
    pub created_at: String,
}

/// Entry point: owns the substrate and the clock, hands out repositories borrowing both.
pub struct Store {
    kv: Box<dyn KvStore>,
    clock: Box<dyn Clock>,
}

impl Store {
    pub fn new(kv: impl KvStore + 'static) -> Self {
        Self::with_clock(kv, SystemClock)
    }

    pub fn with_clock(kv: impl KvStore + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            kv: Box::new(kv),
            clock: Box::new(clock),
        }
    }

    pub fn collection<T: Record>(&self) -> Collection<'_, T> {
        Collection {
            kv: self.kv.as_ref(),
            clock: self.clock.as_ref(),
            _record: PhantomData,
        }
    }

    pub fn incidents(&self) -> IncidentRepository<'_> {
        IncidentRepository::new(self.collection())
    }

    pub fn alerts(&self) -> AlertRepository<'_> {
        AlertRepository::new(self.collection())
    }

    pub fn regional_admins(&self) -> RegionalAdminRepository<'_> {
        RegionalAdminRepository::new(self.collection())
    }

    pub fn guides(&self) -> GuideRepository<'_> {
        GuideRepository::new(self.collection())
    }
}

/// Generic list/filter/create/update/delete over one collection.
pub struct Collection<'a, T> {
    kv: &'a dyn KvStore,
    clock: &'a dyn Clock,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: Record> Collection<'a, T> {
    /// Every record in insertion order. A missing key, an unavailable substrate or an unreadable
    /// value all read as an empty collection.
    pub fn list_all(&self) -> Result<Vec<T>, AppError> {
        let Some(raw) = self.read_raw()? else {
            return Ok(Vec::new());
        };
        match decode::<T>(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    key = T::COLLECTION_KEY,
                    error = %e,
                    "unreadable collection, reading as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<T>, AppError> {
        Ok(self.list_all()?.into_iter().find(|r| r.id() == id))
    }

    pub fn filter_by(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>, AppError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|r| predicate(r))
            .collect())
    }

    pub fn count(&self) -> Result<usize, AppError> {
        Ok(self.list_all()?.len())
    }

    /// Like [`list_all`](Self::list_all), but an unreadable value is an error
    /// (`STORE_COLLECTION_CORRUPT`) instead of an empty collection.
    pub fn list_strict(&self) -> Result<Vec<T>, AppError> {
        match self.read_raw()? {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Mint an id and creation time, build the record from them, append and persist.
    pub fn create(&self, build: impl FnOnce(RecordStamp) -> T) -> Result<T, AppError> {
        let mut records = self.load_for_write()?;
        let now = self.clock.now();
        let stamp = RecordStamp {
            id: record_id(T::ID_PREFIX, unix_millis(now))?,
            created_at: format_timestamp(now)?,
        };
        let record = build(stamp);
        records.push(record.clone());
        self.persist(&records)?;
        tracing::debug!(key = T::COLLECTION_KEY, id = record.id(), "created record");
        Ok(record)
    }

    /// Replace the record with `id` by a modified copy. Returns `None` without writing when no
    /// such record exists.
    pub fn update(&self, id: &str, apply: impl FnOnce(&mut T)) -> Result<Option<T>, AppError> {
        let mut records = self.load_for_write()?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        let mut next = slot.clone();
        apply(&mut next);
        *slot = next.clone();
        self.persist(&records)?;
        Ok(Some(next))
    }

    /// Remove the record with `id`. The collection is written back even when nothing matched;
    /// the return value says whether a record was actually removed.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let records = self.load_for_write()?;
        let before = records.len();
        let kept: Vec<T> = records.into_iter().filter(|r| r.id() != id).collect();
        self.persist(&kept)?;
        Ok(kept.len() < before)
    }

    pub fn timestamp(&self) -> Result<String, AppError> {
        format_timestamp(self.clock.now())
    }

    fn read_raw(&self) -> Result<Option<String>, AppError> {
        if !self.kv.is_available() {
            return Ok(None);
        }
        self.kv.get(T::COLLECTION_KEY)
    }

    // A write never replaces data it could not parse.
    fn load_for_write(&self) -> Result<Vec<T>, AppError> {
        self.list_strict()
    }

    fn persist(&self, records: &[T]) -> Result<(), AppError> {
        if !self.kv.is_available() {
            tracing::debug!(key = T::COLLECTION_KEY, "no persistent storage, write skipped");
            return Ok(());
        }
        let json = serde_json::to_string(records).map_err(|e| {
            AppError::new("STORE_ENCODE_FAILED", "Failed to encode collection")
                .with_details(format!("key={}; err={}", T::COLLECTION_KEY, e))
        })?;
        self.kv.set(T::COLLECTION_KEY, &json)?;
        tracing::debug!(key = T::COLLECTION_KEY, count = records.len(), "persisted collection");
        Ok(())
    }
}

fn decode<T: Record>(raw: &str) -> Result<Vec<T>, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        AppError::new("STORE_COLLECTION_CORRUPT", "Stored collection is not readable")
            .with_details(format!("key={}; err={}", T::COLLECTION_KEY, e))
    })
}
