//! The set of instruments configured for a container, keyed by ID.
//!
//! A `Payload` is built once from an ordered list of records by
//! [`Payload::from_records`], which enforces ID uniqueness and applies the
//! rules for reserved IDs:
//!
//! - [`UNSET_ID`] records are skipped.
//! - [`MASTER_ID`] is forced into [`State::Measure`] with warm-up allowed.
//! - [`CRIO_ID`] always has warm-up allowed.
//!
//! After loading, instruments are only mutated through [`Payload::get_mut`] by
//! whatever drives their state. The payload does no locking of its own.

use crate::error::{PayloadError, PayloadResult};
use crate::instrument::{Instrument, CRIO_ID, MASTER_ID, UNSET_ID};
use crate::state::State;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Instruments of a container keyed by their ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    instruments: HashMap<i64, Instrument>,
}

impl Payload {
    /// Fold records into a payload in source order.
    ///
    /// Fails with [`PayloadError::DuplicateId`] on the first ID seen twice; the
    /// records accumulated so far are dropped.
    pub fn from_records(records: Vec<Instrument>) -> PayloadResult<Self> {
        let mut instruments = HashMap::with_capacity(records.len());

        for mut inst in records {
            if instruments.contains_key(&inst.id) {
                warn!(id = inst.id, "duplicate instrument ID in payload source");
                return Err(PayloadError::DuplicateId(inst.id));
            }

            match inst.id {
                UNSET_ID => {
                    debug!(name = %inst.name, "skipping unconfigured instrument (ID 0)");
                    continue;
                }
                MASTER_ID => {
                    debug!("forcing master into Measure with warm-up allowed");
                    inst.state = State::Measure;
                    inst.wu_allowed = true;
                }
                CRIO_ID => {
                    debug!("forcing cRIO warm-up allowed");
                    inst.wu_allowed = true;
                }
                _ => {}
            }

            instruments.insert(inst.id, inst);
        }

        Ok(Self { instruments })
    }

    /// Instrument with the given ID.
    pub fn get(&self, id: i64) -> Option<&Instrument> {
        self.instruments.get(&id)
    }

    /// Mutable access, used to advance an instrument's state.
    pub fn get_mut(&mut self, id: i64) -> Option<&mut Instrument> {
        self.instruments.get_mut(&id)
    }

    /// Whether an instrument with this ID is configured.
    pub fn contains(&self, id: i64) -> bool {
        self.instruments.contains_key(&id)
    }

    /// Number of configured instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// True when no instruments are configured.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// All configured IDs in ascending order.
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.instruments.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over `(id, instrument)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&i64, &Instrument)> {
        self.instruments.iter()
    }

    /// The container's master controller, if configured.
    pub fn master(&self) -> Option<&Instrument> {
        self.get(MASTER_ID)
    }

    /// The cRIO controller board, if configured.
    pub fn crio(&self) -> Option<&Instrument> {
        self.get(CRIO_ID)
    }

    /// Instruments that may be commanded into warm-up, ordered by ID.
    pub fn warm_up_allowed(&self) -> Vec<&Instrument> {
        let mut allowed: Vec<&Instrument> = self
            .instruments
            .values()
            .filter(|inst| inst.wu_allowed)
            .collect();
        allowed.sort_by_key(|inst| inst.id);
        allowed
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = (&'a i64, &'a Instrument);
    type IntoIter = std::collections::hash_map::Iter<'a, i64, Instrument>;

    fn into_iter(self) -> Self::IntoIter {
        self.instruments.iter()
    }
}
