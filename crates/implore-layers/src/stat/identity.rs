//! Identity stat: draws the layer data as given.

use crate::error::StatResult;
use crate::params::{Geom, Position};
use crate::table::Table;

use super::{ComputeStat, StatMetadata};

/// Stat that leaves each group unchanged
#[derive(Clone, Debug)]
pub struct StatIdentity {
    metadata: StatMetadata,
}

impl StatIdentity {
    pub fn new() -> Self {
        Self {
            metadata: StatMetadata {
                name: "identity".to_string(),
                required_aes: Vec::new(),
                default_aes: Vec::new(),
                creates: Vec::new(),
                geom: Geom::Point,
                position: Position::Identity,
            },
        }
    }
}

impl Default for StatIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeStat for StatIdentity {
    fn metadata(&self) -> &StatMetadata {
        &self.metadata
    }

    fn compute_group(&self, data: &Table) -> StatResult<Table> {
        Ok(data.clone())
    }
}
