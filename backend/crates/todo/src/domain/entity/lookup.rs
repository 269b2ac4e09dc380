//! Lookup Tables
//!
//! States, priorities and colors are small reference sets identified by their
//! natural value (a label or a hex code). Tasks point at them by id.

use kernel::id::{Id, markers};

/// Where a lookup set is stored
pub trait LookupTable: Send + Sync + 'static {
    const TABLE: &'static str;
    /// Column holding the natural, unique value
    const COLUMN: &'static str;
    /// Entity name used in error context
    const ENTITY: &'static str;
}

impl LookupTable for markers::State {
    const TABLE: &'static str = "states";
    const COLUMN: &'static str = "label";
    const ENTITY: &'static str = "state";
}

impl LookupTable for markers::Priority {
    const TABLE: &'static str = "priorities";
    const COLUMN: &'static str = "label";
    const ENTITY: &'static str = "priority";
}

impl LookupTable for markers::Color {
    const TABLE: &'static str = "colors";
    const COLUMN: &'static str = "hex";
    const ENTITY: &'static str = "color";
}

/// One row of a lookup table
pub struct Lookup<T> {
    pub id: Id<T>,
    pub value: String,
}

impl<T> Clone for Lookup<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: self.value.clone(),
        }
    }
}

impl<T> PartialEq for Lookup<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.value == other.value
    }
}

impl<T> Eq for Lookup<T> {}

impl<T> std::fmt::Debug for Lookup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lookup")
            .field("id", &self.id)
            .field("value", &self.value)
            .finish()
    }
}

pub type State = Lookup<markers::State>;
pub type Priority = Lookup<markers::Priority>;
pub type Color = Lookup<markers::Color>;
