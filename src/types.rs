use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::BuildHasherDefault;

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FastHashSet<T> = HashSet<T, BuildHasherDefault<FxHasher>>;

// ─── RecordId ───────────────────────────────────────────────────────────────

/// Process-wide identifier of a registered record.
///
/// Opaque on purpose: there is no arithmetic on ids, only the registry's
/// counter produces new ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Placeholder carried by a record that has not been registered yet.
    pub const UNASSIGNED: RecordId = RecordId(0);

    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// ─── RecordType ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    Attribute,
    Case,
    Collection,
}

impl RecordType {
    pub const ALL: [RecordType; 3] = [RecordType::Attribute, RecordType::Case, RecordType::Collection];

    pub fn name(self) -> &'static str {
        match self {
            RecordType::Attribute => "Attribute",
            RecordType::Case => "Case",
            RecordType::Collection => "Collection",
        }
    }

    /// Maps a class name such as `"DG.Case"` or `"Case"` to its tag.
    /// Everything up to and including the first `.` is ignored.
    pub fn from_class_name(class_name: &str) -> Option<Self> {
        let name = match class_name.find('.') {
            Some(dot) => &class_name[dot + 1..],
            None => class_name,
        };
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Config ─────────────────────────────────────────────────────────────────

/// Configuration for [`IdentityRegistry::with_config`](crate::IdentityRegistry::with_config).
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Starting value of the allocation counter. The counter is advanced
    /// before each use, so the first generated id is `initial_counter + 1`.
    ///
    /// Default: 1.
    pub initial_counter: u64,
    /// Number of slots to pre-allocate in the id map.
    ///
    /// Default: 0.
    pub capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_counter: 1,
            capacity: 0,
        }
    }
}
