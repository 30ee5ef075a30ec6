//! Lumen Event Alphabet
//!
//! This module defines the closed alphabet of light transport events that
//! light path expressions are written over. Labels are interned to small
//! integer ids so that symbol comparison during compilation and matching is
//! a single integer compare.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Interned label identifier (u32 for fast comparison)
pub type LabelId = u32;

/// A set of interned labels (wildcard exclusions, label groups)
pub type LabelSet = AHashSet<LabelId>;

/// Standard light transport event labels
///
/// The conventional single-letter vocabulary used by renderers for path
/// classification. Custom labels can be interned alongside these.
pub mod labels {
    /// Path starts at the camera
    pub const CAMERA: &str = "C";
    /// Path ends at a light source
    pub const LIGHT: &str = "L";
    /// Path escapes to the background/environment
    pub const BACKGROUND: &str = "B";
    /// Reflection scattering event
    pub const REFLECT: &str = "R";
    /// Transmission scattering event
    pub const TRANSMIT: &str = "T";
    /// Volumetric scattering event
    pub const VOLUME: &str = "V";
    /// Diffuse lobe
    pub const DIFFUSE: &str = "D";
    /// Glossy lobe
    pub const GLOSSY: &str = "G";
    /// Singular (specular) lobe
    pub const SPECULAR: &str = "S";
    /// Object label event
    pub const OBJECT: &str = "O";

    /// All standard labels, in registration order
    pub const ALL: &[&str] = &[
        CAMERA, LIGHT, BACKGROUND, REFLECT, TRANSMIT, VOLUME, DIFFUSE, GLOSSY, SPECULAR, OBJECT,
    ];
}

/// Registry interning label names to stable [`LabelId`]s
///
/// Interning the same name twice returns the same id, so two labels are
/// equal exactly when their ids are equal. Ids are dense and start at zero
/// in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alphabet {
    /// Label names indexed by id
    names: Vec<String>,

    /// Reverse lookup: name -> id
    index: AHashMap<String, LabelId>,
}

impl Alphabet {
    /// Create an empty alphabet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an alphabet pre-populated with the standard transport labels
    pub fn standard() -> Self {
        let mut alphabet = Self::new();
        for name in labels::ALL {
            alphabet.intern(name);
        }
        alphabet
    }

    /// Intern a label name, returning its id
    ///
    /// Returns the existing id if the name was interned before.
    pub fn intern(&mut self, name: &str) -> LabelId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len() as LabelId;
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    /// Look up the id of an already-interned label
    pub fn lookup(&self, name: &str) -> Option<LabelId> {
        self.index.get(name).copied()
    }

    /// Get the name for a label id
    pub fn name(&self, id: LabelId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Whether an id belongs to this alphabet
    pub fn contains(&self, id: LabelId) -> bool {
        (id as usize) < self.names.len()
    }

    /// Number of interned labels
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the alphabet is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over all labels as (id, name) pairs
    pub fn iter(&self) -> impl Iterator<Item = (LabelId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(id, name)| (id as LabelId, name.as_str()))
    }

    /// Intern several names and collect them into a [`LabelSet`]
    pub fn label_set(&mut self, names: &[&str]) -> LabelSet {
        names.iter().map(|name| self.intern(name)).collect()
    }
}
