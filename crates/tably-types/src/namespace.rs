use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One of the disjoint object namespaces.
///
/// Identical bytes stored under different namespaces are distinct objects,
/// so an empty chunk never aliases an empty recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Canonically encoded column chunks.
    Chunk,
    /// Column, file and directory recipes.
    Recipe,
    /// Commit manifests.
    Manifest,
}

impl Namespace {
    /// All namespaces, in on-disk creation order.
    pub const ALL: [Namespace; 3] = [Namespace::Chunk, Namespace::Recipe, Namespace::Manifest];

    /// Directory name used by the filesystem store.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Chunk => "chunks",
            Self::Recipe => "recipes",
            Self::Manifest => "manifests",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chunk => write!(f, "chunk"),
            Self::Recipe => write!(f, "recipe"),
            Self::Manifest => write!(f, "manifest"),
        }
    }
}

impl FromStr for Namespace {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chunk" => Ok(Self::Chunk),
            "recipe" => Ok(Self::Recipe),
            "manifest" => Ok(Self::Manifest),
            other => Err(TypeError::UnknownNamespace(other.to_string())),
        }
    }
}
