//! Core reference types.

use std::fmt;

use tably_types::ObjectId;

use crate::error::{RefError, RefResult};

/// Directory prefix under which views live.
pub const HEADS_PREFIX: &str = "refs/heads/";

/// A view and the manifest it points at, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    pub name: String,
    pub tip: Option<ObjectId>,
}

/// The state of HEAD: either symbolic (naming a view) or detached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Head {
    /// HEAD names the active view.
    Symbolic(String),
    /// HEAD holds a manifest hash directly.
    Detached(ObjectId),
}

impl Head {
    /// Parse the on-disk HEAD format.
    pub fn parse(text: &str) -> RefResult<Self> {
        let text = text.trim();
        if let Some(target) = text.strip_prefix("ref: ") {
            let name = target.strip_prefix(HEADS_PREFIX).ok_or_else(|| RefError::Corrupt {
                name: "HEAD".into(),
                reason: format!("symbolic target {target:?} is not under {HEADS_PREFIX}"),
            })?;
            return Ok(Self::Symbolic(name.to_string()));
        }
        ObjectId::from_hex(text)
            .map(Self::Detached)
            .map_err(|e| RefError::Corrupt {
                name: "HEAD".into(),
                reason: e.to_string(),
            })
    }

    /// The view name, if HEAD is symbolic.
    pub fn view(&self) -> Option<&str> {
        match self {
            Self::Symbolic(name) => Some(name),
            Self::Detached(_) => None,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached(_))
    }
}

/// Renders the on-disk HEAD format.
impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbolic(name) => write!(f, "ref: {HEADS_PREFIX}{name}"),
            Self::Detached(id) => write!(f, "{}", id.to_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_roundtrip() {
        let head = Head::Symbolic("feature/x".into());
        assert_eq!(head.to_string(), "ref: refs/heads/feature/x");
        assert_eq!(Head::parse(&head.to_string()).unwrap(), head);
    }

    #[test]
    fn detached_roundtrip() {
        let head = Head::Detached(ObjectId::from_bytes(b"m"));
        assert_eq!(Head::parse(&format!("{head}\n")).unwrap(), head);
        assert!(head.is_detached());
        assert!(head.view().is_none());
    }

    #[test]
    fn garbage_is_corrupt() {
        assert!(matches!(Head::parse("nonsense"), Err(RefError::Corrupt { .. })));
        assert!(matches!(
            Head::parse("ref: refs/tags/v1"),
            Err(RefError::Corrupt { .. })
        ));
    }
}
