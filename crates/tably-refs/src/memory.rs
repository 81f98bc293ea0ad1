//! In-memory reference store for testing and ephemeral use.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tably_types::ObjectId;

use crate::error::{RefError, RefResult};
use crate::names::validate_view_name;
use crate::traits::RefStore;
use crate::types::{Head, View};

/// An in-memory implementation of [`RefStore`].
///
/// Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRefStore {
    views: RwLock<BTreeMap<String, Option<ObjectId>>>,
    head: RwLock<Option<Head>>,
}

impl InMemoryRefStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RefStore for InMemoryRefStore {
    fn view(&self, name: &str) -> RefResult<Option<View>> {
        let views = self.views.read().map_err(|_| RefError::LockPoisoned)?;
        Ok(views.get(name).map(|tip| View {
            name: name.to_string(),
            tip: *tip,
        }))
    }

    fn write_view(&self, name: &str, tip: Option<ObjectId>) -> RefResult<()> {
        validate_view_name(name)?;
        let mut views = self.views.write().map_err(|_| RefError::LockPoisoned)?;
        views.insert(name.to_string(), tip);
        Ok(())
    }

    fn list_views(&self) -> RefResult<Vec<View>> {
        let views = self.views.read().map_err(|_| RefError::LockPoisoned)?;
        Ok(views
            .iter()
            .map(|(name, tip)| View {
                name: name.clone(),
                tip: *tip,
            })
            .collect())
    }

    fn head(&self) -> RefResult<Option<Head>> {
        let head = self.head.read().map_err(|_| RefError::LockPoisoned)?;
        Ok(head.clone())
    }

    fn set_head(&self, head: &Head) -> RefResult<()> {
        if let Head::Symbolic(name) = head {
            validate_view_name(name)?;
        }
        let mut slot = self.head.write().map_err(|_| RefError::LockPoisoned)?;
        *slot = Some(head.clone());
        Ok(())
    }
}
