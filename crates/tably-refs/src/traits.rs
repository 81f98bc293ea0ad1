//! The [`RefStore`] trait defining the reference storage interface.

use tably_types::ObjectId;

use crate::error::{RefError, RefResult};
use crate::types::{Head, View};

/// Storage backend for views and HEAD.
///
/// A view that exists but has never been committed to has no tip; that is
/// distinct from a view that does not exist.
pub trait RefStore: Send + Sync {
    /// Read a view. Returns `Ok(None)` if the view does not exist.
    fn view(&self, name: &str) -> RefResult<Option<View>>;

    /// Create or move a view.
    fn write_view(&self, name: &str, tip: Option<ObjectId>) -> RefResult<()>;

    /// All views, sorted by name.
    fn list_views(&self) -> RefResult<Vec<View>>;

    /// Read HEAD. Returns `Ok(None)` if HEAD has not been set.
    fn head(&self) -> RefResult<Option<Head>>;

    /// Replace HEAD.
    fn set_head(&self, head: &Head) -> RefResult<()>;

    /// Create a new view, failing if one with that name already exists.
    fn create_view(&self, name: &str, tip: Option<ObjectId>) -> RefResult<()> {
        if self.view(name)?.is_some() {
            return Err(RefError::AlreadyExists {
                name: name.to_string(),
            });
        }
        self.write_view(name, tip)
    }
}
