use sea_orm::DatabaseConnection;

use crate::cache::ResponseCache;

/// Shared application state handed to every handler. Cloning is cheap,
/// both members are handles.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cache: ResponseCache,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            cache: ResponseCache::new(),
        }
    }
}
