use gloo::storage::LocalStorage;
use gloo::storage::Storage as _;
use shared::{CacheError, KeyValueStore};
use wasm_bindgen::JsValue;

/// Browser `localStorage` as a [`KeyValueStore`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalStorageStore;

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        LocalStorage::raw().get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        LocalStorage::raw().set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        LocalStorage::raw().remove_item(key).map_err(storage_error)
    }
}

fn storage_error(err: JsValue) -> CacheError {
    CacheError::Storage(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}
