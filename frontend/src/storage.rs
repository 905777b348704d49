//! Browser local storage. Only the session token and the selected client and
//! interface ids are ever stored.

use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            gloo_console::warn!(format!("Could not persist {}", key));
        }
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn get_id(key: &str) -> Option<i64> {
    get(key)?.parse().ok()
}

/// Stores `Some(id)` or removes the key for `None`.
pub fn set_id(key: &str, id: Option<i64>) {
    match id {
        Some(id) => set(key, &id.to_string()),
        None => remove(key),
    }
}
