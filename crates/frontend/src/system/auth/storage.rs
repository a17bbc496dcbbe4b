use contracts::system::auth::{StoredUser, TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save the bearer token and the user JSON next to it
pub fn save_session(token: &str, user: &StoredUser) {
    let Some(storage) = get_local_storage() else {
        log::warn!("localStorage unavailable, session not persisted");
        return;
    };
    let _ = storage.set_item(TOKEN_STORAGE_KEY, token);
    match serde_json::to_string(user) {
        Ok(json) => {
            let _ = storage.set_item(USER_STORAGE_KEY, &json);
        }
        Err(e) => log::error!("Failed to serialize user: {}", e),
    }
}

/// Get bearer token from localStorage
pub fn get_token() -> Option<String> {
    get_local_storage()?
        .get_item(TOKEN_STORAGE_KEY)
        .ok()?
        .filter(|t| !t.trim().is_empty())
}

/// Get the stored user; a corrupt entry reads as absent
pub fn get_user() -> Option<StoredUser> {
    let raw = get_local_storage()?.get_item(USER_STORAGE_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("Ignoring unreadable stored user: {}", e);
            None
        }
    }
}

/// Clear token and user
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        let _ = storage.remove_item(USER_STORAGE_KEY);
    }
}
