const ACCESS_TOKEN_STORAGE_KEY: &str = "token";

/// The cached bearer token, kept in browser local storage under a fixed key.
/// Provided once through context so every reader and writer goes through the
/// same handle. No expiry is stored; a 401 is the only expiry signal.
#[derive(Clone, Copy, Default)]
pub struct TokenStore;

impl TokenStore {
    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn get(&self) -> Option<String> {
        self.storage()
            .and_then(|storage| storage.get_item(ACCESS_TOKEN_STORAGE_KEY).ok().flatten())
    }

    pub fn set(&self, token: &str) {
        match self.storage() {
            Some(storage) => {
                if let Err(error) = storage.set_item(ACCESS_TOKEN_STORAGE_KEY, token) {
                    log::error!("failed to store access token: {error:?}");
                }
            }
            None => log::error!("local storage unavailable, token not cached"),
        }
    }
}
