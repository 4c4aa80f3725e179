use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "authToken";
const CONFIG_KEY: &str = "epr_config";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
}

/// Get the TOML configuration override from localStorage
pub fn get_config_override() -> Option<String> {
    get_local_storage()?
        .get_item(CONFIG_KEY)
        .ok()?
        .filter(|contents| !contents.trim().is_empty())
}
