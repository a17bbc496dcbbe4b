//! API base URL resolution.
//!
//! The base URL is baked in at compile time through `APP_BASE_URL`. Without
//! it the API is assumed to run on port 3000 of the host serving the app.

/// Compile-time override, e.g. `APP_BASE_URL=https://api.example.com trunk build`.
const COMPILED_BASE_URL: Option<&str> = option_env!("APP_BASE_URL");

/// Get the base URL for API requests, without a trailing slash.
pub fn api_base() -> String {
    if let Some(base) = COMPILED_BASE_URL.map(str::trim).filter(|s| !s.is_empty()) {
        return base.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path such as `/phone/proposal/search`.
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Append an already encoded query string, skipping it when empty.
pub fn api_url_with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        api_url(path)
    } else {
        format!("{}?{}", api_url(path), query)
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3000", "/collections/product"),
            "http://localhost:3000/collections/product"
        );
        assert_eq!(join_url("https://api.example.com", "auth/login"), "https://api.example.com/auth/login");
    }
}
