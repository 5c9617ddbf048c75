//! Domain constants
//!
//! Fixed names shared between the client, the session stores and the
//! configuration loader.

// Session persistence keys
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_INFO_KEY: &str = "userInfo";

// Client defaults
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const CURRENT_USER_ENDPOINT: &str = "/auth/me";
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";
pub const REGISTER_ENDPOINT: &str = "/auth/register";
pub const DEFAULT_SESSION_FILE: &str = "courseportal-session.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";
