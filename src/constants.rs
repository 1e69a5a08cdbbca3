//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the users API
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the configured API URL
pub const API_URL_ENV: &str = "USERBOARD_API_URL";

/// Page sizes offered by the pagination selector
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Page size used until the operator picks another one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Request timeout for the HTTP source
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log file written next to the working directory
pub const DEFAULT_LOG_FILE: &str = "userboard.log";

/// Directory under `$HOME` holding the config file
pub const CONFIG_DIR: &str = ".userboard";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// en-US "May 15, 2020, 10:00 AM"
pub const DATE_DISPLAY_FORMAT: &str = "%b %d, %Y, %-I:%M %p";

/// Date format accepted by the filter form
pub const DATE_FILTER_FORMAT: &str = "%Y-%m-%d";

/// Application name
pub const APP_NAME: &str = "Userboard";
