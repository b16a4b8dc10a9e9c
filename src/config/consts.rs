// src/config/consts.rs

// Net config
pub const SOURCE_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_largest_companies_in_the_United_States_by_revenue";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Cache
pub const CACHE_TTL_SECS: u64 = 60 * 60;

// Logging
pub const LOG_FILE: &str = ".store/debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE_STEM: &str = "us_companies_revenue";
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// Charts
pub const CHART_TOP_N: usize = 10;
