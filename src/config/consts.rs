// src/config/consts.rs

// Net config
pub const SEARCH_ENDPOINT: &str = "https://www.google.com/search";
pub const IMAGE_MODE_PARAM: (&str, &str) = ("tbm", "isch");
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const TIMEOUT_SECS: u64 = 10;

// Query
pub const DEFAULT_REGION: &str = "Ontario";
pub const DOMAIN_KEYWORD: &str = "archery";

// Extraction
pub const DATA_CALLBACK_MARKER: &str = "AF_initDataCallback";
pub const THUMBNAIL_HOST_TOKEN: &str = "gstatic";
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];
pub const MIN_INLINE_URL_LEN: usize = 50; // heuristic icon filter; configurable

// Driver
pub const REQUEST_PAUSE_MS: u64 = 2_000; // be polite

// Input / output
pub const NAME_COLUMN: &str = "post_title";
pub const LOCALITY_COLUMN: &str = "post_city";
pub const DEFAULT_OUT_FILE: &str = "facility_images.csv";
pub const REPORT_HEADERS: [&str; 2] = ["Facility_Name", "Image_URL"];

// Result
pub const NOT_FOUND: &str = "NOT_FOUND";
