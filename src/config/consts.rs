// src/config/consts.rs

// Site
pub const SITE_HOST: &str = "nellisauction.com";
pub const LISTING_PATH: &str = "/p/"; // product links: /p/<slug>/<id>
pub const LOCATION_PARAM: &str = "Location Name";

// Site markup hooks
pub const DATA_AX: &str = "data-ax";
pub const CARD_CONTAINER: &str = "item-card-container";
pub const CARD_TITLE_LINK: &str = "item-card-title-link";
pub const LABEL_TAG: &str = "span";

// Our markers on the page, namespaced so the host markup never collides
pub const PROCESSED_ATTR: &str = "data-nellis-helper-processed";
pub const HIDDEN_CLASS: &str = "nellis-helper-hidden";
pub const ANNOTATION_CLASS: &str = "nellis-helper-amazon-link";

// Labels
pub const KNOWN_LOCATIONS: [&str; 4] = ["North Las Vegas", "Dean Martin", "Henderson", "Decatur"];

// Outbound search
pub const SEARCH_URL_PREFIX: &str = "https://www.amazon.com/s?k=";
pub const MIN_TITLE_CHARS: usize = 5;
pub const MAX_QUERY_CHARS: usize = 100;

// Heuristics
pub const MAX_ANCESTOR_DEPTH: usize = 10;

// Timing (ms)
pub const DEBOUNCE_MS: u64 = 500;
pub const NAV_SETTLE_MS: u64 = 1000;
pub const RETRY_CHECK_MS: u64 = 1000;
pub const RETRY_ATTEMPTS: u32 = 5;

// Local store
pub const STORE_DIR: &str = ".store";
pub const SETTINGS_FILE: &str = "settings.json";
