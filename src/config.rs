use serde::Deserialize;

/// Widget configuration loaded from `REEL_`-prefixed environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Catalog feed URL (one GET returning a JSON array of products)
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Origin the widget activates on
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path the widget activates on
    #[serde(default = "default_path")]
    pub path: String,

    /// Selector of the element the carousel is inserted before
    #[serde(default = "default_anchor_selector")]
    pub anchor_selector: String,

    /// Carousel heading
    #[serde(default = "default_title")]
    pub title: String,

    /// Quiet period after the last resize before snapping, in milliseconds
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,

    /// Redis connection URL; the host falls back to in-memory storage when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Page URL the headless host reports as its location
    #[serde(default = "default_page_url")]
    pub page_url: String,
}

fn default_feed_url() -> String {
    "https://gist.githubusercontent.com/sevindi/8bcbde9f02c1d4abe112809c974e1f49/raw/9bf93b58df623a9b16f1db721cd0a7a539296cf0/products.json".to_string()
}

fn default_origin() -> String {
    "https://www.e-bebek.com".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

fn default_anchor_selector() -> String {
    ".Section2A".to_string()
}

fn default_title() -> String {
    "Beğenebileceğinizi düşündüklerimiz".to_string()
}

fn default_resize_debounce_ms() -> u64 {
    150
}

fn default_page_url() -> String {
    "https://www.e-bebek.com/".to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            origin: default_origin(),
            path: default_path(),
            anchor_selector: default_anchor_selector(),
            title: default_title(),
            resize_debounce_ms: default_resize_debounce_ms(),
            redis_url: None,
            page_url: default_page_url(),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("REEL_")
            .from_env::<WidgetConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
