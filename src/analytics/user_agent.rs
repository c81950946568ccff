//! Coarse browser and platform classification by substring matching

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Unknown,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "Chrome",
            Browser::Firefox => "Firefox",
            Browser::Safari => "Safari",
            Browser::Edge => "Edge",
            Browser::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Platform {
    Windows,
    #[serde(rename = "macOS")]
    MacOs,
    Linux,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Unknown,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
            Platform::Android => "Android",
            Platform::Ios => "iOS",
            Platform::Unknown => "Unknown",
        }
    }
}

// Order matters: Chrome UAs also contain "safari".
const BROWSER_MARKERS: &[(&str, Browser)] = &[
    ("chrome", Browser::Chrome),
    ("firefox", Browser::Firefox),
    ("safari", Browser::Safari),
    ("edge", Browser::Edge),
];

// Order matters: Android UAs also contain "linux", iOS UAs contain "mac os x".
const PLATFORM_MARKERS: &[(&str, Platform)] = &[
    ("windows", Platform::Windows),
    ("mac", Platform::MacOs),
    ("linux", Platform::Linux),
    ("android", Platform::Android),
    ("iphone", Platform::Ios),
    ("ipad", Platform::Ios),
];

/// Classify a raw user-agent string. Never fails; unmatched input is `Unknown`.
pub fn classify(user_agent: &str) -> (Browser, Platform) {
    let ua = user_agent.to_lowercase();

    let browser = BROWSER_MARKERS
        .iter()
        .find(|(marker, _)| ua.contains(marker))
        .map(|(_, browser)| *browser)
        .unwrap_or(Browser::Unknown);

    let platform = PLATFORM_MARKERS
        .iter()
        .find(|(marker, _)| ua.contains(marker))
        .map(|(_, platform)| *platform)
        .unwrap_or(Platform::Unknown);

    (browser, platform)
}
