use leptos::prelude::window;
use wasm_bindgen::prelude::*;

/// User-agent fragments that identify a mobile platform, matched
/// case-insensitively.
pub const PLATFORM_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Widest viewport (CSS px) still treated as mobile when the device has a
/// touch screen.
pub const TOUCH_MAX_WIDTH: f64 = 768.0;

/// What counts as a mobile environment. [`Default`] gives the production
/// thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    pub markers: &'static [&'static str],
    pub touch_max_width: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            markers: &PLATFORM_MARKERS,
            touch_max_width: TOUCH_MAX_WIDTH,
        }
    }
}

impl DetectionConfig {
    /// A device is mobile if its user agent names a mobile platform, or if
    /// the viewport is narrow and the device has a touch screen.
    pub fn matches(&self, user_agent: &str, viewport_width: f64, has_touch: bool) -> bool {
        let ua = user_agent.to_lowercase();
        if self.markers.iter().any(|marker| ua.contains(marker)) {
            return true;
        }
        viewport_width <= self.touch_max_width && has_touch
    }
}

/// Whether the current browser environment is a mobile device. Anything that
/// cannot be read is treated as desktop-like.
#[wasm_bindgen(js_name = isMobile)]
pub fn is_mobile() -> bool {
    let window = window();
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::MAX);
    DetectionConfig::default().matches(&user_agent, viewport_width, has_touch())
}

/// Touch support: an `ontouchstart` handler slot on `window`, or a non-zero
/// `maxTouchPoints`.
fn has_touch() -> bool {
    let window = window();
    let has_ontouchstart =
        js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart"))
            .unwrap_or(false);
    has_ontouchstart || window.navigator().max_touch_points() > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/124.0.0.0 Safari/537.36";
    const IPHONE_UA: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";
    const ANDROID_UA: &str =
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/124.0.0.0 Mobile Safari/537.36";
    const IPAD_UA: &str =
        "Mozilla/5.0 (iPad; CPU OS 17_4 like Mac OS X) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";

    #[test]
    fn platform_markers_match_regardless_of_case() {
        let config = DetectionConfig::default();
        assert!(config.matches(IPHONE_UA, 1920.0, false));
        assert!(config.matches(ANDROID_UA, 1920.0, false));
        assert!(config.matches(IPAD_UA, 1920.0, false));
        assert!(config.matches(&IPHONE_UA.to_uppercase(), 1920.0, false));
        assert!(config.matches("opera mini on something", 1920.0, false));
    }

    #[test]
    fn desktop_ua_needs_narrow_touch_viewport() {
        let config = DetectionConfig::default();
        assert!(!config.matches(DESKTOP_UA, 1920.0, false));
        assert!(!config.matches(DESKTOP_UA, 1920.0, true));
        assert!(!config.matches(DESKTOP_UA, 600.0, false));
        assert!(config.matches(DESKTOP_UA, 600.0, true));
    }

    #[test]
    fn width_threshold_is_inclusive() {
        let config = DetectionConfig::default();
        assert!(config.matches(DESKTOP_UA, TOUCH_MAX_WIDTH, true));
        assert!(!config.matches(DESKTOP_UA, TOUCH_MAX_WIDTH + 1.0, true));
    }

    #[test]
    fn unreadable_width_counts_as_wide() {
        let config = DetectionConfig::default();
        assert!(!config.matches(DESKTOP_UA, f64::MAX, true));
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let config = DetectionConfig {
            markers: &["kiosk"],
            touch_max_width: 1024.0,
        };
        assert!(config.matches("KioskBrowser/2.0", 1920.0, false));
        assert!(!config.matches(IPHONE_UA, 1920.0, false));
        assert!(config.matches(DESKTOP_UA, 1024.0, true));
    }
}
