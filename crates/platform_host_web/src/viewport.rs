//! Browser viewport oracle backed by `window.innerWidth` / `window.innerHeight`.

use platform_host::{Viewport, ViewportOracle};

/// Size reported when the page window is unavailable (non-browser targets, workers).
pub const FALLBACK_VIEWPORT: Viewport = Viewport::new(1024, 768);

#[derive(Debug, Clone, Copy, Default)]
/// Viewport oracle that reads the live browser window size on every call.
pub struct WebViewport;

impl ViewportOracle for WebViewport {
    fn viewport(&self) -> Viewport {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(FALLBACK_VIEWPORT.width);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(FALLBACK_VIEWPORT.height);
                return Viewport::new(width, height);
            }
        }

        FALLBACK_VIEWPORT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_browser_targets_report_fallback_size() {
        assert_eq!(WebViewport.viewport(), FALLBACK_VIEWPORT);
    }
}
