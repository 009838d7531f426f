//! Timestamp display helpers.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// Locale time label for a message timestamp.
///
/// In the browser this defers to `Date#toLocaleTimeString`; elsewhere, and
/// for timestamps the browser cannot parse, it falls back to the `HH:MM`
/// portion of the ISO string.
pub fn clock_label(iso: &str) -> String {
    #[cfg(feature = "hydrate")]
    {
        let parsed = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(iso));
        if parsed.get_time().is_nan() {
            return fallback_clock_label(iso);
        }
        String::from(parsed.to_locale_time_string("en-US"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        fallback_clock_label(iso)
    }
}

/// `HH:MM` slice of an ISO 8601 timestamp, or empty when there is no time
/// part to slice.
fn fallback_clock_label(iso: &str) -> String {
    iso.split('T')
        .nth(1)
        .map(|time| time.chars().take(5).collect())
        .unwrap_or_default()
}
