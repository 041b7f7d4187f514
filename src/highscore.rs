//! High score persistence
//!
//! A single integer in LocalStorage under the key the portal builds already
//! use, stored as a plain decimal string. Anything unreadable means no high
//! score yet; saves that fail are silently dropped.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "chromaRushHighScore";

/// Parse a raw stored value; absence or corruption yields 0
#[allow(dead_code)]
fn parse_stored(raw: Option<String>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Load the persisted high score (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    match storage {
        Some(storage) => {
            let value = parse_stored(storage.get_item(STORAGE_KEY).ok().flatten());
            log::info!("Loaded high score: {}", value);
            value
        }
        None => {
            log::warn!("LocalStorage unavailable, high score defaults to 0");
            0
        }
    }
}

/// Persist the high score (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(score: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        match storage.set_item(STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("Saved high score: {}", score),
            Err(_) => log::warn!("Failed to save high score"),
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_score: u32) {
    // No-op for native
}
