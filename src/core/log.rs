//! Console logging that works on both build targets.
//!
//! On wasm32 everything goes to the browser console; native builds (unit
//! tests, tooling) fall back to stderr so fail-soft paths stay observable.

/// Log an informational message.
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!($($arg)*);
    }};
}

/// Log a warning.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("warning: {}", format!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_accept_format_args() {
        console_log!("generation {}", 3);
        console_warn!("discarding {} bytes", 17);
    }
}
