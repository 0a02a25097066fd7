/// Routes Rust panics to `console.error` when the `console_error_panic_hook`
/// feature is enabled.
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Installs the browser console logger. Defaults to `Info`.
pub fn set_logger(level: Option<log::Level>) {
    wasm_logger::init(wasm_logger::Config::new(level.unwrap_or(log::Level::Info)));
}
