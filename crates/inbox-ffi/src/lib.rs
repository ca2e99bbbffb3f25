//! UniFFI bindings crate for the inbox library
//!
//! This crate wraps the inbox crate for UniFFI library mode binding generation.
//! The host app supplies blob resolution and log sinks through callback
//! interfaces declared in `inbox::ffi`.
//!
//! ## Building for Swift
//!
//! 1. Build the library for Apple platforms:
//!    ```bash
//!    cargo build --release -p inbox-ffi --target aarch64-apple-darwin
//!    cargo build --release -p inbox-ffi --target aarch64-apple-ios
//!    ```
//!
//! 2. Generate Swift bindings:
//!    ```bash
//!    cargo run -p inbox-ffi --features bindgen --bin uniffi-bindgen generate \
//!        --library target/aarch64-apple-darwin/release/libinbox_ffi.dylib \
//!        --language swift \
//!        --out-dir generated/swift
//!    ```

pub use inbox::ffi::*;

// Library mode needs the scaffolding re-exported from this cdylib
inbox::uniffi_reexport_scaffolding!();
