//! Logging setup and crash reporting for the `covtree` binary.
//!
//! The library only emits `log`/`tracing` events. Installing a subscriber is
//! the binary's job:
//!
//! ```ignore
//! use covtree::observability::{init_logging, install_panic_hook};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_logging(0, "warn");
//! }
//! ```

mod logging;
mod panic_hook;

pub use logging::{filter_directive, init_logging};
pub use panic_hook::install_panic_hook;
