//! # Domain Models
//!
//! Typed values read from the document and the securities web services.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker read from the mount point |
//! | [`MountPoint`] | Attributes captured from a mount-point element |
//! | [`Quote`] | Company and price fields from the quote lookup |
//! | [`ChartReference`] | Pre-rendered price/volume chart image |

mod mount;
mod quote;
mod symbol;

pub use mount::{MountPoint, ENVIRONMENT_ATTRIBUTE, MOUNT_MARKER_SELECTOR, SYMBOL_ATTRIBUTE};
pub use quote::{ChartReference, Quote, QuoteBasic, QuoteFigures};
pub use symbol::Symbol;
