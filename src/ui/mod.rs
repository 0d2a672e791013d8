//! Display sink.
//!
//! The engine never renders anything itself. Every visible change (cards,
//! tokens, scores, freezes, the clock, the final winners) is pushed to a
//! [`Ui`] implementation supplied by the host.
//!
//! ## Provided sinks
//!
//! - [`NullUi`]: discards everything
//! - [`LogUi`]: writes through the `log` facade
//! - [`UiRecorder`]: keeps a [`UiEvent`] list for inspection

pub mod event;
pub mod sink;

pub use event::{UiEvent, UiRecorder};
pub use sink::{LogUi, NullUi, Ui};
