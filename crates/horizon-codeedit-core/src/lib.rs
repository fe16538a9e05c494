//! Core primitives for Horizon CodeEdit.
//!
//! This crate provides the foundational pieces shared by the editing core:
//!
//! - **Signal/Slot System**: Type-safe notifications from editor components
//! - **Logging**: Tracing targets, span names and a perf guard
//! - **Geometry**: Points, sizes, rectangles and colors in viewport space
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_codeedit_core::Signal;
//!
//! // Create a signal that notifies when the cursor moves
//! let cursor_moved = Signal::<(usize, usize)>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = cursor_moved.connect(|(line, col)| {
//!     println!("Cursor at {}:{}", line, col);
//! });
//!
//! // Emit the signal
//! cursor_moved.emit((3, 14));
//!
//! // Disconnect when done
//! cursor_moved.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;
mod types;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use types::{Color, Point, Rect, Size};
