//! Syntax style schemes for Horizon CodeEdit.
//!
//! This crate supplies the formats the editor core paints with:
//!
//! - **TextFormat**: foreground/background colors plus bold, italic, underline
//! - **SyntaxStyle**: a named scheme of formats, loadable from XML
//! - **Built-in scheme**: a light default available without any files
//!
//! # Example
//!
//! ```
//! use horizon_codeedit_style::{SyntaxStyle, format_names};
//!
//! let style = SyntaxStyle::load(r##"
//!     <style-scheme version="1.0" name="Mono">
//!         <style name="CurrentLine" background="#f0f0f0"/>
//!     </style-scheme>
//! "##)?;
//!
//! assert!(style.has_format(format_names::CURRENT_LINE));
//! # Ok::<(), horizon_codeedit_style::Error>(())
//! ```

mod error;
mod format;
mod scheme;

pub use error::{Error, Result};
pub use format::TextFormat;
pub use scheme::{SyntaxStyle, format_names};
