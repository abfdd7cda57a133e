//! Footfall: ground-contact intervals from multi-leg sensor logs
//!
//! This library turns a recording with one channel per leg into the
//! intervals during which each leg touches the ground, and draws them as a
//! gait diagram.
//!
//! # Features
//!
//! - **Single-pass extraction**: one walk per channel, no backtracking
//! - **Parallel channels**: large recordings are split across Rayon workers
//! - **SVG output**: gait diagrams rendered with plotters
//!
//! # Example
//!
//! ```rust,no_run
//! use footfall::{channels, config::FormatConfig, contact::ContactCommand};
//!
//! let matrix = channels::read_channels("walk.log", &FormatConfig::default()).unwrap();
//! let contacts = ContactCommand::new(3.0).extract(&matrix);
//! for channel in &contacts.channels {
//!     println!("{}: {:?}", channel.name, channel.intervals);
//! }
//! ```

pub mod channels;
pub mod config;
pub mod contact;
pub mod interval;
pub mod output;
pub mod parallel;
pub mod render;

// Re-export commonly used types
pub use channels::{parse_channels, read_channels, Channel, GaitError, SampleMatrix};
pub use contact::{extract_contacts, ContactCommand, GaitContacts};
pub use interval::{ContactInterval, RangeSpec, TimeWindow};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::channels::{parse_channels, read_channels, Channel, GaitError, SampleMatrix};
    pub use crate::config::FormatConfig;
    pub use crate::contact::{extract_contacts, ContactCommand, ContactPredicate, GaitContacts};
    pub use crate::interval::{ContactInterval, RangeSpec, TimeWindow};
    pub use crate::output::IntervalWriter;
    pub use crate::render::GaitDiagram;
}
