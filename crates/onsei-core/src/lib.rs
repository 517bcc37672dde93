//! NHK16 pitch-accent dictionary → audio lookup rows.
//!
//! The pipeline reads the NHK16 JSON export, renders a pitch-accent display
//! string for every accent, expands each entry (headwords, sub-entries,
//! numeral/counter forms) into [`expand::OutputRow`]s and hands them to a
//! [`sink::RowSink`].

pub mod accent;
pub mod audio;
pub mod expand;
pub mod export;
pub mod mora;
pub mod numeric;
pub mod settings;
pub mod sink;
pub mod source;
pub mod unicode;
