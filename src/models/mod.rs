//! Defines the data structures and models used throughout the application.
//!
//! This includes structures representing data fetched from the OpenAQ API, the
//! provider-neutral measurements derived from them, static reference data, and
//! the insight records served to callers.

mod insight;
mod measurement;
mod openaq;
mod reference;

pub use insight::*;
pub use measurement::*;
pub use openaq::*;
pub use reference::*;
