//! Prompt suites
//!
//! Labelled test prompts, their random generator, and the editable set the
//! benchmark runs against.

mod generator;
mod record;
mod set;

pub use generator::{
    DEFAULT_NO_TOOL_PROBABILITY, LOCATION_SLOT, LOCATIONS, NO_TOOL_REQUESTS, PromptGenerator,
    WEATHER_TEMPLATES, normalize_probability, parse_suite_size,
};
pub use record::{ExpectedOutcome, PromptRecord};
pub use set::{PromptSet, PromptSnapshot};
