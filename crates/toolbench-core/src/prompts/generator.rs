//! Random prompt suite generation
//!
//! Fills fixed phrasing tables: conversational requests that need no tool, and
//! weather templates whose `[location]` slot takes a random city.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::record::{ExpectedOutcome, PromptRecord};
use crate::error::{BenchError, BenchResult};

/// Default share of prompts that expect no tool call
pub const DEFAULT_NO_TOOL_PROBABILITY: f64 = 0.25;

/// Placeholder substituted in weather templates
pub const LOCATION_SLOT: &str = "[location]";

/// Requests a model should answer without calling a tool
pub const NO_TOOL_REQUESTS: &[&str] = &[
    "Tell me a joke.",
    "What is 2+2?",
    "Describe a beautiful sunset.",
    "Give me a fun fact about penguins.",
];

/// Requests a model should answer through the weather tool
pub const WEATHER_TEMPLATES: &[&str] = &[
    "What is the weather today in [location]?",
    "Can you tell me the forecast for tomorrow in [location]?",
    "How's the weather in [location] today?",
    "What's the temperature like right now in [location]?",
    "Tell me about the conditions for tonight in [location]?",
    "Is it going to rain tomorrow in [location]?",
];

/// Locations used to fill weather templates
pub const LOCATIONS: &[&str] = &[
    "New York, NY",
    "Los Angeles, CA",
    "Chicago, IL",
    "Houston, TX",
    "Miami, FL",
    "San Francisco, CA",
    "Seattle, WA",
    "Boston, MA",
    "Austin, TX",
    "Denver, CO",
    "Philadelphia, PA",
    "Phoenix, AZ",
    "Dallas, TX",
    "San Diego, CA",
    "Atlanta, GA",
    "Washington D.C., DC",
    "Orlando, FL",
    "Nashville, TN",
    "Minneapolis, MN",
    "Las Vegas, NV",
];

/// Clamp a no-tool probability into `[0, 1]`; NaN resets to 0
pub fn normalize_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}

/// Parse a user-supplied suite size, rejecting anything but a positive integer
pub fn parse_suite_size(input: &str) -> BenchResult<usize> {
    match input.trim().parse::<usize>() {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(BenchError::validation(format!(
            "Invalid test suite size '{}': expected a positive integer",
            input.trim()
        ))),
    }
}

/// Generator for labelled prompt suites
pub struct PromptGenerator<R: Rng = StdRng> {
    rng: R,
}

impl PromptGenerator<StdRng> {
    /// Create a generator seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for PromptGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PromptGenerator<R> {
    /// Generate `count` prompts, each expecting no tool with `no_tool_probability`
    pub fn generate(
        &mut self,
        count: usize,
        no_tool_probability: f64,
    ) -> BenchResult<Vec<PromptRecord>> {
        if count == 0 {
            return Err(BenchError::validation(
                "Test suite size must be a positive integer",
            ));
        }

        let probability = normalize_probability(no_tool_probability);
        let records = (0..count)
            .map(|id| {
                if self.rng.gen_bool(probability) {
                    PromptRecord::new(id, self.pick(NO_TOOL_REQUESTS), ExpectedOutcome::NoTool)
                } else {
                    let template = self.pick(WEATHER_TEMPLATES);
                    let location = self.pick(LOCATIONS);
                    PromptRecord::new(
                        id,
                        template.replacen(LOCATION_SLOT, location, 1),
                        ExpectedOutcome::Tool,
                    )
                }
            })
            .collect();

        Ok(records)
    }

    fn pick(&mut self, choices: &'static [&'static str]) -> &'static str {
        // Tables are non-empty constants
        choices.choose(&mut self.rng).copied().unwrap_or_default()
    }
}
