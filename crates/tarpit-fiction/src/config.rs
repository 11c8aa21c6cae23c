//! Session configuration.

/// Where narration goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    /// Standard error, so standard output carries only program output.
    #[default]
    Stderr,
    /// Standard output, interleaved with program output.
    Stdout,
    /// Nowhere.
    Quiet,
}

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Seed for every random choice the world makes.
    pub seed: u64,
    /// Where narration is routed by the front end.
    pub feedback: Feedback,
    /// Repeat each submitted line as `> line` before running it.
    pub echo: bool,
    /// Extra words that show up inside the world.
    pub parameters: Vec<String>,
}

impl SessionConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the feedback destination.
    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = feedback;
        self
    }

    /// Turn command echo on or off.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Set the parameters placed in the world.
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = String>) -> Self {
        self.parameters = parameters.into_iter().collect();
        self
    }
}
