//! Parser configuration: limits and the two policy switches.

/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack overflows.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// The maximum allowed size of an input JSON (10MB) to prevent DoS attacks.
pub const MAX_JSON_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// What to do when an object repeats a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// The later value replaces the earlier one. The member keeps the
    /// slot of its first occurrence.
    #[default]
    LastWins,
    /// Fail with `ParseError::DuplicateKey`.
    Reject,
}

/// How `Number` tokens become `JsonNumber`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// Parse into an IEEE-754 `f64`. Integers beyond 2^53 lose precision.
    #[default]
    Float,
    /// Keep the validated literal text as-is.
    Exact,
}

/// Options for `parse_with_options` and `parse_json_with_options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Containers nested this deep or deeper are rejected.
    pub max_depth: usize,
    /// Only checked by `parse_json_with_options`, which sees the raw text.
    pub max_input_bytes: usize,
    pub duplicate_keys: DuplicateKeys,
    pub number_mode: NumberMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_bytes: MAX_JSON_SIZE_BYTES,
            duplicate_keys: DuplicateKeys::LastWins,
            number_mode: NumberMode::Float,
        }
    }
}

impl ParseOptions {
    /// Default limits, but duplicate keys are rejected and numbers are kept exact.
    pub fn strict() -> Self {
        ParseOptions {
            duplicate_keys: DuplicateKeys::Reject,
            number_mode: NumberMode::Exact,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    pub fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    pub fn with_number_mode(mut self, mode: NumberMode) -> Self {
        self.number_mode = mode;
        self
    }
}
