/// Bounds on caller-supplied fact input
///
/// Applied when facts are parsed from the command line or a request body,
/// before they reach the engine. Generous for any real diagnostic session.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum number of facts in one fact set
    /// Real usage: ~15, Limit: 256
    pub max_facts: usize,

    /// Maximum length of a fact key in bytes
    pub max_key_bytes: usize,

    /// Maximum length of a text fact value in bytes
    pub max_value_bytes: usize,

    /// Maximum size of a JSON request body in bytes
    pub max_request_bytes: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_facts: 256,
            max_key_bytes: 128,
            max_value_bytes: 1024,        // 1 KB
            max_request_bytes: 64 * 1024, // 64 KB
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
