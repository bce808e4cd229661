/// The label property read when none is configured.
pub const DEFAULT_LABEL_PROPERTY: &str = "default";

/// Knobs of a single matching invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Name of the integer vertex property used as the label.
    pub label_property: String,
    /// Require `out_deg(v) >= out_deg(u)` for a candidate `v` of `u`.
    pub degree_filter: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            label_property: String::from(DEFAULT_LABEL_PROPERTY),
            degree_filter: true,
        }
    }
}

impl MatchConfig {
    pub fn label_property(mut self, label_property: &str) -> Self {
        self.label_property = String::from(label_property);
        self
    }

    pub fn degree_filter(mut self, degree_filter: bool) -> Self {
        self.degree_filter = degree_filter;
        self
    }
}
