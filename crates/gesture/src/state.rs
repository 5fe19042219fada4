use serde::{Deserialize, Serialize};

/// Lifecycle of a gesture recognizer.
///
/// Discrete gestures go `Possible -> Recognized`; continuous gestures go
/// `Possible -> Began -> Changed* -> Ended | Cancelled`. Any recognizer may
/// drop to `Failed` while its gesture is still possible.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
    Recognized,
}

impl GestureState {
    /// States from which only a reset leads back to `Possible`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed | Self::Recognized)
    }

    /// States reported to gesture listeners.
    pub fn notifies_listeners(self) -> bool {
        matches!(self, Self::Began | Self::Changed | Self::Ended | Self::Recognized)
    }

    /// States that affect recognizers waiting on this one to fail.
    pub fn notifies_dependants(self) -> bool {
        matches!(self, Self::Began | Self::Failed | Self::Recognized)
    }

    /// A continuous gesture that is in progress.
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }

    /// Entering these states requires agreement from other recognizers.
    pub fn needs_negotiation(self) -> bool {
        matches!(self, Self::Began | Self::Recognized)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Possible => "possible",
            Self::Began => "began",
            Self::Changed => "changed",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Recognized => "recognized",
        }
    }
}

impl std::fmt::Display for GestureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::GestureState::{self, *};

    const ALL: [GestureState; 7] = [Possible, Began, Changed, Ended, Cancelled, Failed, Recognized];

    #[test]
    fn state_classes() {
        let terminal: Vec<_> = ALL.iter().copied().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![Ended, Cancelled, Failed, Recognized]);

        let listened: Vec<_> = ALL.iter().copied().filter(|s| s.notifies_listeners()).collect();
        assert_eq!(listened, vec![Began, Changed, Ended, Recognized]);

        let dependant: Vec<_> = ALL.iter().copied().filter(|s| s.notifies_dependants()).collect();
        assert_eq!(dependant, vec![Began, Failed, Recognized]);
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Recognized).unwrap(), "\"recognized\"");
        assert_eq!(Cancelled.to_string(), "cancelled");
    }
}
