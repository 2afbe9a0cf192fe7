// Match-ending signal reported to the navigation collaborator.

/// Navigation destination requested when a match ends. The end page is the only one the
/// simulation ever asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Ended { destination: Page },
}

/// Guards the `Playing -> Ended` transition so it is observed exactly once.
///
/// Collision passes call [`OutcomeSignal::raise`] once per qualifying entity; only the first
/// call in a session changes state.
#[derive(Debug)]
pub struct OutcomeSignal {
    state: Outcome,
}

impl Default for OutcomeSignal {
    fn default() -> Self {
        Self {
            state: Outcome::Playing,
        }
    }
}

impl OutcomeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the call that performs the transition.
    pub fn raise(&mut self, destination: Page) -> bool {
        match self.state {
            Outcome::Playing => {
                self.state = Outcome::Ended { destination };
                true
            }
            Outcome::Ended { .. } => false,
        }
    }

    pub fn state(&self) -> Outcome {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.state, Outcome::Ended { .. })
    }
}
