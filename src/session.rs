/// `InertiaSession` holds the session-backed flags the page builder consumes.
///
/// Inertia doesn't talk to a session store by itself. Either call
/// `clear_history` from a handler, or inject it from your framework session
/// manager with a middleware placed before Inertia's.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InertiaSession {
    pub clear_history: bool,
}

impl InertiaSession {
    /// Reads the clear-history flag and resets it, so it only applies to one page.
    pub fn take_clear_history(&mut self) -> bool {
        std::mem::take(&mut self.clear_history)
    }
}
