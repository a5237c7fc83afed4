//! Request-generation guard ("last request wins").

/// Hands out increasing generation numbers for outgoing requests and tells
/// whether a response still belongs to the newest one.
///
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    generation: u64,
}

impl RequestGuard {
    pub fn new() -> Self {
        RequestGuard::default()
    }

    /// Start a new request, superseding every earlier one.
    ///
    pub fn issue(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_newest_generation_is_current() {
        let mut guard = RequestGuard::new();
        let first = guard.issue();
        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }
}
