/// Handle for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// A cancellable repeating frame request. Only the most recently issued
/// token is honoured; anything older is a stale callback.
#[derive(Debug, Default)]
pub struct FrameLoop {
    issued: u64,
    scheduled: Option<FrameToken>,
}

impl FrameLoop {
    pub fn schedule(&mut self) -> FrameToken {
        self.issued += 1;
        let token = FrameToken(self.issued);
        self.scheduled = Some(token);
        token
    }

    pub fn cancel(&mut self) {
        self.scheduled = None;
    }

    pub fn scheduled(&self) -> Option<FrameToken> {
        self.scheduled
    }

    /// Consumes `token` if it is the one currently scheduled.
    pub fn take(&mut self, token: FrameToken) -> bool {
        if self.scheduled == Some(token) {
            self.scheduled = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_token_fires() {
        let mut frames = FrameLoop::default();
        let first = frames.schedule();
        let second = frames.schedule();
        assert!(!frames.take(first));
        assert!(frames.take(second));
        assert!(!frames.take(second));
    }

    #[test]
    fn cancel_discards_pending_token() {
        let mut frames = FrameLoop::default();
        let token = frames.schedule();
        frames.cancel();
        assert_eq!(frames.scheduled(), None);
        assert!(!frames.take(token));
    }
}
