//! `Navigator` backed by the action channel: `back()` becomes `Action::GoBack`.

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use heroes_core::Navigator;

use crate::action::Action;

#[derive(Debug, Clone)]
pub struct ActionNavigator {
    action_tx: UnboundedSender<Action>,
}

impl ActionNavigator {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

impl Navigator for ActionNavigator {
    fn back(&self) {
        if self.action_tx.send(Action::GoBack).is_err() {
            debug!("navigator used after shutdown");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn back_sends_go_back() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        ActionNavigator::new(tx).back();
        assert!(matches!(rx.try_recv().unwrap(), Action::GoBack));
    }
}
