//! Runs presenter effects on the tokio runtime and reports their results
//! back to the app loop as actions.

use std::future::Future;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::action::Action;

/// Spawn `effect`; when it resolves, send `into_action(output)`.
pub fn spawn<F, W>(action_tx: &UnboundedSender<Action>, effect: F, into_action: W)
where
    F: Future + Send + 'static,
    F::Output: Send,
    W: FnOnce(F::Output) -> Action + Send + 'static,
{
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let output = effect.await;
        // Receiver gone means the app is shutting down
        if tx.send(into_action(output)).is_err() {
            debug!("dropping effect result after shutdown");
        }
    });
}

/// Spawn an effect whose outcome the UI does not wait for.
pub fn detach<F>(effect: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(effect);
}
