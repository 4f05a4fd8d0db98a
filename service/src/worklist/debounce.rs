//! [`Debounce`] primitive.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time};
use tracing as log;

/// Input of a [`Debounce`] background task.
#[derive(Debug)]
enum Input<T> {
    /// New value, replacing the pending one.
    Push(T),

    /// Discards the pending value.
    Cancel,
}

/// Delay-coalescing primitive.
///
/// Emits the last pushed value once no new value has been pushed for the
/// configured delay. Values pending when the [`Debounce`] is dropped are
/// discarded.
#[derive(Debug)]
pub struct Debounce<T> {
    /// Sender of inputs to the background task.
    input: mpsc::UnboundedSender<Input<T>>,

    /// Background task performing the delaying.
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debounce<T> {
    /// Spawns a new [`Debounce`] calling the provided `emit` with settled
    /// values.
    ///
    /// # Panics
    ///
    /// If called outside of a [Tokio] runtime.
    ///
    /// [Tokio]: https://tokio.rs
    pub fn new<F>(delay: Duration, mut emit: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (input, mut rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut pending = None;
            loop {
                let next = if pending.is_some() {
                    match time::timeout(delay, rx.recv()).await {
                        Ok(next) => next,
                        Err(_) => {
                            if let Some(value) = pending.take() {
                                emit(value);
                            }
                            continue;
                        }
                    }
                } else {
                    rx.recv().await
                };
                match next {
                    Some(Input::Push(value)) => pending = Some(value),
                    Some(Input::Cancel) => pending = None,
                    None => break,
                }
            }
            log::trace!("debounce stopped");
        });
        Self { input, task }
    }
}

impl<T> Debounce<T> {
    /// Pushes a new value, restarting the delay.
    pub fn push(&self, value: T) {
        _ = self.input.send(Input::Push(value));
    }

    /// Discards the pending value, if any.
    pub fn cancel(&self) {
        _ = self.input.send(Input::Cancel);
    }
}

impl<T> Drop for Debounce<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
