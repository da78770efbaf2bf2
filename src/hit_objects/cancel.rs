use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative abort flag polled by nested object generation
/// before every emitted object.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

/// Signal that never fires
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelSignal for AtomicBool {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Creates a stop channel, cancellation is requested by sending `()`.
/// Dropping the sender without sending does not cancel anything.
pub fn channel() -> (oneshot::Sender<()>, CancelReceiver) {
    let (tx, rx) = oneshot::channel();
    (tx, CancelReceiver::from(rx))
}

/// Stop receiver that stays cancelled once the stop message
/// was received, so it can be reused across generation runs.
pub struct CancelReceiver {
    rx: oneshot::Receiver<()>,
    stopped: AtomicBool,
}

impl From<oneshot::Receiver<()>> for CancelReceiver {
    fn from(rx: oneshot::Receiver<()>) -> Self {
        Self {
            rx,
            stopped: AtomicBool::new(false),
        }
    }
}

impl CancelSignal for CancelReceiver {
    fn is_cancelled(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        // try_recv takes the message out, the flag remembers it
        if self.rx.try_recv().is_ok() {
            self.stopped.store(true, Ordering::Relaxed);
            return true;
        }

        false
    }
}

impl<T: CancelSignal + ?Sized> CancelSignal for &T {
    #[inline]
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

#[test]
fn test_receiver_stays_cancelled() {
    let (tx, rx) = channel();
    assert!(!rx.is_cancelled());

    tx.send(()).unwrap();

    assert!(rx.is_cancelled());
    assert!(rx.is_cancelled());
}

#[test]
fn test_dropped_sender_never_cancels() {
    let (tx, rx) = channel();
    drop(tx);

    assert!(!rx.is_cancelled());
    assert!(!rx.is_cancelled());
}
