use std::fmt;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use super::cell::Ref;
use crate::capability::TellCapability;

/// The edge Tell capability that appends every message to a [`Ref`].
pub struct LogTell<W> {
    log: Arc<Ref<Vec<W>>>,
}

impl<W> LogTell<W> {
    /// Creates a capability over a fresh, empty log.
    pub fn new() -> Self {
        Self::from_ref(Arc::new(Ref::new(Vec::new())))
    }

    /// Creates a capability appending to an existing log.
    pub const fn from_ref(log: Arc<Ref<Vec<W>>>) -> Self {
        Self { log }
    }

    /// The backing log.
    pub const fn log(&self) -> &Arc<Ref<Vec<W>>> {
        &self.log
    }
}

impl<W: Clone> LogTell<W> {
    /// Everything told so far, oldest first.
    pub fn messages(&self) -> Vec<W> {
        self.log.get()
    }
}

impl<W> Default for LogTell<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Clone + Send + Sync> TellCapability<W> for LogTell<W> {
    fn tell(&self, message: W) {
        loop {
            let current = self.log.read();
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend_from_slice(&current);
            next.push(message.clone());
            if self.log.compare_and_set(&current, next) {
                return;
            }
        }
    }
}

/// The edge Tell capability that hands every message to a callback running
/// on one dedicated consumer thread.
///
/// Producers and consumer meet at a single buffered slot: `tell` blocks while
/// the slot is occupied, so a slow callback holds producers back. The
/// consumer takes messages strictly in the order they entered the slot.
///
/// Dropping the capability shuts it down as [`SequencedTell::shutdown`] does.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use shapelift::capability::TellCapability;
/// use shapelift::edge::SequencedTell;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let tell = SequencedTell::spawn(move |line: String| sink.lock().unwrap().push(line)).unwrap();
/// tell.tell("a".to_string());
/// tell.tell("b".to_string());
/// tell.shutdown().unwrap();
/// assert_eq!(*seen.lock().unwrap(), ["a", "b"]);
/// ```
pub struct SequencedTell<W> {
    sender: RwLock<Option<Sender<W>>>,
    consumer: Mutex<Option<JoinHandle<()>>>,
}

impl<W: Send + 'static> SequencedTell<W> {
    /// Starts the consumer thread running `callback`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the thread cannot be spawned.
    pub fn spawn<F>(callback: F) -> io::Result<Self>
    where
        F: Fn(W) + Send + 'static,
    {
        let (sender, receiver) = crossbeam_channel::bounded::<W>(1);
        let consumer = thread::Builder::new()
            .name("shapelift-tell".to_string())
            .spawn(move || {
                for message in receiver {
                    callback(message);
                }
            })?;
        Ok(Self {
            sender: RwLock::new(Some(sender)),
            consumer: Mutex::new(Some(consumer)),
        })
    }
}

impl<W> SequencedTell<W> {
    /// Stops accepting messages, waits for the consumer to drain everything
    /// already told, and joins it.
    ///
    /// Calling it again is a no-op. Messages told afterwards are dropped.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the callback panicked.
    pub fn shutdown(&self) -> thread::Result<()> {
        drop(self.sender.write().take());
        match self.consumer.lock().take() {
            Some(consumer) => {
                debug!("joining tell consumer");
                consumer.join()
            }
            None => Ok(()),
        }
    }
}

impl<W: Send> TellCapability<W> for SequencedTell<W> {
    fn tell(&self, message: W) {
        let sender = self.sender.read();
        match sender.as_ref() {
            Some(sender) => {
                if sender.send(message).is_err() {
                    warn!("tell consumer has stopped, message dropped");
                }
            }
            None => warn!("tell after shutdown, message dropped"),
        }
    }
}

impl<W> Drop for SequencedTell<W> {
    fn drop(&mut self) {
        if self.shutdown().is_err() {
            warn!("tell consumer panicked");
        }
    }
}

impl<W> fmt::Debug for SequencedTell<W> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SequencedTell")
            .field("open", &self.sender.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_log_tell_keeps_per_thread_order() {
        let log = LogTell::new();
        thread::scope(|scope| {
            for producer in 0..4_u32 {
                let log = &log;
                scope.spawn(move || {
                    for sequence in 0..50_u32 {
                        log.tell((producer, sequence));
                    }
                });
            }
        });
        let messages = log.messages();
        assert_eq!(messages.len(), 200);
        for producer in 0..4 {
            let sequences: Vec<u32> = messages
                .iter()
                .filter(|(from, _)| *from == producer)
                .map(|(_, sequence)| *sequence)
                .collect();
            assert_eq!(sequences, (0..50).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_sequenced_tell_preserves_order() {
        let log = Arc::new(LogTell::new());
        let sink = Arc::clone(&log);
        let tell = SequencedTell::spawn(move |n: u32| sink.tell(n)).unwrap();
        for n in 0..100 {
            tell.tell(n);
        }
        tell.shutdown().unwrap();
        assert_eq!(log.messages(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_occupied_slot_blocks_producer() {
        let (started_sender, started) = crossbeam_channel::unbounded();
        let (release, gate) = crossbeam_channel::unbounded::<()>();
        let tell = SequencedTell::spawn(move |n: u8| {
            let _ = started_sender.send(n);
            let _ = gate.recv();
        })
        .unwrap();

        tell.tell(1);
        assert_eq!(started.recv().unwrap(), 1);
        tell.tell(2);

        let (done_sender, done) = crossbeam_channel::bounded(1);
        thread::scope(|scope| {
            scope.spawn(|| {
                tell.tell(3);
                let _ = done_sender.send(());
            });
            assert!(done.recv_timeout(Duration::from_millis(100)).is_err());
            for _ in 0..3 {
                release.send(()).unwrap();
            }
            done.recv().unwrap();
        });
        tell.shutdown().unwrap();
        assert_eq!(started.try_iter().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_tell_after_shutdown_is_dropped() {
        let log = Arc::new(LogTell::new());
        let sink = Arc::clone(&log);
        let tell = SequencedTell::spawn(move |n: u8| sink.tell(n)).unwrap();
        tell.tell(1);
        tell.shutdown().unwrap();
        tell.tell(2);
        assert!(tell.shutdown().is_ok());
        assert_eq!(log.messages(), vec![1]);
    }
}
