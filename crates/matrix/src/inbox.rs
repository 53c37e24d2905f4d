//! Receiving named arrays from other processes
//!
//! A remote process sends dense arrays as JSON encoded [ArrayMessage]s. These
//! are queued in an [Inbox], and a [Handler] polls the inbox on a background
//! thread, converting every message into a [DataMatrix] for a user callback.
//!
//! ```rust
//! # use scoring_matrix::{ArrayMessage, Handler, Inbox};
//! # use std::sync::{mpsc, Arc};
//! # use std::time::Duration;
//! let inbox = Arc::new(Inbox::new());
//! let (sender, receiver) = mpsc::channel();
//!
//! let handler = Handler::start(inbox.clone(), Duration::from_millis(10), move |name, matrix| {
//!     sender.send((name, matrix.shape())).unwrap();
//! });
//!
//! inbox.push_json(r#"{"name": "edep", "shape": [2, 2], "data": [1, 2, 3, 4]}"#).unwrap();
//!
//! let (name, shape) = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
//! assert_eq!(name, "edep");
//! assert_eq!(shape, [2, 2, 1]);
//!
//! handler.stop();
//! ```

// crate modules
use crate::error::Result;
use crate::matrix::DataMatrix;

// standard library
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

// external crates
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Default time between polls of the inbox
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// A named dense array
///
/// The `data` are in row-major order. The `shape` may have one to three
/// dimensions, and if it is missing entirely the data are taken as a flat 1D
/// array. A missing name defaults to `"data"`.
///
/// ```rust
/// # use scoring_matrix::ArrayMessage;
/// let message = ArrayMessage::from_json(r#"{"data": [1.0, 2.0, 3.0]}"#).unwrap();
/// assert_eq!(message.name, "data");
///
/// let matrix = message.into_matrix().unwrap();
/// assert_eq!(matrix.shape(), [3, 1, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayMessage {
    /// Name of the array
    #[serde(default = "default_name")]
    pub name: String,
    /// Extent of every dimension
    #[serde(default)]
    pub shape: Vec<usize>,
    /// Flat buffer of values
    pub data: Vec<f64>,
}

fn default_name() -> String {
    "data".to_string()
}

impl ArrayMessage {
    /// Message for the values of an existing matrix
    pub fn from_matrix(name: &str, matrix: &DataMatrix) -> Self {
        Self {
            name: name.to_string(),
            shape: matrix.shape().to_vec(),
            data: matrix.values().to_vec(),
        }
    }

    /// Decode a message from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode the message as JSON text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Convert the array into a [DataMatrix], padding the shape to 3D
    pub fn into_matrix(self) -> Result<DataMatrix> {
        if self.shape.is_empty() {
            let len = self.data.len();
            return DataMatrix::from_shape_vec(&[len], self.data);
        }
        DataMatrix::from_shape_vec(&self.shape, self.data)
    }
}

/// Thread-safe first-in first-out queue of messages
///
/// Once closed, no more messages are accepted, but anything already queued
/// can still be taken.
#[derive(Debug, Default)]
pub struct Inbox {
    queue: Mutex<VecDeque<ArrayMessage>>,
    closed: AtomicBool,
}

impl Inbox {
    /// New open and empty inbox
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a message to the back of the queue
    ///
    /// Returns `false` if the inbox is closed and the message was dropped.
    pub fn push(&self, message: ArrayMessage) -> bool {
        if self.is_closed() {
            warn!("Inbox is closed, dropped message \"{}\"", message.name);
            return false;
        }
        debug!("Received message \"{}\"", message.name);
        self.queue().push_back(message);
        true
    }

    /// Decode a JSON message and add it to the queue
    pub fn push_json(&self, text: &str) -> Result<bool> {
        Ok(self.push(ArrayMessage::from_json(text)?))
    }

    /// Take the oldest message, if any
    pub fn pop(&self) -> Option<ArrayMessage> {
        self.queue().pop_front()
    }

    /// Check for any waiting messages
    pub fn has_message(&self) -> bool {
        !self.queue().is_empty()
    }

    /// Number of waiting messages
    pub fn len(&self) -> usize {
        self.queue().len()
    }

    /// Check for no waiting messages
    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }

    /// Stop accepting new messages
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Check if the inbox has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<ArrayMessage>> {
        // the queue is never left half modified, so a poisoned lock is usable
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Polls an [Inbox] on a background thread
///
/// Every poll takes all waiting messages, converts each into a [DataMatrix]
/// and passes `(name, matrix)` to the callback. Messages that can not be
/// converted are logged and skipped.
///
/// Polling ends when [stop()](Handler::stop) is called, the handler is
/// dropped, or the inbox is closed and fully drained.
#[derive(Debug)]
pub struct Handler {
    stopped: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Handler {
    /// Spawn the polling thread
    pub fn start<F>(inbox: Arc<Inbox>, interval: Duration, mut callback: F) -> Self
    where
        F: FnMut(String, DataMatrix) + Send + 'static,
    {
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = stopped.clone();

        let thread = thread::spawn(move || {
            while !flag.load(Ordering::Acquire) {
                while let Some(message) = inbox.pop() {
                    let name = message.name.clone();
                    match message.into_matrix() {
                        Ok(matrix) => callback(name, matrix),
                        Err(e) => warn!("Skipped message \"{name}\": {e}"),
                    }
                }

                if inbox.is_closed() && inbox.is_empty() {
                    debug!("Inbox closed, polling finished");
                    break;
                }

                thread::park_timeout(interval);
            }
        });

        Self {
            stopped,
            thread: Some(thread),
        }
    }

    /// Check if the polling thread is still going
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop polling and wait for the thread to finish
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            thread.thread().unpark();
            if thread.join().is_err() {
                warn!("Inbox handler thread panicked");
            }
        }
    }
}

impl Drop for Handler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn message(name: &str, shape: &[usize]) -> ArrayMessage {
        let len = shape.iter().product();
        ArrayMessage {
            name: name.to_string(),
            shape: shape.to_vec(),
            data: (0..len).map(|i| i as f64).collect(),
        }
    }

    #[test]
    fn first_in_first_out() {
        let inbox = Inbox::new();
        assert!(!inbox.has_message());
        inbox.push(message("a", &[1]));
        inbox.push(message("b", &[1]));
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox.pop().unwrap().name, "a");
        assert_eq!(inbox.pop().unwrap().name, "b");
        assert!(inbox.pop().is_none());
    }

    #[test]
    fn closed_inbox_rejects() {
        let inbox = Inbox::new();
        inbox.push(message("kept", &[1]));
        inbox.close();
        assert!(!inbox.push(message("dropped", &[1])));
        assert_eq!(inbox.len(), 1);
        assert!(inbox.is_closed());
    }

    #[test]
    fn shapes_are_padded() {
        assert_eq!(message("", &[4]).into_matrix().unwrap().shape(), [4, 1, 1]);
        assert_eq!(message("", &[2, 3]).into_matrix().unwrap().shape(), [2, 3, 1]);
        assert_eq!(message("", &[2, 3, 4]).into_matrix().unwrap().shape(), [2, 3, 4]);
        assert!(message("", &[1, 1, 1, 2]).into_matrix().is_err());
    }

    #[test]
    fn json_round_trip() {
        let original = message("edep", &[2, 2]);
        let decoded = ArrayMessage::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(decoded, original);
        assert!(ArrayMessage::from_json("{\"name\": \"x\"}").is_err());
    }

    #[test]
    fn handler_drains_closed_inbox() {
        let inbox = Arc::new(Inbox::new());
        inbox.push(message("first", &[2]));
        inbox.push(message("broken", &[5, 5]));
        inbox.push(message("second", &[1, 2, 2]));
        // the data length does not match the shape
        if let Some(m) = inbox.queue().get_mut(1) {
            m.data.truncate(3);
        }
        inbox.close();

        let (sender, receiver) = mpsc::channel();
        let handler = Handler::start(inbox.clone(), Duration::from_millis(1), move |name, _| {
            sender.send(name).unwrap();
        });

        let names: Vec<String> = receiver.iter().collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(inbox.is_empty());
        handler.stop();
    }
}
