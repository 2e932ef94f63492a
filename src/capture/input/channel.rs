use crate::capture::input::types::PointerEvent;
use parking_lot::Mutex as ParkingMutex;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use thiserror::Error;

/// Errors raised while persisting or loading recorded gestures
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Already recording")]
    AlreadyRecording,

    #[error("Not recording")]
    NotRecording,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// An event as seen by a subscriber, stamped with the channel's
/// connectivity at the moment it was emitted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedEvent {
    pub event: PointerEvent,
    pub connected: bool,
}

type EventQueue = Arc<ParkingMutex<VecDeque<QueuedEvent>>>;
type SubscriberList = Arc<ParkingMutex<Vec<(u64, EventQueue)>>>;

/// Pointer source shared between the device layer and the game loop.
///
/// The device side calls [`PointerChannel::emit`] (from any thread); each
/// [`Subscription`] receives its own ordered copy of the events and is
/// drained on the game loop. Dropping a subscription deregisters it.
pub struct PointerChannel {
    id: String,
    connected: Arc<AtomicBool>,
    subscribers: SubscriberList,
    next_subscriber: AtomicU64,
    is_recording: AtomicBool,
    recorded: ParkingMutex<Vec<PointerEvent>>,
}

impl PointerChannel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            connected: Arc::new(AtomicBool::new(false)),
            subscribers: Arc::new(ParkingMutex::new(Vec::new())),
            next_subscriber: AtomicU64::new(0),
            is_recording: AtomicBool::new(false),
            recorded: ParkingMutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn set_connected(&self, connected: bool) {
        let was = self.connected.swap(connected, Ordering::SeqCst);
        if was != connected {
            tracing::info!(
                "Pointer channel {} {}",
                self.id,
                if connected { "connected" } else { "disconnected" }
            );
        }
    }

    /// Register a new listener. Events emitted from now on are queued for it.
    pub fn subscribe(&self) -> Subscription {
        let id = self.next_subscriber.fetch_add(1, Ordering::Relaxed);
        let queue: EventQueue = Arc::new(ParkingMutex::new(VecDeque::new()));
        self.subscribers.lock().push((id, queue.clone()));

        tracing::debug!("Pointer channel {}: subscriber {} registered", self.id, id);

        Subscription {
            id,
            queue,
            connected: self.connected.clone(),
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Fan an event out to every live subscriber
    pub fn emit(&self, event: PointerEvent) {
        if self.is_recording.load(Ordering::SeqCst) {
            self.recorded.lock().push(event);
        }
        let queued = QueuedEvent {
            event,
            connected: self.is_connected(),
        };
        for (_, queue) in self.subscribers.lock().iter() {
            queue.lock().push_back(queued);
        }
    }

    /// Emit a whole recorded gesture in order
    pub fn replay(&self, events: &[PointerEvent]) {
        for event in events {
            self.emit(*event);
        }
    }

    pub fn start_recording(&self) -> CaptureResult<()> {
        if self.is_recording.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::AlreadyRecording);
        }
        self.recorded.lock().clear();
        tracing::info!("Pointer recording started on {}", self.id);
        Ok(())
    }

    /// Stop recording and hand back everything emitted since the start
    pub fn stop_recording(&self) -> CaptureResult<Vec<PointerEvent>> {
        if !self.is_recording.swap(false, Ordering::SeqCst) {
            return Err(CaptureError::NotRecording);
        }
        let events = std::mem::take(&mut *self.recorded.lock());
        tracing::info!("Pointer recording stopped on {} (events={})", self.id, events.len());
        Ok(events)
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }
}

/// Scoped registration on a [`PointerChannel`]
pub struct Subscription {
    id: u64,
    queue: EventQueue,
    connected: Arc<AtomicBool>,
    subscribers: Weak<ParkingMutex<Vec<(u64, EventQueue)>>>,
}

impl Subscription {
    /// Take every queued event, oldest first
    pub fn drain(&self) -> Vec<QueuedEvent> {
        self.queue.lock().drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Connectivity of the channel this subscription came from
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.lock().retain(|(id, _)| *id != self.id);
            tracing::debug!("Pointer subscriber {} released", self.id);
        }
    }
}

/// Write a recorded gesture as a JSON array of events
pub fn write_gesture(path: &Path, events: &[PointerEvent]) -> CaptureResult<()> {
    let data = serde_json::to_vec_pretty(events)?;
    std::fs::write(path, data)?;
    Ok(())
}

pub fn read_gesture(path: &Path) -> CaptureResult<Vec<PointerEvent>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::input::types::{GesturePhase, PointerSample};

    fn swipe() -> Vec<PointerEvent> {
        vec![
            PointerEvent::start(PointerSample::at(0.1, 0.5, 0.0)),
            PointerEvent::hold(PointerSample::at(0.2, 0.5, 16.0)),
            PointerEvent::end(PointerSample::at(0.3, 0.5, 32.0)),
        ]
    }

    #[test]
    fn test_events_fan_out_in_order() {
        let channel = PointerChannel::new("test");
        let a = channel.subscribe();
        let b = channel.subscribe();

        channel.replay(&swipe());

        let phases: Vec<GesturePhase> = a.drain().iter().map(|q| q.event.phase).collect();
        assert_eq!(phases, vec![GesturePhase::Start, GesturePhase::Hold, GesturePhase::End]);
        assert_eq!(b.pending(), 3);
        assert_eq!(a.pending(), 0);
    }

    #[test]
    fn test_drop_deregisters() {
        let channel = PointerChannel::new("test");
        let first = channel.subscribe();
        {
            let _second = channel.subscribe();
            assert_eq!(channel.subscriber_count(), 2);
        }
        assert_eq!(channel.subscriber_count(), 1);

        drop(first);
        assert_eq!(channel.subscriber_count(), 0);

        // Emitting with nobody listening is harmless
        channel.emit(swipe()[0]);
    }

    #[test]
    fn test_subscription_outliving_channel() {
        let channel = PointerChannel::new("test");
        let subscription = channel.subscribe();
        drop(channel);
        assert!(subscription.drain().is_empty());
        drop(subscription);
    }

    #[test]
    fn test_connectivity_is_visible_to_subscribers() {
        let channel = PointerChannel::new("test");
        let subscription = channel.subscribe();
        assert!(!subscription.is_connected());

        channel.set_connected(true);
        assert!(subscription.is_connected());
        assert!(channel.is_connected());
    }

    #[test]
    fn test_events_carry_connectivity_at_emit() {
        let channel = PointerChannel::new("test");
        let subscription = channel.subscribe();

        channel.emit(swipe()[0]);
        channel.set_connected(true);
        channel.emit(swipe()[1]);
        channel.set_connected(false);

        let connected: Vec<bool> = subscription.drain().iter().map(|q| q.connected).collect();
        assert_eq!(connected, vec![false, true]);
    }

    #[test]
    fn test_recording_lifecycle() {
        let channel = PointerChannel::new("test");
        assert!(matches!(channel.stop_recording(), Err(CaptureError::NotRecording)));

        channel.start_recording().unwrap();
        assert!(matches!(channel.start_recording(), Err(CaptureError::AlreadyRecording)));

        channel.replay(&swipe());
        let recorded = channel.stop_recording().unwrap();
        assert_eq!(recorded, swipe());
        assert!(!channel.is_recording());
    }

    #[test]
    fn test_gesture_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swipe.json");

        write_gesture(&path, &swipe()).unwrap();
        let loaded = read_gesture(&path).unwrap();
        assert_eq!(loaded, swipe());
    }
}
