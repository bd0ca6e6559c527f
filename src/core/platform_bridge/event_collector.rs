//=========================================================================
// Event Queue
//=========================================================================
//
// Single-threaded platform event queue between a backend's callback
// handler and the frame loop's drain.
//
// Architecture:
//   ApplicationHandler ──EventSender::push()──► channel ──EventQueue::poll()──► FrameLoop
//
// The drain is unbounded by design: it stops only when the queue is
// empty. A vanished sender reads as one `Quit`.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::input::PlatformEvent;

//=== EventSender =========================================================

/// Producer half, owned by the backend's event handler.
#[derive(Debug, Clone)]
pub(crate) struct EventSender {
    sender: Sender<PlatformEvent>,
}

impl EventSender {
    pub(crate) fn push(&self, event: PlatformEvent) {
        if self.sender.send(event).is_err() {
            warn!(target: "platform", "Event queue closed, dropping {:?}", event);
        }
    }
}

//=== EventQueue ==========================================================

/// Consumer half, polled by the display backend.
#[derive(Debug)]
pub(crate) struct EventQueue {
    receiver: Receiver<PlatformEvent>,
    disconnected: bool,
}

impl EventQueue {
    pub(crate) fn new() -> (EventSender, Self) {
        let (sender, receiver) = unbounded();
        (
            EventSender { sender },
            Self {
                receiver,
                disconnected: false,
            },
        )
    }

    /// Next queued event, or `None` when the queue is empty.
    pub(crate) fn poll(&mut self) -> Option<PlatformEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) if !self.disconnected => {
                self.disconnected = true;
                Some(PlatformEvent::Quit)
            }
            Err(TryRecvError::Disconnected) => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    #[test]
    fn poll_handles_empty_queue() {
        let (_tx, mut queue) = EventQueue::new();
        assert_eq!(queue.poll(), None);
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn poll_preserves_arrival_order() {
        let (tx, mut queue) = EventQueue::new();

        tx.push(PlatformEvent::KeyDown(KeyCode::KeyA));
        tx.push(PlatformEvent::MouseMoved { x: 10.0, y: 20.0 });
        tx.push(PlatformEvent::Quit);

        assert_eq!(queue.poll(), Some(PlatformEvent::KeyDown(KeyCode::KeyA)));
        assert_eq!(queue.poll(), Some(PlatformEvent::MouseMoved { x: 10.0, y: 20.0 }));
        assert_eq!(queue.poll(), Some(PlatformEvent::Quit));
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn disconnect_reads_as_single_quit() {
        let (tx, mut queue) = EventQueue::new();
        tx.push(PlatformEvent::KeyUp(KeyCode::Space));
        drop(tx);

        assert_eq!(queue.poll(), Some(PlatformEvent::KeyUp(KeyCode::Space)));
        assert_eq!(queue.poll(), Some(PlatformEvent::Quit));
        assert_eq!(queue.poll(), None);
    }
}
