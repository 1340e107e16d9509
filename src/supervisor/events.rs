// src/supervisor/events.rs
// Event source port: what the page and the popup tell the supervisor.

use std::time::Duration;

use crate::host::Host;
use crate::messages::Message;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Something under the body changed (child list, subtree).
    Mutation,
    /// Address changed without a reload (pushState).
    AddressChanged,
    /// Back/forward.
    HistoryPop,
    Message(Message),
}

/// Events that arrive together, followed by `wait` of quiet time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    pub wait: Duration,
    pub events: Vec<Event>,
}

/// Production adapters watch a live page; the test adapter replays a script.
///
/// `next_batch` applies the batch's own changes to `tree`/`host` before
/// returning the signals they would raise. `None` ends the stream.
pub trait EventSource<T: ?Sized> {
    fn next_batch(&mut self, tree: &mut T, host: &mut dyn Host) -> Option<Batch>;
}

/// Fixed batches, no tree changes. Handy for driving timers alone.
impl<T: ?Sized> EventSource<T> for std::vec::IntoIter<Batch> {
    fn next_batch(&mut self, _tree: &mut T, _host: &mut dyn Host) -> Option<Batch> {
        self.next()
    }
}
