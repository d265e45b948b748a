//! In-page change notification for auth-session views.
//!
//! DESIGN
//! ======
//! Every mounted session view subscribes once. A view that changes state posts
//! a notification; delivery always happens on a later tick through a
//! [`Deferrer`], never on the poster's call stack, so a listener that reacts
//! by refreshing cannot recurse into the refresh that posted it.

#[cfg(test)]
#[path = "auth_channel_test.rs"]
mod auth_channel_test;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Identifies one channel subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Runs a task on a later turn of the event loop.
pub trait Deferrer {
    fn defer(&self, task: Box<dyn FnOnce()>);
}

/// Zero-delay browser timeout.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct NextTick;

#[cfg(feature = "hydrate")]
impl Deferrer for NextTick {
    fn defer(&self, task: Box<dyn FnOnce()>) {
        gloo_timers::callback::Timeout::new(0, task).forget();
    }
}

/// Explicitly driven task queue.
///
/// Server rendering never ticks it (sessions do not hydrate there), and tests
/// tick it to step through event-loop turns deterministically.
#[derive(Default)]
pub struct TaskQueue {
    tasks: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl TaskQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the tasks that were queued before this call. Tasks they queue wait
    /// for the next tick. Returns how many tasks ran.
    pub fn tick(&self) -> usize {
        let batch: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
        let ran = batch.len();
        for task in batch {
            task();
        }
        ran
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Deferrer for TaskQueue {
    fn defer(&self, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push_back(task);
    }
}

/// The deferrer appropriate for the current build.
#[must_use]
pub fn default_deferrer() -> Rc<dyn Deferrer> {
    #[cfg(feature = "hydrate")]
    {
        Rc::new(NextTick)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Rc::new(TaskQueue::new())
    }
}

type Listener = Rc<dyn Fn()>;

/// Broadcast channel shared by the session views of one page.
pub struct AuthChannel {
    listeners: RefCell<Vec<(SubscriberId, Listener)>>,
    next_id: Cell<u64>,
    deferrer: Rc<dyn Deferrer>,
    this: Weak<AuthChannel>,
}

impl AuthChannel {
    pub fn new(deferrer: Rc<dyn Deferrer>) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            deferrer,
            this: this.clone(),
        })
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Schedule one delivery to every subscriber except `origin`.
    pub fn post(&self, origin: Option<SubscriberId>) {
        let channel = self.this.clone();
        self.deferrer.defer(Box::new(move || {
            if let Some(channel) = channel.upgrade() {
                channel.deliver(origin);
            }
        }));
    }

    fn deliver(&self, origin: Option<SubscriberId>) {
        let targets: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(id, _)| Some(*id) != origin)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in targets {
            listener();
        }
    }
}
