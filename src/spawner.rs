use std::fmt::{self, Formatter, Debug};
use std::sync::Arc;
use std::thread;

use log::{error, trace};

/// A trait for spawning threads.
///
/// Every producer and every chained continuation runs on a task obtained from a `Spawner`. A
/// promise passes its spawner on to the promises derived from it with `then`, `catch` and
/// friends.
pub trait Spawner {
    /// Spawn a thread to run function `f`.
    fn spawn<F>(&self, f: F) where F: FnOnce() + Send + 'static;
}

/// An implementation of `Spawner` that creates normal `std::thread` threads.
///
/// Threads are unnamed and use the platform's default stack size unless configured otherwise.
///
/// ```
/// # use settled_promise::{Promise, ThreadSpawner};
/// let spawner = ThreadSpawner::new().name("worker").stack_size(256 * 1024);
/// let p = Promise::new_with(|resolve, _| resolve.resolve(1), spawner);
/// assert_eq!(p.wait().ok(), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThreadSpawner {
    name: Option<String>,
    stack_size: Option<usize>,
}

impl ThreadSpawner {
    pub fn new() -> ThreadSpawner {
        ThreadSpawner::default()
    }

    /// Name spawned threads `name`.
    pub fn name<S: Into<String>>(self, name: S) -> ThreadSpawner {
        ThreadSpawner { name: Some(name.into()), ..self }
    }

    /// Spawn threads with a stack of `size` bytes.
    pub fn stack_size(self, size: usize) -> ThreadSpawner {
        ThreadSpawner { stack_size: Some(size), ..self }
    }
}

impl Spawner for ThreadSpawner {
    fn spawn<F>(&self, f: F)
        where F: FnOnce() + Send + 'static
    {
        let mut builder = thread::Builder::new();
        if let Some(ref name) = self.name {
            builder = builder.name(name.clone());
        }
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }

        // On failure `f` is dropped unrun, which abandons whatever it would have settled.
        if let Err(err) = builder.spawn(f) {
            error!("failed to spawn promise thread: {}", err);
        }
    }
}

#[cfg(feature = "threadpool")]
impl Spawner for threadpool::ThreadPool {
    fn spawn<F>(&self, f: F)
        where F: FnOnce() + Send + 'static
    {
        self.execute(f)
    }
}

pub type Job = Box<dyn FnOnce() + Send + 'static>;

// Type-erased `Spawner`, shared by a promise and everything derived from it.
#[derive(Clone)]
pub struct SpawnHandle(Arc<dyn Fn(Job) + Send + Sync>);

impl SpawnHandle {
    pub fn new<S>(spawner: S) -> SpawnHandle
        where S: Spawner + Send + Sync + 'static
    {
        SpawnHandle(Arc::new(move |job: Job| spawner.spawn(job)))
    }

    pub fn spawn(&self, job: Job) {
        trace!("spawning promise task");
        (self.0)(job)
    }
}

impl Default for SpawnHandle {
    fn default() -> SpawnHandle {
        SpawnHandle::new(ThreadSpawner::new())
    }
}

impl Debug for SpawnHandle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "SpawnHandle(..)")
    }
}
