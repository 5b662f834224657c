//! Settled Promises
//! ================
//!
//! Quick example:
//!
//! ```
//! # use settled_promise::Promise;
//! # use std::thread;
//! # use std::time::Duration;
//! // A time-consuming process
//! let p = Promise::new(|resolve, _| {
//!     thread::sleep(Duration::from_millis(100));
//!     resolve.resolve(123)
//! });
//!
//! // do something when the value is ready
//! let p = p.then(|v| v + 1);
//!
//! // Wait for the final result
//! assert_eq!(p.wait().ok(), Some(124));
//! ```
//!
//! A `Promise` is a container for a value, or an error, which will be known at most once and may
//! be observed by any number of waiters.
//!
//! A `Promise` is created with a producer function, which is started straight away on its own
//! thread. The producer is handed a `Resolver` and a `Rejecter`, and settles the promise by either
//! fulfilling it with a value or rejecting it with an `Error`. A `Promise` is "pending" until then,
//! and is "fulfilled" or "rejected" forever after: only the first settlement counts, and any later
//! attempt, from whichever thread, is silently ignored.
//!
//! If the producer panics before settling, the promise is rejected with an error describing the
//! panic. If the producer drops its `Resolver` and `Rejecter` without using either, the promise is
//! rejected with `Error::Abandoned`. A `Promise` therefore never stays pending once its producer
//! is done with it.
//!
//! A promise may also be resolved with another `Promise`, in which case it adopts that promise's
//! eventual outcome rather than holding a promise as its value.
//!
//! The outcome is read with `wait`, which blocks until the promise is settled and returns a
//! `Result`. `finally` does the same, running a closure first. Both may be called any number of
//! times from any number of threads.
//!
//! `Promise`s may be chained. `then` takes a function to act on the fulfilled value and returns a
//! new `Promise` for its result; a rejection skips the function and propagates unchanged.
//! `then_else` also takes a function for the error, whose result *fulfills* the new promise,
//! recovering from the failure; `recover` does only that. `and_then` and `or_else` are the
//! variants whose functions return another `Promise` to adopt, which is also how a rejection
//! handler can fail again. `catch` maps an error to a different error and passes values through.
//!
//! Each chained function runs on its own thread, which waits for the parent promise to settle. The
//! threads are created with a `Spawner`: `ThreadSpawner` by default, optionally configured with a
//! thread name and stack size, or a `threadpool::ThreadPool` (with the default `threadpool`
//! feature). A promise hands its spawner on to everything chained from it.
//!
//! ```
//! # use settled_promise::{Error, Promise};
//! let p = Promise::new(|resolve, reject| {
//!         let sum = 2 + 2;
//!         if sum == 4 {
//!             resolve.resolve(sum)
//!         } else {
//!             reject.reject("2 + 2 doesn't equal 4")
//!         }
//!     })
//!     .then_else(|data| data + 1, |_| 0)
//!     .then(|data| format!("the new result is {}", data))
//!     .catch(|err| Error::msg(format!("error during execution: {}", err)));
//!
//! let res = p.finally(|| println!("All is well."));
//! assert_eq!(res.ok(), Some("the new result is 5".to_string()));
//! ```
//!
//! There is no cancellation: once started, a producer or chained function runs to completion.

mod cvmx;
mod error;
mod inner;
mod launch;
mod promise;
mod resolver;
mod spawner;

pub use error::Error;
pub use promise::Promise;
pub use resolver::{Rejecter, Resolver};
pub use spawner::{Spawner, ThreadSpawner};
