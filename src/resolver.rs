use std::fmt::{self, Formatter, Debug};
use std::sync::Arc;

use log::{debug, trace};

use crate::error::Error;
use crate::inner::Inner;
use crate::promise::Promise;

// Owner of the right to settle a promise. Shared by all `Resolver`s and `Rejecter`s for one
// promise (and by the launcher while the producer runs); when the last one goes away without
// having settled, the promise is abandoned.
pub struct Settler<T>(Arc<Inner<T>>);

impl<T> Settler<T> {
    pub fn new(inner: Arc<Inner<T>>) -> Settler<T> {
        Settler(inner)
    }

    pub fn resolve(&self, v: T) {
        self.0.settle(Ok(v));
    }

    pub fn reject(&self, err: Error) {
        self.0.settle(Err(err));
    }
}

impl<T: Clone> Settler<T> {
    // Adopt the eventual outcome of `other`, blocking this thread until it is known.
    pub fn resolve_with(&self, other: Promise<T>) {
        if other.shares(&self.0) {
            self.reject(Error::Cycle);
            return
        }

        // The transition lock is released while waiting; `claim` makes sure nobody else can
        // settle in the meantime.
        if !self.0.claim() {
            trace!("promise already settled; ignoring resolve with promise");
            return
        }

        trace!("adopting outcome of another promise");
        self.0.complete(other.wait());
    }
}

impl<T> Drop for Settler<T> {
    fn drop(&mut self) {
        if self.0.settle(Err(Error::Abandoned)) {
            debug!("promise abandoned by its producer");
        }
    }
}

/// Fulfills a `Promise`.
///
/// A `Resolver` is passed to the producer of every `Promise`. It may be cloned and sent to other
/// threads; whichever of `resolve`, `resolve_with` or `Rejecter::reject` is called first settles
/// the promise and all later calls are silently ignored.
///
/// If every `Resolver` and `Rejecter` for a promise is dropped before it is settled, the promise
/// is rejected with `Error::Abandoned`.
pub struct Resolver<T>(Arc<Settler<T>>);

impl<T> Resolver<T> {
    pub(crate) fn new(settler: &Arc<Settler<T>>) -> Resolver<T> {
        Resolver(settler.clone())
    }

    /// Fulfill the promise with `v`.
    pub fn resolve(&self, v: T) {
        self.0.resolve(v)
    }
}

impl<T: Clone> Resolver<T> {
    /// Settle the promise with the eventual outcome of `other`.
    ///
    /// This blocks the calling thread until `other` is settled. If `other` is fulfilled this
    /// promise is fulfilled with the same value; if it is rejected, so is this one, with the same
    /// error.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// let p = Promise::new(|resolve, _| resolve.resolve_with(Promise::resolved(7)));
    /// assert_eq!(p.wait().ok(), Some(7));
    /// ```
    pub fn resolve_with(&self, other: Promise<T>) {
        self.0.resolve_with(other)
    }
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Resolver<T> {
        Resolver(self.0.clone())
    }
}

impl<T> Debug for Resolver<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Resolver(..)")
    }
}

/// Rejects a `Promise`.
///
/// The counterpart of `Resolver`, sharing its exactly-once and abandonment rules.
pub struct Rejecter<T>(Arc<Settler<T>>);

impl<T> Rejecter<T> {
    pub(crate) fn new(settler: &Arc<Settler<T>>) -> Rejecter<T> {
        Rejecter(settler.clone())
    }

    /// Reject the promise with `err`.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// let p = Promise::<i32>::new(|_, reject| reject.reject("no good"));
    /// assert_eq!(p.wait().unwrap_err().to_string(), "no good");
    /// ```
    pub fn reject<E: Into<Error>>(&self, err: E) {
        self.0.reject(err.into())
    }
}

impl<T> Clone for Rejecter<T> {
    fn clone(&self) -> Rejecter<T> {
        Rejecter(self.0.clone())
    }
}

impl<T> Debug for Rejecter<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Rejecter(..)")
    }
}
