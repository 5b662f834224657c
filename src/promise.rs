use std::fmt::{self, Formatter, Debug};
use std::sync::Arc;

use crate::error::Error;
use crate::inner::Inner;
use crate::launch::launch;
use crate::resolver::{Rejecter, Resolver};
use crate::spawner::{SpawnHandle, Spawner};

// What a continuation settles its derived promise with.
enum Resolution<T> {
    Value(T),
    Promise(Promise<T>),
}

impl<T: Clone> Resolution<T> {
    fn apply(self, resolve: &Resolver<T>) {
        match self {
            Resolution::Value(v) => resolve.resolve(v),
            Resolution::Promise(p) => resolve.resolve_with(p),
        }
    }
}

/// A value or error which will be known at most once.
///
/// A `Promise` is created with a producer function which runs on its own thread (or on a task
/// from a chosen `Spawner`) and eventually settles the promise by fulfilling it with a value or
/// rejecting it with an `Error`. Only the first settlement counts.
///
/// The `Promise` itself is a read handle: it may be cloned and shared between threads, and any
/// number of them may `wait` for the outcome, which is the same for everyone. Continuations
/// attached with `then`, `catch` and related methods each produce a new `Promise` settled from
/// this one's outcome.
pub struct Promise<T> {
    inner: Arc<Inner<T>>,
    spawner: SpawnHandle,
}

impl<T> Promise<T>
    where T: Clone + Send + 'static
{
    /// Start `producer` on a new thread and return a `Promise` for its outcome.
    ///
    /// The producer is passed a `Resolver` and a `Rejecter`; whichever is used first settles the
    /// promise. This does not block.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// let p = Promise::new(|resolve, reject| {
    ///     let sum = 2 + 2;
    ///     if sum == 4 {
    ///         resolve.resolve(sum)
    ///     } else {
    ///         reject.reject("2 + 2 doesn't equal 4")
    ///     }
    /// });
    /// assert_eq!(p.wait().ok(), Some(4));
    /// ```
    ///
    /// If the producer panics, the promise is rejected with one of the `Error::Panic*` errors
    /// (unless it was settled before the panic).
    #[inline]
    pub fn new<F>(producer: F) -> Promise<T>
        where F: FnOnce(Resolver<T>, Rejecter<T>) + Send + 'static
    {
        Promise::spawn(producer, SpawnHandle::default())
    }

    /// As with `new`, but pass a `Spawner` to control how the producer's thread is created.
    ///
    /// The spawner is also used for every continuation chained onto this promise. Each
    /// continuation occupies a task while it waits for its predecessor, so with a fixed-size
    /// thread pool a chain must not be longer than the pool can run at once.
    pub fn new_with<F, S>(producer: F, spawner: S) -> Promise<T>
        where F: FnOnce(Resolver<T>, Rejecter<T>) + Send + 'static,
              S: Spawner + Send + Sync + 'static
    {
        Promise::spawn(producer, SpawnHandle::new(spawner))
    }

    fn spawn<F>(producer: F, spawner: SpawnHandle) -> Promise<T>
        where F: FnOnce(Resolver<T>, Rejecter<T>) + Send + 'static
    {
        let inner = Arc::new(Inner::new());

        launch(inner.clone(), producer, &spawner);

        Promise { inner: inner, spawner: spawner }
    }

    /// Construct an already fulfilled `Promise`.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// assert_eq!(Promise::resolved(120).wait().ok(), Some(120));
    /// ```
    pub fn resolved(v: T) -> Promise<T> {
        Promise::settled(Ok(v))
    }

    /// Construct a `Promise` which settles the same way as `other`.
    pub fn resolved_with(other: Promise<T>) -> Promise<T> {
        let spawner = other.spawner.clone();
        Promise::spawn(move |resolve, _| resolve.resolve_with(other), spawner)
    }

    /// Construct an already rejected `Promise`.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// let p = Promise::<()>::rejected("boom");
    /// assert_eq!(p.wait().unwrap_err().to_string(), "boom");
    /// ```
    pub fn rejected<E: Into<Error>>(err: E) -> Promise<T> {
        Promise::settled(Err(err.into()))
    }

    fn settled(outcome: Result<T, Error>) -> Promise<T> {
        Promise {
            inner: Arc::new(Inner::settled(outcome)),
            spawner: SpawnHandle::default(),
        }
    }

    /// Chain a continuation on the fulfilled value.
    ///
    /// The returned `Promise` is fulfilled with `on_fulfilled`'s return value. If this promise is
    /// rejected, `on_fulfilled` is not called and the error propagates unchanged.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// let p = Promise::resolved(4).then(|x| x + 1);
    /// assert_eq!(p.wait().ok(), Some(5));
    /// ```
    pub fn then<F, U>(&self, on_fulfilled: F) -> Promise<U>
        where F: FnOnce(T) -> U + Send + 'static,
              U: Clone + Send + 'static
    {
        self.chain(move |v| Resolution::Value(on_fulfilled(v)), None::<fn(Error) -> Resolution<U>>)
    }

    /// Chain continuations for both outcomes.
    ///
    /// If this promise is rejected, the returned one is *fulfilled* with the return value of
    /// `on_rejected`, recovering from the error.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// let p = Promise::<i32>::rejected("boom")
    ///     .then_else(|x| format!("got {}", x), |err| format!("recovered from {}", err));
    /// assert_eq!(p.wait().ok(), Some("recovered from boom".to_string()));
    /// ```
    pub fn then_else<F, G, U>(&self, on_fulfilled: F, on_rejected: G) -> Promise<U>
        where F: FnOnce(T) -> U + Send + 'static,
              G: FnOnce(Error) -> U + Send + 'static,
              U: Clone + Send + 'static
    {
        self.chain(move |v| Resolution::Value(on_fulfilled(v)),
                   Some(move |err| Resolution::Value(on_rejected(err))))
    }

    /// Chain a continuation which returns another `Promise`.
    ///
    /// The returned `Promise` settles the same way as the one `on_fulfilled` returns.
    pub fn and_then<F, U>(&self, on_fulfilled: F) -> Promise<U>
        where F: FnOnce(T) -> Promise<U> + Send + 'static,
              U: Clone + Send + 'static
    {
        self.chain(move |v| Resolution::Promise(on_fulfilled(v)), None::<fn(Error) -> Resolution<U>>)
    }

    /// Recover from a rejection.
    ///
    /// A fulfilled value passes through unchanged; an error is replaced by `on_rejected`'s return
    /// value.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// let p = Promise::<&str>::rejected("boom").recover(|_| "recovered");
    /// assert_eq!(p.wait().ok(), Some("recovered"));
    /// ```
    pub fn recover<G>(&self, on_rejected: G) -> Promise<T>
        where G: FnOnce(Error) -> T + Send + 'static
    {
        self.chain(Resolution::Value, Some(move |err| Resolution::Value(on_rejected(err))))
    }

    /// Handle a rejection with a function returning another `Promise`.
    ///
    /// This is how a rejection handler reports a new failure: return `Promise::rejected`.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// let p = Promise::<f64>::rejected("negative input")
    ///     .or_else(|_| Promise::rejected("math: square root of negative number"));
    /// assert_eq!(p.wait().unwrap_err().to_string(), "math: square root of negative number");
    /// ```
    pub fn or_else<G>(&self, on_rejected: G) -> Promise<T>
        where G: FnOnce(Error) -> Promise<T> + Send + 'static
    {
        self.chain(Resolution::Value, Some(move |err| Resolution::Promise(on_rejected(err))))
    }

    /// Map a rejection to a different error.
    ///
    /// A fulfilled value passes through unchanged without calling `on_rejected`. An error is
    /// passed to `on_rejected` and the returned `Promise` is rejected with its result; `catch`
    /// never recovers.
    ///
    /// ```
    /// # use settled_promise::{Error, Promise};
    /// let p = Promise::<i32>::rejected("boom")
    ///     .catch(|err| Error::msg(format!("during execution: {}", err)));
    /// assert_eq!(p.wait().unwrap_err().to_string(), "during execution: boom");
    /// ```
    pub fn catch<G>(&self, on_rejected: G) -> Promise<T>
        where G: FnOnce(Error) -> Error + Send + 'static
    {
        let parent = self.clone();

        Promise::spawn(move |resolve, reject| {
            match parent.wait() {
                Ok(v) => resolve.resolve(v),
                Err(err) => reject.reject(on_rejected(err)),
            }
        }, self.spawner.clone())
    }

    // Derive a promise settled from this one's outcome. Without `on_rejected` the error is
    // propagated as is.
    fn chain<F, G, U>(&self, on_fulfilled: F, on_rejected: Option<G>) -> Promise<U>
        where F: FnOnce(T) -> Resolution<U> + Send + 'static,
              G: FnOnce(Error) -> Resolution<U> + Send + 'static,
              U: Clone + Send + 'static
    {
        let parent = self.clone();

        Promise::spawn(move |resolve, reject| {
            match parent.wait() {
                Ok(v) => on_fulfilled(v).apply(&resolve),
                Err(err) => match on_rejected {
                    Some(on_rejected) => on_rejected(err).apply(&resolve),
                    None => reject.reject(err),
                },
            }
        }, self.spawner.clone())
    }
}

impl<T: Clone> Promise<T> {
    /// Block until the `Promise` is settled, and return its outcome.
    ///
    /// This may be called any number of times, from any number of threads; every call returns
    /// the same outcome.
    pub fn wait(&self) -> Result<T, Error> {
        self.inner.wait()
    }

    /// Block until the `Promise` is settled, run `on_finally`, then return the outcome.
    ///
    /// Unlike `then` and `catch` this runs on the calling thread and doesn't create a new
    /// `Promise`. `on_finally` is called regardless of the outcome.
    ///
    /// ```
    /// # use settled_promise::Promise;
    /// let res = Promise::resolved(1).finally(|| println!("All is well."));
    /// assert_eq!(res.ok(), Some(1));
    /// ```
    pub fn finally<F>(&self, on_finally: F) -> Result<T, Error>
        where F: FnOnce()
    {
        let res = self.wait();
        on_finally();
        res
    }

    /// Return the outcome if the `Promise` is settled, without blocking.
    pub fn poll(&self) -> Option<Result<T, Error>> {
        self.inner.poll()
    }

    /// True until the `Promise` is settled.
    ///
    /// A promise which has been resolved with another promise is still pending until that one is
    /// settled.
    pub fn is_pending(&self) -> bool {
        self.inner.is_pending()
    }
}

impl<T> Promise<T> {
    pub(crate) fn shares(&self, inner: &Arc<Inner<T>>) -> bool {
        Arc::ptr_eq(&self.inner, inner)
    }
}

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Promise<T> {
        Promise {
            inner: self.inner.clone(),
            spawner: self.spawner.clone(),
        }
    }
}

impl<T: Debug> Debug for Promise<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Promise({:?})", self.inner)
    }
}
