use std::any::Any;
use std::error::Error as StdError;
use std::fmt::Display;
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Reason a `Promise` was rejected.
///
/// Errors are cheap to clone: every waiter on a rejected `Promise` gets a copy sharing the same
/// underlying payload, and an error propagated through `then` or `catch` stays the same object.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Error supplied to `Rejecter::reject`, or produced by a `catch` handler.
    #[error(transparent)]
    Rejected(Arc<dyn StdError + Send + Sync + 'static>),

    /// The producer panicked with an error value.
    ///
    /// Recognised error payloads are `Error`, `std::io::Error`, and errors erased to
    /// `Box<dyn std::error::Error + Send + Sync>` or `Arc<dyn std::error::Error + Send + Sync>`.
    /// Any other concrete error type must be erased that way before `panic_any`, or its message
    /// is lost.
    #[error("panic recovery with error: {0}")]
    PanicWithError(String),

    /// The producer panicked with an empty payload.
    #[error("panic recovery with nil error")]
    PanicWithoutPayload,

    /// The producer panicked with some other payload, rendered as a string.
    ///
    /// `&str` and `String` payloads (as from `panic!`) are kept verbatim; anything else is shown
    /// as `Box<dyn Any>`.
    #[error("panic recovery with unknown error: {0}")]
    PanicWithValue(String),

    /// Every `Resolver` and `Rejecter` was dropped without settling the promise.
    #[error("promise abandoned without being settled")]
    Abandoned,

    /// A promise was resolved with itself.
    #[error("promise resolved with itself")]
    Cycle,
}

#[derive(Debug, Error)]
#[error("{0}")]
struct Message(String);

impl Error {
    /// Wrap an arbitrary error as a rejection reason.
    pub fn new<E>(err: E) -> Error
        where E: StdError + Send + Sync + 'static
    {
        Error::Rejected(Arc::new(err))
    }

    /// Rejection reason consisting only of a message.
    ///
    /// ```
    /// # use settled_promise::Error;
    /// let err = Error::msg("boom");
    /// assert_eq!(err.to_string(), "boom");
    /// ```
    pub fn msg<M: Display>(msg: M) -> Error {
        Error::new(Message(msg.to_string()))
    }

    /// True if this error was synthesized from a panic in a producer or continuation.
    pub fn is_panic(&self) -> bool {
        match *self {
            Error::PanicWithError(_) | Error::PanicWithoutPayload | Error::PanicWithValue(_) => true,
            _ => false,
        }
    }

    /// Borrow the rejection payload as a concrete error type, if it is one.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        match *self {
            Error::Rejected(ref err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }

    // Classify the payload of a caught panic.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Error {
        let payload = match payload.downcast::<Error>() {
            Ok(err) => return Error::PanicWithError(err.to_string()),
            Err(p) => p,
        };
        let payload = match payload.downcast::<Box<dyn StdError + Send + Sync>>() {
            Ok(err) => return Error::PanicWithError(err.to_string()),
            Err(p) => p,
        };
        let payload = match payload.downcast::<Arc<dyn StdError + Send + Sync>>() {
            Ok(err) => return Error::PanicWithError(err.to_string()),
            Err(p) => p,
        };
        let payload = match payload.downcast::<io::Error>() {
            Ok(err) => return Error::PanicWithError(err.to_string()),
            Err(p) => p,
        };

        if payload.is::<()>() {
            Error::PanicWithoutPayload
        } else if let Some(s) = payload.downcast_ref::<&'static str>() {
            Error::PanicWithValue((*s).to_string())
        } else if let Some(s) = payload.downcast_ref::<String>() {
            Error::PanicWithValue(s.clone())
        } else {
            Error::PanicWithValue("Box<dyn Any>".to_string())
        }
    }
}

impl<'a> From<&'a str> for Error {
    fn from(msg: &'a str) -> Error {
        Error::msg(msg)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Error {
        Error::new(Message(msg))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::new(err)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for Error {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Error {
        Error::Rejected(Arc::from(err))
    }
}
