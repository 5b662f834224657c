use std::fmt::{self, Formatter, Debug};

use log::trace;

use crate::cvmx::CvMx;
use crate::error::Error;

pub enum State<T> {
    Pending,            // nobody has settled yet
    Adopting,           // settlement claimed, waiting on another promise
    Fulfilled(T),
    Rejected(Error),
}

impl<T> State<T> {
    pub fn is_settled(&self) -> bool {
        match *self {
            State::Fulfilled(_) | State::Rejected(_) => true,
            State::Pending | State::Adopting => false,
        }
    }

    // Outcome of a settled state.
    pub fn outcome(&self) -> Option<Result<T, Error>>
        where T: Clone
    {
        match *self {
            State::Fulfilled(ref v) => Some(Ok(v.clone())),
            State::Rejected(ref e) => Some(Err(e.clone())),
            State::Pending | State::Adopting => None,
        }
    }
}

impl<T: Debug> Debug for State<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            State::Pending => write!(f, "Pending"),
            State::Adopting => write!(f, "Adopting"),
            State::Fulfilled(ref v) => write!(f, "Fulfilled({:?})", v),
            State::Rejected(ref e) => write!(f, "Rejected({})", e),
        }
    }
}

/// Settlement state shared by a `Promise` and its settling handles.
///
/// The mutex is the exclusive-transition lock; the condvar is the completion signal, broadcast
/// once when the state becomes `Fulfilled` or `Rejected`. Nothing else is ever written after that.
pub struct Inner<T>(CvMx<State<T>>);

impl<T> Inner<T> {
    pub fn new() -> Inner<T> {
        Inner(CvMx::new(State::Pending))
    }

    pub fn settled(outcome: Result<T, Error>) -> Inner<T> {
        Inner(CvMx::new(Self::finished(outcome)))
    }

    fn finished(outcome: Result<T, Error>) -> State<T> {
        match outcome {
            Ok(v) => State::Fulfilled(v),
            Err(e) => State::Rejected(e),
        }
    }

    /// Settle a pending promise. Returns false, leaving the state alone, if it was already
    /// settled or claimed for adoption.
    pub fn settle(&self, outcome: Result<T, Error>) -> bool {
        let mut lk = self.0.lock();

        match *lk {
            State::Pending => (),
            _ => {
                trace!("promise already settled; ignoring {}",
                       if outcome.is_ok() { "resolve" } else { "reject" });
                return false
            },
        }

        trace!("promise {}", if outcome.is_ok() { "fulfilled" } else { "rejected" });
        *lk = Self::finished(outcome);
        self.0.notify_all();
        true
    }

    /// Claim the right to settle without settling yet. Subsequent `settle` and `claim` calls
    /// lose the race; the claimant must finish with `complete`.
    pub fn claim(&self) -> bool {
        let mut lk = self.0.lock();

        match *lk {
            State::Pending => { *lk = State::Adopting; true },
            _ => false,
        }
    }

    /// Finish a settlement previously claimed with `claim`.
    pub fn complete(&self, outcome: Result<T, Error>) {
        let mut lk = self.0.lock();

        debug_assert!(match *lk { State::Adopting => true, _ => false }, "complete without claim");
        trace!("adopted promise {}", if outcome.is_ok() { "fulfilled" } else { "rejected" });
        *lk = Self::finished(outcome);
        self.0.notify_all();
    }

    /// Block until settled and return a copy of the outcome.
    pub fn wait(&self) -> Result<T, Error>
        where T: Clone
    {
        let lk = self.0.wait_until(State::is_settled);

        match *lk {
            State::Fulfilled(ref v) => Ok(v.clone()),
            State::Rejected(ref e) => Err(e.clone()),
            State::Pending | State::Adopting => unreachable!("woken before settlement"),
        }
    }

    pub fn poll(&self) -> Option<Result<T, Error>>
        where T: Clone
    {
        self.0.lock().outcome()
    }

    pub fn is_pending(&self) -> bool {
        !self.0.lock().is_settled()
    }
}

impl<T: Debug> Debug for Inner<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", *self.0.lock())
    }
}
