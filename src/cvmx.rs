use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::fmt::{self, Formatter, Debug};

// A Condvar and its Mutex
pub struct CvMx<T> {
    pub cv: Condvar,
    pub mx: Mutex<T>,
}

impl<T> CvMx<T> {
    pub fn new(v: T) -> CvMx<T> {
        CvMx {
            cv: Condvar::new(),
            mx: Mutex::new(v),
        }
    }

    // User code only reads under the lock (cloning or formatting a settled value), so a poisoned
    // lock still guards consistent data.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.mx.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Block until `done` holds for the guarded value.
    pub fn wait_until<F>(&self, mut done: F) -> MutexGuard<'_, T>
        where F: FnMut(&T) -> bool
    {
        let lk = self.lock();
        self.cv.wait_while(lk, |v| !done(v)).unwrap_or_else(PoisonError::into_inner)
    }

    pub fn notify_all(&self) {
        self.cv.notify_all()
    }
}

impl<T: Debug> Debug for CvMx<T> {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "CvMx({:?})", &*self.lock())
    }
}
