use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::debug;

use crate::error::Error;
use crate::inner::Inner;
use crate::resolver::{Rejecter, Resolver, Settler};
use crate::spawner::SpawnHandle;

/// Run `producer` on a task from `spawner`, settling `inner` through the handles it is given.
///
/// A panic in the producer rejects the promise with an error describing the panic payload,
/// unless the producer had already settled it. The launcher keeps its own reference to the
/// settler until that check is done, so a panicking producer is never reported as having
/// abandoned its promise.
pub fn launch<T, F>(inner: Arc<Inner<T>>, producer: F, spawner: &SpawnHandle)
    where T: Send + 'static,
          F: FnOnce(Resolver<T>, Rejecter<T>) + Send + 'static
{
    let settler = Arc::new(Settler::new(inner));
    let resolve = Resolver::new(&settler);
    let reject = Rejecter::new(&settler);

    spawner.spawn(Box::new(move || {
        let res = panic::catch_unwind(AssertUnwindSafe(move || producer(resolve, reject)));

        if let Err(payload) = res {
            let err = Error::from_panic(payload);
            debug!("recovered from producer panic: {}", err);
            settler.reject(err);
        }
    }))
}
