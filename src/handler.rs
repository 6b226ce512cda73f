use crate::{Error, Request, Response};

use std::fmt;

/// A route handler or middleware.
///
/// Handlers receive the request, the response, and a [`Next`] continuation.
/// Calling [`Next::call`] asks the router to continue with the next matching
/// entry once the handler returns; returning without calling it stops the
/// chain, typically after ending the response.
///
/// Returning an error records it on the response: no further entries run
/// and the request completes with `500 Internal Server Error`.
///
/// This trait is implemented for closures with a matching signature.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: &mut Request, res: &mut Response, next: Next<'_>) -> Result<(), Error>;
}

impl<F> Handler for F
where
    F: Fn(&mut Request, &mut Response, Next<'_>) -> Result<(), Error> + Send + Sync + 'static,
{
    fn call(&self, req: &mut Request, res: &mut Response, next: Next<'_>) -> Result<(), Error> {
        self(req, res, next)
    }
}

/// The continuation passed to every handler.
///
/// `Next` is consumed when called, so a handler can advance the chain
/// at most once. Work a handler does after calling `next` still runs
/// before the next entry.
pub struct Next<'a> {
    proceed: &'a mut bool,
}

impl<'a> Next<'a> {
    pub(crate) fn new(proceed: &'a mut bool) -> Self {
        *proceed = false;
        Self { proceed }
    }

    /// Continue with the next matching entry.
    pub fn call(self) {
        *self.proceed = true;
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish()
    }
}
