use super::Router;
use crate::error::HandlerPanic;
use crate::http::Status;
use crate::{Error, Handler, Next, Request, Response};

use std::panic::{self, AssertUnwindSafe};

/// How a dispatched request finished.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Completion {
    /// A handler ended the response.
    Ended,
    /// No entry ended the response; `404 Not Found` was sent.
    NotFound,
    /// A handler failed; `500 Internal Server Error` was sent.
    Failed,
    /// A handler stopped the chain without ending the response.
    ///
    /// Nothing has been written. The caller owns the response and decides
    /// whether to end it.
    Stalled,
}

#[derive(Default, Debug)]
struct DispatchState {
    position: usize,
    handled: bool,
}

impl Router {
    /// Walk the table for an existing pair of contexts.
    ///
    /// Each matching entry is invoked in order until one stops the chain,
    /// a handler fails, or the table is exhausted. Once the table is
    /// exhausted the response is ended: with a 500 if an error was
    /// recorded, with a 404 if no entry ended it.
    pub fn dispatch(&self, req: &mut Request, res: &mut Response) -> Completion {
        let span = tracing::debug_span!("dispatch", method = %req.method(), path = req.path());
        let _enter = span.enter();

        let mut state = DispatchState::default();

        while state.position < self.routes.len() && !res.has_error() {
            let route = &self.routes[state.position];
            state.position += 1;

            let params = match route.matches(req.method(), req.path()) {
                Some(params) => params,
                None => {
                    tracing::trace!(position = state.position - 1, "skipping route");
                    continue;
                }
            };

            if let Some(pattern) = route.pattern() {
                req.bind(pattern.as_str(), params);
            }

            tracing::trace!(position = state.position - 1, route = ?route, "invoking route");

            let mut proceed = false;
            let result = invoke(route.handler_ref(), req, res, Next::new(&mut proceed));

            if res.is_ended() {
                state.handled = true;
            }

            if let Err(err) = result {
                tracing::error!(error = %err, "route handler failed");
                res.set_error(err);
                break;
            }

            if !proceed {
                if state.handled {
                    return Completion::Ended;
                }

                tracing::warn!("chain stopped without ending the response");
                return Completion::Stalled;
            }
        }

        finish(&state, res)
    }
}

fn invoke(
    handler: &dyn Handler,
    req: &mut Request,
    res: &mut Response,
    next: Next<'_>,
) -> Result<(), Error> {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.call(req, res, next))) {
        Ok(result) => result,
        Err(payload) => Err(HandlerPanic::new(payload).into()),
    }
}

fn finish(state: &DispatchState, res: &mut Response) -> Completion {
    if let Some(err) = res.error() {
        let message = format!("Server error: {}", err);
        tracing::error!("{}", message);

        if let Err(err) = res.status(Status::InternalServerError).end_with(message) {
            tracing::debug!(error = %err, "failed to write error response");
        }

        return Completion::Failed;
    }

    if !state.handled {
        tracing::debug!("no route ended the response");

        if let Err(err) = res.send_status(Status::NotFound).end() {
            tracing::debug!(error = %err, "failed to write not found response");
        }

        return Completion::NotFound;
    }

    Completion::Ended
}
