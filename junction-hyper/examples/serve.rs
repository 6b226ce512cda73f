use std::time::Instant;

use junction::http::Status;
use junction::{BodyParser, Error, Next, Request, Response, Router};
use junction_hyper::Serve;
use tracing_subscriber::EnvFilter;

fn logger(req: &mut Request, _: &mut Response, next: Next<'_>) -> Result<(), Error> {
    tracing::info!(method = %req.method(), path = req.path(), "request");
    next.call();
    Ok(())
}

fn hello(req: &mut Request, res: &mut Response, _: Next<'_>) -> Result<(), Error> {
    let name = req.param("name").unwrap_or("stranger").to_owned();
    res.status(Status::Ok).end_with(format!("Hello, {}!", name))?;
    Ok(())
}

fn echo(req: &mut Request, res: &mut Response, _: Next<'_>) -> Result<(), Error> {
    match req.body() {
        Some(body) => {
            let body = format!("{:?}", body);
            res.status(Status::Ok).end_with(body)?;
        }
        None => {
            res.send_status(Status::BadRequest).end()?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let started = Instant::now();

    let router = Router::new()
        .middleware(None, logger)
        .use_handler(Some("/echo"), BodyParser::new().limit(64 * 1024))
        .get("/hello/:name", hello)
        .post("/echo", echo)
        .get("/uptime", move |_, res, _| {
            res.status(Status::Ok)
                .end_with(format!("{:?}", started.elapsed()))?;
            Ok(())
        })
        .get("/back", |_, res, _| {
            res.redirect("back")?;
            Ok(())
        });

    if let Err(err) = router.bind("127.0.0.1:3000").await {
        tracing::error!(error = %err, "server error");
    }
}
