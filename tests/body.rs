use std::io::Cursor;
use std::sync::{Arc, Mutex};

use junction::http::{Parts, Status};
use junction::{BodyParser, Completion, ParsedBody, Recorder, Router};

fn post(content_type: Option<&str>) -> Parts {
    let mut builder = http::Request::builder().method("POST").uri("/submit");
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }

    let (parts, ()) = builder.body(()).unwrap().into_parts();
    parts
}

/// Run `body` through a body parser and capture what the handler saw.
fn parse_with(parser: BodyParser, content_type: Option<&str>, body: &'static str) -> Option<ParsedBody> {
    let seen = Arc::new(Mutex::new(None));

    let router = Router::new()
        .use_handler(None, parser)
        .post("/submit", {
            let seen = seen.clone();
            move |req, res, _| {
                *seen.lock().unwrap() = req.body().cloned();
                res.status(Status::Ok).end()?;
                Ok(())
            }
        });

    let completion = router.serve(post(content_type), Cursor::new(body), Recorder::new());
    assert_eq!(completion, Completion::Ended);

    let parsed = seen.lock().unwrap().take();
    parsed
}

fn parse(content_type: Option<&str>, body: &'static str) -> Option<ParsedBody> {
    parse_with(BodyParser::new(), content_type, body)
}

#[test]
fn form_bodies() {
    let body = parse(Some("application/x-www-form-urlencoded"), "a=1&b=2").unwrap();
    let form = body.as_url_encoded().unwrap();

    assert_eq!(form.len(), 2);
    assert_eq!(form["a"], "1");
    assert_eq!(form["b"], "2");
}

#[test]
fn malformed_forms_are_absent() {
    assert_eq!(parse(Some("application/x-www-form-urlencoded"), "a=1&bad"), None);
    assert_eq!(parse(Some("application/x-www-form-urlencoded"), "a=1=2"), None);
}

#[test]
#[cfg(feature = "json")]
fn json_bodies() {
    let body = parse(Some("application/json"), r#"{"name":"junction","tags":["http"]}"#).unwrap();
    let json = body.as_json().unwrap();

    assert_eq!(json["name"], "junction");
    assert_eq!(json["tags"][0], "http");
}

#[test]
#[cfg(feature = "json")]
fn malformed_json_is_absent() {
    assert_eq!(parse(Some("application/json"), "{\"name\":"), None);
    assert_eq!(parse(Some("application/json"), "null"), None);
}

#[test]
fn text_bodies() {
    let body = parse(Some("text/plain; charset=utf-8"), "just text").unwrap();
    assert_eq!(body.as_text(), Some("just text"));
}

#[test]
fn unknown_or_missing_content_type() {
    assert_eq!(parse(Some("application/octet-stream"), "bytes"), None);
    assert_eq!(parse(None, "bytes"), None);
}

#[test]
fn content_type_header_casing() {
    let seen = Arc::new(Mutex::new(None));

    let router = Router::new()
        .use_handler(None, BodyParser::new())
        .post("/submit", {
            let seen = seen.clone();
            move |req, res, _| {
                *seen.lock().unwrap() = req.body().cloned();
                res.status(Status::Ok).end()?;
                Ok(())
            }
        });

    let (parts, ()) = http::Request::builder()
        .method("POST")
        .uri("/submit")
        .header("content-type", "text/plain")
        .body(())
        .unwrap()
        .into_parts();

    router.serve(parts, Cursor::new("lower"), Recorder::new());
    assert_eq!(
        seen.lock().unwrap().as_ref().and_then(ParsedBody::as_text),
        Some("lower")
    );
}

#[test]
fn bodies_over_the_limit_are_absent() {
    assert_eq!(parse_with(BodyParser::new().limit(4), Some("text/plain"), "too long"), None);
    assert_eq!(
        parse_with(BodyParser::new().limit(8), Some("text/plain"), "fits"),
        Some(ParsedBody::Text("fits".to_owned()))
    );
}

#[test]
fn first_parser_wins() {
    let router = Router::new()
        .use_handler(None, BodyParser::new())
        .use_handler(None, BodyParser::new())
        .post("/submit", |req, res, _| {
            let text = req.body().and_then(ParsedBody::as_text).unwrap_or("").to_owned();
            res.status(Status::Ok).end_with(text)?;
            Ok(())
        });

    let recorder = Recorder::new();
    router.serve(post(Some("text/plain")), Cursor::new("once"), recorder.clone());
    assert_eq!(recorder.body(), "once");
}
