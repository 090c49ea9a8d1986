//! Command-line bootstrap for the reminders mock server.
//!
//! # Responsibility
//! - Read `REMINDERS_*` configuration, start logging and the server once.
//! - Send one request from the command line, or walk the UI's request flow
//!   when no arguments are given, printing each response.
//!
//! Usage: `reminders_cli [VERB PATH [JSON_BODY]]`

use reminders_core::{
    core_version, init_logging, LogTarget, MockServer, Request, Response, ServerConfig, Verb,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("reminders_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let config = ServerConfig::from_env().map_err(|err| err.to_string())?;
    init_logging(
        &config.log_level,
        LogTarget::from_dir(config.log_dir.as_deref()),
    )
    .map_err(|err| err.to_string())?;

    let requests = if args.is_empty() {
        ui_flow()
    } else {
        vec![parse_request(&args)?]
    };

    println!(
        "reminders_core version={} environment={}",
        core_version(),
        config.environment
    );
    let server = MockServer::start(config).map_err(|err| err.to_string())?;
    for request in requests {
        let line = format!("{} {}", request.verb, request.path);
        let response = server.handle(request);
        print_response(&line, &response)?;
    }
    server.shutdown();
    Ok(())
}

/// The five request shapes the UI issues, in a typical order.
fn ui_flow() -> Vec<Request> {
    vec![
        Request::new(Verb::Get, "/api/lists"),
        Request::new(Verb::Get, "/api/lists/1/reminders"),
        Request::new(Verb::Post, "/api/reminders").with_body(r#"{"text":"Buy milk","list":1}"#),
        Request::new(Verb::Get, "/api/reminders"),
        Request::new(Verb::Delete, "/api/reminders/1"),
    ]
}

fn parse_request(args: &[String]) -> Result<Request, String> {
    match args {
        [verb, path] => Ok(Request::new(parse_verb(verb)?, path.as_str())),
        [verb, path, body] => {
            Ok(Request::new(parse_verb(verb)?, path.as_str()).with_body(body.as_str()))
        }
        _ => Err("usage: reminders_cli [VERB PATH [JSON_BODY]]".to_string()),
    }
}

fn parse_verb(raw: &str) -> Result<Verb, String> {
    raw.parse::<Verb>().map_err(|err| err.to_string())
}

fn print_response(line: &str, response: &Response) -> Result<(), String> {
    println!("{line} -> {}", response.status);
    if let Some(body) = &response.body {
        let pretty = serde_json::to_string_pretty(body).map_err(|err| err.to_string())?;
        println!("{pretty}");
    }
    Ok(())
}
