//! Prints the components of a base URI and of references resolved against it.
//!
//! Usage: `print_components [BASE] [REFERENCE]...`
//!
//! Set `RUST_LOG=trace` to see how each reference is resolved.

use std::{env, process::ExitCode};

use loose_uri::Uri;

fn print_components(uri: Uri<&str>) {
    println!("------> {uri}");
    println!("scheme: {}", uri.scheme());
    match uri.authority() {
        Some(auth) => {
            println!("authority: {auth}");
            println!("user-info: {}", auth.userinfo().unwrap_or(""));
            println!("host: {}", auth.host());
            match auth.port() {
                Some(port) => println!("port: {port}"),
                None => println!("port: (not specified)"),
            }
        }
        None => println!("authority: (none)"),
    }
    println!("path: {}", uri.path());
    println!("query: {}", uri.query().unwrap_or(""));
    println!("fragment: {}", uri.fragment().unwrap_or(""));
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let base = args
        .next()
        .unwrap_or_else(|| "http://www.bla.com:8080/p/a/t/h?q=y#f".to_owned());
    let mut references: Vec<String> = args.collect();
    if references.is_empty() {
        references.push("../w/".to_owned());
    }

    let base = match Uri::parse(base.as_str()) {
        Ok(base) => base,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    print_components(base);

    for r in &references {
        match base.resolve(r) {
            Ok(target) => print_components(target.borrow()),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
    ExitCode::SUCCESS
}
