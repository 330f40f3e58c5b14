
extern crate rf_pattern;

use std::io::{self, BufRead};
use rf_pattern::{Bounds, Error, Pattern, digit, word};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// The patterns every input line is searched with.
fn patterns() -> Result<Vec<(&'static str, Pattern)>, Error> {
    let hex = (digit() | Pattern::range('a', 'f')?)?;
    let hex = (&hex | &Pattern::range('A', 'F')?)?;
    let color = Pattern::optional('#') + Pattern::amount(hex, Bounds::exactly(6))?;

    let initials = Pattern::amount(Pattern::range('A', 'Z')?, Bounds::between(2, 3))?;

    let head = (Pattern::range('a', 'z')? | Pattern::range('A', 'Z')?)?;
    let head = (head | Pattern::from('_'))?;
    let ident = head + Pattern::multi(word(), true);

    let number = Pattern::multi(digit(), false) + Pattern::optional(Pattern::from('.') + Pattern::multi(digit(), false));

    Ok(vec![
        ("color", color),
        ("initials", initials),
        ("ident", ident),
        ("number", number),
    ])
}

fn main() {
    init_tracing();

    let patterns = match patterns() {
        Ok(patterns) => patterns,
        Err(err) => {
            eprintln!("Err: {}", err);
            return;
        },
    };
    for (name, pattern) in &patterns {
        println!("{:>8}: {}", name, pattern);
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("Err: {}", err);
                return;
            },
        };
        for (name, pattern) in &patterns {
            match pattern.find_all(&line) {
                Ok(found) if found.is_empty() => {},
                Ok(found) => println!("{:>8}: {:?}", name, found),
                Err(err) => println!("{:>8}: Err: {}", name, err),
            }
        }
    }
}
