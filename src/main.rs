use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use marmoset::{eval, format_value, new_global_env, parse, Value};

const PROMPT: &str = ">> ";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(path) => {
            if args.next().is_some() {
                bail!("Only one input file is supported");
            }
            run_file(&path)
        }
        None => repl(),
    }
}

fn run_file(path: &str) -> Result<()> {
    let source = fs::read_to_string(path).with_context(|| format!("Reading {path}"))?;

    let (program, errors) = parse(&source);
    if !errors.is_empty() {
        for message in &errors {
            eprintln!("ERROR: {message}");
        }
        bail!("{} parse error(s) in {path}", errors.len());
    }

    let env = new_global_env();
    let result = eval(&program, &env);
    if !matches!(result, Value::Empty) {
        println!("{}", format_value(&result));
    }
    Ok(())
}

// One environment for the whole session, so bindings persist across lines.
fn repl() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let env = new_global_env();

    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Reading stdin")? == 0 {
            return Ok(());
        }

        let (program, errors) = parse(&line);
        if !errors.is_empty() {
            for message in &errors {
                println!("\t{message}");
            }
            continue;
        }

        let result = eval(&program, &env);
        if !matches!(result, Value::Empty) {
            println!("{}", format_value(&result));
        }
    }
}
