//! Pact CLI
//!
//! Inspect, check and run Pact contract sources.

use pactc::commands::{check_file, lex_file, list_file, parse_file, run_file, RunOptions};
use pactc::ScopeId;

fn main() {
    pactc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: pact lex <file.pact>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: pact parse <file.pact>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: pact check <file.pact> [--scope=<id>]");
                std::process::exit(1);
            }
            let scope = args[3..]
                .iter()
                .find_map(|arg| arg.strip_prefix("--scope="))
                .map_or(ScopeId::DEFAULT.raw(), parse_scope);
            check_file(&args[2], scope);
        }
        "list" => {
            if args.len() < 3 {
                eprintln!("Usage: pact list <file.pact>");
                std::process::exit(1);
            }
            list_file(&args[2]);
        }
        "run" => {
            if args.len() < 4 {
                eprintln!("Usage: pact run <file.pact> <name> [args...] [options]");
                eprintln!();
                eprintln!("  <name>               func, Contract or Contract.func");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --scope=<id>         Compile into and call in this scope");
                eprintln!("  --var <name=value>   Set a host variable ($name)");
                std::process::exit(1);
            }

            let mut options = RunOptions::default();
            let mut call_args = Vec::new();
            let mut i = 4;
            while i < args.len() {
                let arg = &args[i];
                if let Some(scope) = arg.strip_prefix("--scope=") {
                    options.scope = Some(parse_scope(scope));
                } else if arg == "--var" && i + 1 < args.len() {
                    let Some((name, value)) = args[i + 1].split_once('=') else {
                        eprintln!("error: expected --var name=value, got '{}'", args[i + 1]);
                        std::process::exit(1);
                    };
                    options.vars.push((name.to_string(), value.to_string()));
                    i += 1;
                } else {
                    call_args.push(arg.clone());
                }
                i += 1;
            }

            run_file(&args[2], &args[3], &call_args, &options);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("pact {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_scope(raw: &str) -> u32 {
    match raw.parse() {
        Ok(scope) => scope,
        Err(_) => {
            eprintln!("error: invalid scope '{raw}'");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Pact contract engine");
    println!();
    println!("Usage: pact <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file> <name> [args]  Compile a file and call a declaration");
    println!("  check <file>              Compile without running");
    println!("  list <file>               Print declared contract and function names");
    println!("  lex <file>                Print the token stream");
    println!("  parse <file>              Print parsed declarations");
    println!("  help                      Show this message");
    println!("  version                   Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=pact_eval=debug) for tracing output.");
}
