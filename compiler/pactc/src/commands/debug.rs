//! Debug commands: `lex` and `parse` for inspecting compiler internals.

use pact_ir::Item;

use super::read_file;

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let tokens = match pact_lexer::tokenize(&content) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.code());
            std::process::exit(1);
        }
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {:?} @ {}", token.kind, token.span.position());
    }
}

/// Parse a file and display its declarations.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let module = pact_lexer::tokenize(&content)
        .map_err(|err| format!("error[{}]: {err}", err.code()))
        .and_then(|tokens| {
            pact_parse::parse(&tokens).map_err(|err| format!("error[{}]: {err}", err.code))
        });
    let module = match module {
        Ok(module) => module,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    };

    println!("Parse result for '{path}':");
    println!("  Declarations: {}", module.items.len());
    for item in &module.items {
        match item {
            Item::Func(func) => {
                let params: Vec<String> = func
                    .params
                    .iter()
                    .map(|p| format!("{} {}", p.name, p.ty))
                    .collect();
                println!("  func {}({})", func.name, params.join(", "));
            }
            Item::Contract(contract) => {
                println!(
                    "  contract {} (data: {}, funcs: {}, conditions: {}, action: {})",
                    contract.name,
                    contract.data.len(),
                    contract.funcs.len(),
                    contract.conditions.is_some(),
                    contract.action.is_some(),
                );
            }
        }
    }
}
