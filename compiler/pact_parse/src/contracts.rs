//! Best-effort extraction of declared names.

use pact_ir::TokenKind;

/// Names of the top-level contracts and functions declared in `source`,
/// in source order.
///
/// Works on the token stream alone and never fails: characters that do
/// not lex are skipped and bodies are only brace-matched, so malformed
/// contracts still yield their names. Declarations nested inside a body
/// are not reported.
pub fn contracts_list(source: &str) -> Vec<String> {
    let tokens = pact_lexer::tokenize_lossy(source);
    let mut names = Vec::new();
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => depth = depth.saturating_sub(1),
            TokenKind::Contract | TokenKind::Func if depth == 0 => {
                if let Some(TokenKind::Ident(name)) = tokens.get(i + 1).map(|t| &t.kind) {
                    names.push(name.clone());
                }
            }
            _ => {}
        }
    }
    names
}
