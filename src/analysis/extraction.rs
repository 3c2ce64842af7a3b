//! Extracts referenced type names from raw signature strings.
//!
//! Signatures arrive as plain text (`Map<String, List<CommandContext>>`,
//! `BlockPos[]`, `CodecMapRegistry.Assets`). A flat delimiter scan is
//! enough: generic nesting only affects grouping, never token boundaries.

use indexmap::IndexSet;

const PRIMITIVES: &[&str] = &[
    "void", "boolean", "byte", "short", "int", "long", "float", "double", "char",
];

/// Scan one signature string and append every referenced type name to
/// `out`, preserving first-occurrence order.
///
/// Skipped tokens: wildcard-bound keywords (`extends`/`super`), primitives
/// and `void`, and single-uppercase-letter type parameters (`T`, `R`, `E`).
/// A dotted token contributes both the full token and its first segment,
/// so `Outer.Inner` stays resolvable through `Outer`.
pub fn extract_type_names(signature: &str, out: &mut IndexSet<String>) {
    if signature.is_empty() {
        return;
    }

    let mut current = String::new();
    for c in signature.chars() {
        match c {
            '<' | '>' | ',' | ' ' | '[' | ']' | '?' => flush_token(&mut current, out),
            _ => current.push(c),
        }
    }
    flush_token(&mut current, out);
}

/// Convenience wrapper for a single signature.
pub fn extract(signature: &str) -> IndexSet<String> {
    let mut out = IndexSet::new();
    extract_type_names(signature, &mut out);
    out
}

fn flush_token(current: &mut String, out: &mut IndexSet<String>) {
    if current.is_empty() {
        return;
    }
    let token = std::mem::take(current);
    let token = token.trim();

    if token.is_empty() || token == "extends" || token == "super" {
        return;
    }
    if PRIMITIVES.contains(&token) {
        return;
    }
    // Single uppercase letter: a type-parameter placeholder, not a type.
    let mut chars = token.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        if first.is_ascii_uppercase() {
            return;
        }
    }

    if let Some(dot) = token.find('.') {
        out.insert(token.to_string());
        out.insert(token[..dot].to_string());
    } else {
        out.insert(token.to_string());
    }
}
