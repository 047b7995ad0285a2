//! Quoting de SQL para sentencias DDL (que no admiten parámetros ligados).

/// Identificador entre comillas dobles, duplicando las internas.
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Literal entre comillas simples, duplicando las internas.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_escapes_delimiters() {
        assert_eq!(quote_identifier("abc123"), "\"abc123\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(quote_literal("o'neil"), "'o''neil'");
    }
}
