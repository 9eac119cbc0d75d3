use sea_orm::sea_query::LikeExpr;

/// Escapes `\`, `%` and `_` so user input matches literally inside LIKE
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%term%` with an explicit escape character
pub fn like_contains(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(term))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("STU_1"), "STU\\_1");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
        assert_eq!(escape_like_pattern("Santos"), "Santos");
    }
}
