//! Case-insensitive substring search over text columns.
//!
//! SQLite's `LOWER()` folds ASCII letters only, so the search term is folded the
//! same way: ASCII letters match regardless of case, any other character must
//! match exactly. `%`, `_` and `\` in the term are matched literally.

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

const ESCAPE: char = '\\';

/// Escapes the `LIKE` wildcards in `term`.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// `LOWER(column) LIKE '%term%' ESCAPE '\'`.
pub(crate) fn contains_ignore_case<C>(column: C, term: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    let pattern = format!("%{}%", escape_like(&term.to_ascii_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(ESCAPE))
}

/// Trimmed search term, `None` when blank.
pub(crate) fn search_term(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}
