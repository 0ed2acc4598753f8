//! `WHERE` clause builder shared by the list and count queries.
//!
//! Both queries take their predicate from the same [`EntryFilter`], so the page
//! count shown on the list view always agrees with the rows returned.

use crate::db::Column;

/// Optional keyword and type code narrowing the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    keyword: Option<String>,
    type_code: Option<String>,
}

/// Predicate text plus its positionally aligned bind parameters.
///
/// `sql` is either empty or starts with `" WHERE "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<String>,
}

impl EntryFilter {
    /// Empty strings mean "no constraint".
    pub fn new(keyword: Option<String>, type_code: Option<String>) -> Self {
        Self {
            keyword: keyword.filter(|k| !k.is_empty()),
            type_code: type_code.filter(|t| !t.is_empty()),
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn type_code(&self) -> Option<&str> {
        self.type_code.as_deref()
    }

    pub fn where_clause(&self) -> WhereClause {
        let mut predicates: Vec<String> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(keyword) = self.keyword.as_deref() {
            let pattern = format!("%{}%", escape_like(keyword));
            let matches: Vec<String> = Column::ALL
                .iter()
                .map(|column| format!("{column} LIKE ? ESCAPE '\\'"))
                .collect();
            predicates.push(matches.join(" OR "));
            params.extend(std::iter::repeat_n(pattern, Column::ALL.len()));
        }

        if let Some(type_code) = self.type_code.as_deref() {
            predicates.push(format!("{} = ?", Column::Type));
            params.push(type_code.to_string());
        }

        if predicates.is_empty() {
            return WhereClause::default();
        }

        let sql = predicates
            .iter()
            .map(|p| format!("({p})"))
            .collect::<Vec<_>>()
            .join(" AND ");
        WhereClause {
            sql: format!(" WHERE {sql}"),
            params,
        }
    }
}

/// Escapes LIKE metacharacters so the keyword matches as a literal substring.
fn escape_like(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// One page of an id-ascending listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-indexed.
    pub page: u32,
    pub page_size: u32,
}

impl PageWindow {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(keyword: &str, type_code: &str) -> EntryFilter {
        EntryFilter::new(Some(keyword.to_string()), Some(type_code.to_string()))
    }

    #[test]
    fn empty_filter_has_no_where_clause() {
        let clause = filter("", "").where_clause();
        assert_eq!(clause, WhereClause::default());
        assert_eq!(EntryFilter::default().where_clause().sql, "");
    }

    #[test]
    fn keyword_matches_every_column() {
        let clause = filter("rust", "").where_clause();
        assert_eq!(
            clause.sql,
            " WHERE (id LIKE ? ESCAPE '\\' OR type LIKE ? ESCAPE '\\' OR name LIKE ? ESCAPE '\\' \
             OR description LIKE ? ESCAPE '\\' OR url LIKE ? ESCAPE '\\')"
        );
        assert_eq!(clause.params, vec!["%rust%".to_string(); 5]);
    }

    #[test]
    fn type_only_is_an_equality() {
        let clause = filter("", "3").where_clause();
        assert_eq!(clause.sql, " WHERE (type = ?)");
        assert_eq!(clause.params, vec!["3".to_string()]);
    }

    #[test]
    fn keyword_and_type_are_and_combined_with_aligned_params() {
        let clause = filter("doc", "6").where_clause();
        assert!(clause.sql.ends_with(") AND (type = ?)"));
        assert_eq!(clause.sql.matches('?').count(), clause.params.len());
        assert_eq!(clause.params.last().map(String::as_str), Some("6"));
        assert!(clause.params[..5].iter().all(|p| p == "%doc%"));
    }

    #[test]
    fn keyword_is_never_inlined() {
        let clause = filter("'; DROP TABLE ewb_dh_data; --", "").where_clause();
        assert!(!clause.sql.contains("DROP"));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        let clause = filter("50%_off\\", "").where_clause();
        assert_eq!(clause.params[0], "%50\\%\\_off\\\\%");
    }

    #[test]
    fn page_window_offsets() {
        assert_eq!(PageWindow::new(1, 15).offset(), 0);
        assert_eq!(PageWindow::new(3, 15).offset(), 30);
        assert_eq!(PageWindow::new(0, 15).offset(), 0);
        assert_eq!(PageWindow::new(2, 15).limit(), 15);
    }
}
