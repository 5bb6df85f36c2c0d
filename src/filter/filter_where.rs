/// Characters PostgREST treats as syntax inside a logical filter list
const RESERVED: &[char] = &[',', '.', ':', '(', ')', '"', '\\'];

pub struct FilterWhere;

impl FilterWhere {
    /// Build the value of the `or` parameter for a free-text search.
    ///
    /// Returns `None` when there is nothing to search or no columns to search in.
    pub fn generate(columns: &[String], q: &str) -> Option<String> {
        let q = q.trim();
        if q.is_empty() || columns.is_empty() {
            return None;
        }

        let pattern = Self::pattern(q);
        let clauses: Vec<String> = columns.iter().map(|c| format!("{}.ilike.{}", c, pattern)).collect();
        Some(format!("({})", clauses.join(",")))
    }

    fn pattern(q: &str) -> String {
        let needle = format!("*{}*", q);
        if !needle.contains(RESERVED) {
            return needle;
        }

        let mut quoted = String::with_capacity(needle.len() + 2);
        quoted.push('"');
        for c in needle.chars() {
            if c == '"' || c == '\\' {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');
        quoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_or_across_columns_in_order() {
        let filter = FilterWhere::generate(&cols(&["name", "email", "phone"]), "abc").unwrap();
        assert_eq!(filter, "(name.ilike.*abc*,email.ilike.*abc*,phone.ilike.*abc*)");
    }

    #[test]
    fn test_blank_query_or_no_columns() {
        assert_eq!(FilterWhere::generate(&cols(&["name"]), "   "), None);
        assert_eq!(FilterWhere::generate(&[], "abc"), None);
    }

    #[test]
    fn test_reserved_characters_are_quoted() {
        let filter = FilterWhere::generate(&cols(&["name"]), r#"Smith, "Jr.""#).unwrap();
        assert_eq!(filter, r#"(name.ilike."*Smith, \"Jr.\"*")"#);
    }
}
