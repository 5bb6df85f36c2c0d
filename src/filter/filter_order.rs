use super::error::FilterError;
use super::types::{FilterOrderInfo, NullsOrder, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse `col[.asc|.desc][.nullsfirst|.nullslast]` terms separated by commas
    pub fn validate_and_parse(order: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut out = Vec::new();
        for part in order.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                return Err(FilterError::InvalidOrder(format!("empty term in '{}'", order)));
            }
            out.push(Self::parse_term(trimmed)?);
        }
        Ok(out)
    }

    fn parse_term(term: &str) -> Result<FilterOrderInfo, FilterError> {
        let mut it = term.split('.');
        // split always yields at least one item
        let column = it.next().unwrap_or_default();
        if !Self::is_valid_column(column) {
            return Err(FilterError::InvalidOrder(format!("invalid column '{}'", column)));
        }

        let mut sort = None;
        let mut nulls = None;
        for modifier in it {
            match modifier.to_ascii_lowercase().as_str() {
                "asc" if sort.is_none() && nulls.is_none() => sort = Some(SortDirection::Asc),
                "desc" if sort.is_none() && nulls.is_none() => sort = Some(SortDirection::Desc),
                "nullsfirst" if nulls.is_none() => nulls = Some(NullsOrder::First),
                "nullslast" if nulls.is_none() => nulls = Some(NullsOrder::Last),
                _ => {
                    return Err(FilterError::InvalidOrder(format!(
                        "unexpected modifier '{}' in '{}'",
                        modifier, term
                    )))
                }
            }
        }

        Ok(FilterOrderInfo {
            column: column.to_string(),
            sort: sort.unwrap_or(SortDirection::Asc),
            nulls,
        })
    }

    /// Plain identifiers, optionally with `->` / `->>` JSON path steps
    fn is_valid_column(column: &str) -> bool {
        !column.is_empty()
            && column.split("->").all(|segment| {
                let segment = segment.strip_prefix('>').unwrap_or(segment);
                !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            })
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        infos
            .iter()
            .map(|i| match i.nulls {
                Some(nulls) => format!("{}.{}.{}", i.column, i.sort.to_postgrest(), nulls.to_postgrest()),
                None => format!("{}.{}", i.column, i.sort.to_postgrest()),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_default_order() {
        let infos = FilterOrder::validate_and_parse("id.asc").unwrap();
        assert_eq!(
            infos,
            vec![FilterOrderInfo { column: "id".to_string(), sort: SortDirection::Asc, nulls: None }]
        );
    }

    #[test]
    fn test_multiple_terms_round_trip_to_postgrest() {
        let infos = FilterOrder::validate_and_parse("created_at.DESC.nullslast, name").unwrap();
        assert_eq!(FilterOrder::generate(&infos), "created_at.desc.nullslast,name.asc");
    }

    #[test]
    fn test_json_path_columns() {
        let infos = FilterOrder::validate_and_parse("meta->>rank.desc").unwrap();
        assert_eq!(infos[0].column, "meta->>rank");
    }

    #[test]
    fn test_rejects_malformed_terms() {
        for bad in ["", "id,,name", "id.sideways", "na me.asc", "id;drop", "id.nullsfirst.asc", "->x"] {
            assert!(FilterOrder::validate_and_parse(bad).is_err(), "expected '{}' to be rejected", bad);
        }
    }
}
