use std::num::IntErrorKind;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterData, FilterOrderInfo, DEFAULT_LIMIT, DEFAULT_ORDER, DEFAULT_SELECT, MAX_LIMIT, MIN_LIMIT};
use crate::config::Collection;

/// PostgREST read query for one collection
#[derive(Debug, Clone)]
pub struct Filter {
    table_name: String,
    search_columns: Vec<String>,
    select_columns: Vec<String>,
    search: Option<String>,
    order_data: Vec<FilterOrderInfo>,
    limit: u32,
    offset: u64,
}

impl Filter {
    pub fn new(collection: &Collection) -> Self {
        Self {
            table_name: collection.table.clone(),
            search_columns: collection.search_columns.clone(),
            select_columns: vec![DEFAULT_SELECT.to_string()],
            search: None,
            order_data: FilterOrder::validate_and_parse(DEFAULT_ORDER).unwrap_or_default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    pub fn assign(&mut self, data: &FilterData) -> Result<&mut Self, FilterError> {
        self.select(data.select.as_deref())?;
        self.order(data.order.as_deref())?;
        self.search(data.q.as_deref());
        self.limit(data.limit.as_deref(), data.offset.as_deref());
        Ok(self)
    }

    /// Comma-separated select list. Commas inside embedded resources (`owner(name,email)`) are kept.
    pub fn select(&mut self, spec: Option<&str>) -> Result<&mut Self, FilterError> {
        let spec = match spec.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => {
                self.select_columns = vec![DEFAULT_SELECT.to_string()];
                return Ok(self);
            }
        };

        let mut columns = vec![];
        let mut depth = 0usize;
        let mut current = String::new();
        for c in spec.chars() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| FilterError::InvalidSelect(format!("unbalanced ')' in '{}'", spec)))?;
                }
                ',' if depth == 0 => {
                    columns.push(Self::take_column(&mut current, spec)?);
                    continue;
                }
                _ => {}
            }
            current.push(c);
        }
        if depth != 0 {
            return Err(FilterError::InvalidSelect(format!("unbalanced '(' in '{}'", spec)));
        }
        columns.push(Self::take_column(&mut current, spec)?);

        self.select_columns = columns;
        Ok(self)
    }

    fn take_column(current: &mut String, spec: &str) -> Result<String, FilterError> {
        let column = current.trim().to_string();
        current.clear();
        if column.is_empty() {
            return Err(FilterError::InvalidSelect(format!("empty column in '{}'", spec)));
        }
        Ok(column)
    }

    pub fn order(&mut self, spec: Option<&str>) -> Result<&mut Self, FilterError> {
        let spec = spec.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_ORDER);
        self.order_data = FilterOrder::validate_and_parse(spec)?;
        Ok(self)
    }

    /// Blank search text counts as no search
    pub fn search(&mut self, q: Option<&str>) -> &mut Self {
        self.search = q.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    /// Clamp limit into [1, 500] and offset to >= 0. Unparseable input falls back to defaults.
    pub fn limit(&mut self, limit: Option<&str>, offset: Option<&str>) -> &mut Self {
        let requested = limit.and_then(Self::parse_integer);
        self.limit = match requested {
            Some(l) => l.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as u32,
            None => DEFAULT_LIMIT,
        };
        if let Some(l) = requested {
            if l != self.limit as i64 {
                tracing::debug!("Limit {} outside [{}, {}], using {}", l, MIN_LIMIT, MAX_LIMIT, self.limit);
            }
        }

        self.offset = offset
            .and_then(Self::parse_integer)
            .map(|o| o.max(0) as u64)
            .unwrap_or(0);
        self
    }

    /// Integers too large for i64 saturate so they still clamp to the nearest bound
    fn parse_integer(text: &str) -> Option<i64> {
        match text.trim().parse::<i64>() {
            Ok(n) => Some(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Some(i64::MAX),
                IntErrorKind::NegOverflow => Some(i64::MIN),
                _ => None,
            },
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit
    }

    pub fn effective_offset(&self) -> u64 {
        self.offset
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// The `or` filter value, if a search applies to this collection
    pub fn to_search_filter(&self) -> Option<String> {
        self.search
            .as_deref()
            .and_then(|q| FilterWhere::generate(&self.search_columns, q))
    }

    /// Query parameters for the PostgREST table endpoint, in a stable order
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("select", self.select_columns.join(",")),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("order", FilterOrder::generate(&self.order_data)),
        ];
        if let Some(or_filter) = self.to_search_filter() {
            pairs.push(("or", or_filter));
        }
        pairs
    }
}
