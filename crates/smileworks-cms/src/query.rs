//! Read-query description for the content backend.
//!
//! Queries are filtered, field-limited, and optionally sorted and capped;
//! they serialize to the backend's REST query parameters.

use serde_json::Value;

/// A read query against one collection.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filter: Option<Value>,
    fields: Vec<String>,
    sort: Vec<String>,
    limit: Option<u32>,
}

impl Query {
    /// Create an empty query (all records, all default fields).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter as a backend filter object, e.g.
    /// `json!({"slug": {"_eq": "home"}})`.
    #[must_use]
    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Restrict returned fields. Dotted paths expand relations.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sort keys, `-` prefix for descending.
    #[must_use]
    pub fn sort<I, S>(mut self, sort: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort = sort.into_iter().map(Into::into).collect();
        self
    }

    /// Cap the number of returned records.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The filter object, if set.
    #[must_use]
    pub fn filter_value(&self) -> Option<&Value> {
        self.filter.as_ref()
    }

    /// The record cap, if set.
    #[must_use]
    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    /// The requested field list.
    #[must_use]
    pub fn field_list(&self) -> &[String] {
        &self.fields
    }

    /// The sort key list.
    #[must_use]
    pub fn sort_list(&self) -> &[String] {
        &self.sort
    }

    /// Serialize to REST query parameters.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(filter) = &self.filter {
            params.push(("filter".to_string(), filter.to_string()));
        }
        if !self.fields.is_empty() {
            params.push(("fields".to_string(), self.fields.join(",")));
        }
        if !self.sort.is_empty() {
            params.push(("sort".to_string(), self.sort.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(Query::new().to_params().is_empty());
    }

    #[test]
    fn test_full_query_params() {
        let query = Query::new()
            .filter(json!({"slug": {"_eq": "home"}}))
            .fields(["id", "title", "slug"])
            .sort(["sort"])
            .limit(1);

        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("filter".to_string(), r#"{"slug":{"_eq":"home"}}"#.to_string()),
                ("fields".to_string(), "id,title,slug".to_string()),
                ("sort".to_string(), "sort".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_field_paths_join() {
        let query = Query::new().fields(["*", "service.*", "service.hero_image.*"]);
        let params = query.to_params();
        assert_eq!(params[0].1, "*,service.*,service.hero_image.*");
    }
}
