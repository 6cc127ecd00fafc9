//! GraphQL request type.

use serde::Serialize;

/// Named variables passed alongside a GraphQL document.
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// A GraphQL document plus optional variables.
///
/// Values are always sent in `variables`, never spliced into the query text.
///
/// # Example
///
/// ```rust
/// use school_graphql::GraphqlRequest;
/// use serde_json::json;
///
/// let request = GraphqlRequest::new("query Audits($limit: Int!) { audit(limit: $limit) { id grade } }")
///     .variable("limit", 10);
///
/// assert_eq!(
///     serde_json::to_value(&request).unwrap(),
///     json!({
///         "query": "query Audits($limit: Int!) { audit(limit: $limit) { id grade } }",
///         "variables": {"limit": 10}
///     })
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphqlRequest {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Variables>,
}

impl GraphqlRequest {
    /// Creates a request with no variables.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    /// Replaces all variables at once.
    #[must_use]
    pub fn variables(mut self, variables: Variables) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Adds a single variable.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.variables
            .get_or_insert_with(Variables::new)
            .insert(name.into(), value.into());
        self
    }

    /// Returns the query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the variables, if any.
    #[must_use]
    pub const fn variables_ref(&self) -> Option<&Variables> {
        self.variables.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variables_omitted_when_absent() {
        let request = GraphqlRequest::new("{ user { id } }");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": "{ user { id } }"})
        );
    }

    #[test]
    fn test_variables_replaced_wholesale() {
        let mut variables = Variables::new();
        variables.insert("login".to_string(), json!("student"));

        let request = GraphqlRequest::new("q")
            .variable("old", 1)
            .variables(variables.clone());

        assert_eq!(request.variables_ref(), Some(&variables));
    }

    #[test]
    fn test_variable_values_are_not_interpolated() {
        let request = GraphqlRequest::new("query($name: String!) { __type(name: $name) { name } }")
            .variable("name", "\") { evil }");

        assert!(!request.query().contains("evil"));
        assert_eq!(
            request.variables_ref().unwrap()["name"],
            json!("\") { evil }")
        );
    }
}
