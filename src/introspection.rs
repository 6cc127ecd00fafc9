//! Schema introspection helpers.
//!
//! Builds the standard `__type` / `__schema` introspection requests and
//! decodes their results.
//!
//! # Example
//!
//! ```rust
//! use school_graphql::introspection::TypeRef;
//! use serde_json::json;
//!
//! let ty: TypeRef = serde_json::from_value(json!({
//!     "kind": "NON_NULL",
//!     "name": null,
//!     "ofType": {"kind": "LIST", "name": null, "ofType": {"kind": "OBJECT", "name": "audit"}}
//! }))
//! .unwrap();
//!
//! assert_eq!(ty.display_name(), "[audit]!");
//! ```

use serde::Deserialize;

use crate::clients::graphql::{GraphqlClient, GraphqlRequest, QueryError};

/// Types most useful for exploring student data.
pub const COMMON_TYPES: [&str; 7] = [
    "audit",
    "group_user",
    "group",
    "user",
    "result",
    "progress",
    "object",
];

const TYPE_FIELDS_QUERY: &str = r"query TypeFields($name: String!) {
  __type(name: $name) {
    name
    kind
    description
    fields {
      name
      description
      type {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
            }
          }
        }
      }
    }
  }
}";

const SCHEMA_TYPES_QUERY: &str = r"query SchemaTypes {
  __schema {
    types {
      name
      kind
      description
    }
  }
}";

/// Builds a request describing the fields of the type called `name`.
#[must_use]
pub fn type_fields(name: &str) -> GraphqlRequest {
    GraphqlRequest::new(TYPE_FIELDS_QUERY).variable("name", name)
}

/// Builds a request listing every type in the schema.
#[must_use]
pub fn schema_types() -> GraphqlRequest {
    GraphqlRequest::new(SCHEMA_TYPES_QUERY)
}

/// A reference to a type, possibly wrapped in `LIST` / `NON_NULL`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Type kind (`OBJECT`, `SCALAR`, `LIST`, `NON_NULL`, ...).
    pub kind: String,
    /// Type name; `None` for wrapper kinds.
    #[serde(default)]
    pub name: Option<String>,
    /// The wrapped type, for wrapper kinds.
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Renders the reference in SDL notation, e.g. `[Int!]!`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let inner = || {
            self.of_type
                .as_deref()
                .map_or_else(|| "?".to_string(), Self::display_name)
        };
        match self.kind.as_str() {
            "NON_NULL" => format!("{}!", inner()),
            "LIST" => format!("[{}]", inner()),
            _ => self.name.clone().unwrap_or_else(inner),
        }
    }
}

/// A field of an introspected type.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FieldDescription {
    /// Field name.
    pub name: String,
    /// Field description, if documented.
    #[serde(default)]
    pub description: Option<String>,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// An introspected type.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TypeDescription {
    /// Type name.
    pub name: String,
    /// Type kind.
    pub kind: String,
    /// Type description, if documented.
    #[serde(default)]
    pub description: Option<String>,
    /// Fields; empty for scalars, enums and input types.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<FieldDescription>,
}

#[derive(Deserialize)]
struct TypeFieldsData {
    #[serde(rename = "__type")]
    ty: Option<TypeDescription>,
}

#[derive(Deserialize)]
struct SchemaTypesData {
    #[serde(rename = "__schema")]
    schema: SchemaTypeList,
}

#[derive(Deserialize)]
struct SchemaTypeList {
    types: Vec<TypeDescription>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FieldDescription>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<FieldDescription>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Describes the type called `name`.
///
/// Returns `Ok(None)` if the schema has no such type.
///
/// # Errors
///
/// Returns [`QueryError`] if the query fails or the result cannot be decoded.
pub async fn describe_type(
    client: &GraphqlClient,
    name: &str,
) -> Result<Option<TypeDescription>, QueryError> {
    let data: TypeFieldsData = client.execute_as(&type_fields(name)).await?;
    Ok(data.ty)
}

/// Lists every type in the schema, without fields.
///
/// # Errors
///
/// Returns [`QueryError`] if the query fails or the result cannot be decoded.
pub async fn list_types(client: &GraphqlClient) -> Result<Vec<TypeDescription>, QueryError> {
    let data: SchemaTypesData = client.execute_as(&schema_types()).await?;
    Ok(data.schema.types)
}
