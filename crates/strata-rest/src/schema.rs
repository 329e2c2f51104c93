//! Schema descriptor types and the lazily-filled registry.
//!
//! The backend describes every schema (type name, properties, identity
//! flags, relationship references) at a fixed endpoint. The registry
//! fetches that descriptor once per client and answers identity-field
//! lookups from the cache; there is no TTL or refresh, a new client is the
//! only invalidation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tokio::sync::OnceCell;
use tracing::debug;

use strata_client::{AuthMode, StrataClient};

use crate::error::{Error, ErrorKind, Result};

/// The full API descriptor: a mapping from type name to its description.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    types: HashMap<String, TypeDescriptor>,
}

impl Schema {
    /// Look up a type's descriptor.
    pub fn type_descriptor(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// The names of all described types.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|s| s.as_str())
    }

    /// Resolve the identity (primary key) field of a type.
    ///
    /// With `related_field`, the lookup follows that field's relationship
    /// reference to the related type first. Properties are scanned in their
    /// declared order; the first identity-flagged field wins.
    pub fn primary_key_field(
        &self,
        type_name: &str,
        related_field: Option<&str>,
    ) -> Result<&str> {
        let descriptor = self
            .type_descriptor(type_name)
            .ok_or_else(|| Error::new(ErrorKind::SchemaTypeNotFound(type_name.to_string())))?;

        let (target_name, descriptor) = match related_field {
            None => (type_name.to_string(), descriptor),
            Some(field) => {
                let target = descriptor
                    .property(field)
                    .and_then(|p| p.reference.as_deref())
                    .ok_or_else(|| {
                        Error::new(ErrorKind::NoSuchRelationship {
                            type_name: type_name.to_string(),
                            field: field.to_string(),
                        })
                    })?;
                let related = self.type_descriptor(target).ok_or_else(|| {
                    Error::new(ErrorKind::SchemaTypeNotFound(target.to_string()))
                })?;
                (target.to_string(), related)
            }
        };

        descriptor
            .properties
            .iter()
            .find(|p| p.identity)
            .map(|p| p.name.as_str())
            .ok_or_else(|| Error::new(ErrorKind::NoIdentityField(target_name)))
    }
}

/// Description of one type: its properties, in declared order.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDescriptor {
    #[serde(default, deserialize_with = "ordered_properties")]
    pub properties: Vec<SchemaProperty>,
}

impl TypeDescriptor {
    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// One property of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaProperty {
    /// The field name.
    pub name: String,
    /// Whether this field is the identity (primary key) column.
    pub identity: bool,
    /// The related type this field references, if it is a relationship.
    pub reference: Option<String>,
}

/// Wire shape of a property descriptor; unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct PropertyDescriptor {
    #[serde(default)]
    identity: bool,
    #[serde(rename = "$ref")]
    reference: Option<String>,
}

/// Deserialize a JSON properties object into a Vec, preserving the
/// declared key order (identity resolution depends on it).
fn ordered_properties<'de, D>(deserializer: D) -> std::result::Result<Vec<SchemaProperty>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PropertiesVisitor;

    impl<'de> Visitor<'de> for PropertiesVisitor {
        type Value = Vec<SchemaProperty>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of property descriptors")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut properties = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, descriptor)) = map.next_entry::<String, PropertyDescriptor>()? {
                properties.push(SchemaProperty {
                    name,
                    identity: descriptor.identity,
                    reference: descriptor.reference,
                });
            }
            Ok(properties)
        }
    }

    deserializer.deserialize_map(PropertiesVisitor)
}

/// Lazily-filled, shared schema cache.
///
/// The first caller triggers the fetch; concurrent first callers share the
/// one in-flight request rather than racing. Every later call answers from
/// the cache.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    cell: OnceCell<Arc<Schema>>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the descriptor has been fetched.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Get the schema descriptor, fetching it on first use.
    pub async fn get_or_fetch(&self, client: &StrataClient) -> Result<Arc<Schema>> {
        let schema = self
            .cell
            .get_or_try_init(|| async {
                let url = client.api_url(crate::LIST_API_ENDPOINT, None, None);
                debug!(url = %url, "Fetching schema descriptor");
                let schema: Schema = client.get_json(&url, AuthMode::Signed).await?;
                Ok::<_, Error>(Arc::new(schema))
            })
            .await?;
        Ok(Arc::clone(schema))
    }

    /// Resolve a type's identity field, fetching the descriptor if needed.
    ///
    /// Resolution completes exactly once per call, from the cached
    /// descriptor when one is present.
    pub async fn primary_key_field(
        &self,
        client: &StrataClient,
        type_name: &str,
        related_field: Option<&str>,
    ) -> Result<String> {
        let schema = self.get_or_fetch(client).await?;
        schema
            .primary_key_field(type_name, related_field)
            .map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_auth::{Credentials, OAuth1Signer};
    use strata_client::ClientConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_schema() -> Schema {
        serde_json::from_value(serde_json::json!({
            "messages": {
                "properties": {
                    "messages_id": {"identity": true},
                    "message": {},
                    "comments": {"$ref": "comments"}
                }
            },
            "comments": {
                "properties": {
                    "text": {},
                    "comments_id": {"identity": true}
                }
            },
            "users": {
                "properties": {
                    "username": {"identity": true},
                    "password": {}
                }
            },
            "orphans": {
                "properties": {
                    "name": {}
                }
            }
        }))
        .unwrap()
    }

    fn test_client(api_base: &str) -> StrataClient {
        let creds = Credentials::new("key", "secret");
        StrataClient::with_config(
            Arc::new(OAuth1Signer::new(creds)),
            "1",
            ClientConfig::builder().with_api_base(api_base).build(),
        )
        .unwrap()
    }

    #[test]
    fn test_properties_preserve_declared_order() {
        let schema = sample_schema();
        let names: Vec<&str> = schema
            .type_descriptor("messages")
            .unwrap()
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["messages_id", "message", "comments"]);
    }

    #[test]
    fn test_primary_key_field() {
        let schema = sample_schema();
        assert_eq!(schema.primary_key_field("messages", None).unwrap(), "messages_id");
        assert_eq!(schema.primary_key_field("users", None).unwrap(), "username");
        // Declared order matters: comments_id is not the first property.
        assert_eq!(schema.primary_key_field("comments", None).unwrap(), "comments_id");
    }

    #[test]
    fn test_primary_key_via_relationship() {
        let schema = sample_schema();
        assert_eq!(
            schema
                .primary_key_field("messages", Some("comments"))
                .unwrap(),
            "comments_id"
        );
    }

    #[test]
    fn test_primary_key_errors() {
        let schema = sample_schema();

        let err = schema.primary_key_field("nope", None).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::SchemaTypeNotFound(_)));

        let err = schema.primary_key_field("orphans", None).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NoIdentityField(_)));

        // `message` has no $ref, so it is not a relationship.
        let err = schema
            .primary_key_field("messages", Some("message"))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NoSuchRelationship { .. }));
    }

    #[tokio::test]
    async fn test_registry_fetches_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/listapi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "messages": {"properties": {"messages_id": {"identity": true}}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let registry = SchemaRegistry::new();

        // Concurrent first callers share the in-flight fetch.
        let (a, b) = tokio::join!(
            registry.get_or_fetch(&client),
            registry.get_or_fetch(&client)
        );
        assert!(a.is_ok() && b.is_ok());

        // Later callers answer from the cache.
        let pk = registry
            .primary_key_field(&client, "messages", None)
            .await
            .unwrap();
        assert_eq!(pk, "messages_id");
        assert!(registry.is_loaded());
    }

    #[tokio::test]
    async fn test_registry_surfaces_fetch_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/listapi"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let registry = SchemaRegistry::new();
        let err = registry.get_or_fetch(&client).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Client(_)));
        assert!(!registry.is_loaded());
    }
}
