//! Relationship operations: related creation, appends, targeted deletes.

use serde::Serialize;
use tracing::{debug, instrument};

use strata_client::{validate, AuthMode};

use crate::error::{Error, ErrorKind, Result};

/// Header instructing the server to also delete referenced child records.
pub(crate) const CASCADE_DELETE_HEADER: &str = "X-Strata-Cascade-Delete";

impl super::StrataRestClient {
    /// Create records related to a parent through a relationship field.
    ///
    /// POSTs the items to `parent/{id}/{field}` and returns the created
    /// ids. Servers answer in one of two shapes: a `"succeeded"` list of
    /// ids, or (legacy) the created sub-object itself; in that case the
    /// related type's identity field is resolved through the schema
    /// registry and its value extracted from the response.
    #[instrument(skip(self, items))]
    pub async fn create_related<T: Serialize>(
        &self,
        parent: &str,
        parent_id: &str,
        field: &str,
        items: &[T],
    ) -> Result<Vec<String>> {
        validate::require_non_blank("type", parent)?;
        validate::require_non_blank("id", parent_id)?;
        validate::require_non_blank("field", field)?;
        validate::require_non_empty("items", items)?;

        let sub_path = format!("{}/{}", parent_id, field);
        let url = self.client.api_url(parent, Some(&sub_path), None);
        let response: serde_json::Value =
            self.client.post_json(&url, items, AuthMode::Signed).await?;

        if let Some(succeeded) = response.get("succeeded").and_then(|v| v.as_array()) {
            return Ok(succeeded.iter().map(id_string).collect());
        }

        // Legacy shape: the created sub-object came back instead of an id
        // list. Resolve the related type's identity field and pull it out.
        debug!(parent, field, "No succeeded list; resolving ids via schema");
        let pk = self
            .schema
            .primary_key_field(&self.client, parent, Some(field))
            .await?;

        match response.get(&pk) {
            Some(value) if !value.is_null() => Ok(vec![id_string(value)]),
            _ => Err(Error::new(ErrorKind::MissingIdentityValue {
                type_name: parent.to_string(),
                field: pk,
            })),
        }
    }

    /// Append values to an array-typed field of a parent record.
    ///
    /// PUTs the value list to `parent/{id}/{field}`. One generic core
    /// covers every element type the server accepts.
    #[instrument(skip(self, values))]
    pub async fn append<T: Serialize>(
        &self,
        parent: &str,
        parent_id: &str,
        field: &str,
        values: &[T],
    ) -> Result<serde_json::Value> {
        validate::require_non_blank("type", parent)?;
        validate::require_non_blank("id", parent_id)?;
        validate::require_non_blank("field", field)?;
        validate::require_non_empty("values", values)?;

        let sub_path = format!("{}/{}", parent_id, field);
        let url = self.client.api_url(parent, Some(&sub_path), None);
        Ok(self.client.put_json(&url, values, AuthMode::Signed).await?)
    }

    /// Delete entries from a relationship field.
    ///
    /// Issues a DELETE at `parent/{id}/{field}/{ids}` where the ids are
    /// concatenated with no separator (the wire format the server expects).
    /// With `cascade`, the referenced child records are deleted server-side
    /// as well.
    #[instrument(skip(self, ids))]
    pub async fn delete_from(
        &self,
        parent: &str,
        parent_id: &str,
        field: &str,
        ids: &[&str],
        cascade: bool,
    ) -> Result<()> {
        validate::require_non_blank("type", parent)?;
        validate::require_non_blank("id", parent_id)?;
        validate::require_non_blank("field", field)?;
        validate::require_non_empty("ids", ids)?;

        let sub_path = format!("{}/{}/{}", parent_id, field, ids.concat());
        let url = self.client.api_url(parent, Some(&sub_path), None);

        let mut request = self.client.delete(url);
        if cascade {
            request = request.header(CASCADE_DELETE_HEADER, "true");
        }
        self.client.execute(request).await?;
        Ok(())
    }
}

fn id_string(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
