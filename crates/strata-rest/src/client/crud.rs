//! CRUD operations on dynamically-typed schemas.

use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use strata_client::{validate, AuthMode};

use crate::error::Result;

use super::{expression_query, pair_query};

/// Header naming the fields the server should return.
pub(crate) const SELECT_FIELDS_HEADER: &str = "X-Strata-Select";

impl super::StrataRestClient {
    /// Create a record.
    ///
    /// POSTs the serialized value to the schema's collection endpoint and
    /// returns the stored representation: the server is the source of
    /// truth for generated fields such as ids and timestamps.
    #[instrument(skip(self, value))]
    pub async fn create<T: Serialize + DeserializeOwned>(
        &self,
        resource: &str,
        value: &T,
    ) -> Result<T> {
        validate::require_non_blank("type", resource)?;
        let url = self.client.api_url(resource, None, None);
        Ok(self.client.post_json(&url, value, AuthMode::Signed).await?)
    }

    /// Get every record of a schema.
    #[instrument(skip(self))]
    pub async fn get_all<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        validate::require_non_blank("type", resource)?;
        let url = self.client.api_url(resource, None, None);
        Ok(self.client.get_json(&url, AuthMode::Signed).await?)
    }

    /// Get a single record by id.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, resource: &str, id: &str) -> Result<T> {
        validate::require_non_blank("type", resource)?;
        validate::require_non_blank("id", id)?;
        let url = self.client.api_url(resource, Some(id), None);
        Ok(self.client.get_json(&url, AuthMode::Signed).await?)
    }

    /// Get records matching `key=value` filters, optionally selecting only
    /// the named fields.
    ///
    /// Each key and value is URL-escaped and the pairs joined with `&`.
    #[instrument(skip(self, filters, fields))]
    pub async fn get_filtered<T: DeserializeOwned>(
        &self,
        resource: &str,
        filters: &[(&str, &str)],
        fields: Option<&[&str]>,
    ) -> Result<Vec<T>> {
        validate::require_non_blank("type", resource)?;
        validate::require_non_empty("filters", filters)?;
        self.get_with_query(resource, &pair_query(filters), fields)
            .await
    }

    /// Get records matching pre-built filter expressions, optionally
    /// selecting only the named fields.
    ///
    /// Each expression is URL-escaped and joined with `&`; no `key=value`
    /// structure is imposed.
    #[instrument(skip(self, expressions, fields))]
    pub async fn get_matching<T: DeserializeOwned>(
        &self,
        resource: &str,
        expressions: &[&str],
        fields: Option<&[&str]>,
    ) -> Result<Vec<T>> {
        validate::require_non_blank("type", resource)?;
        validate::require_non_empty("filters", expressions)?;
        self.get_with_query(resource, &expression_query(expressions), fields)
            .await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &str,
        fields: Option<&[&str]>,
    ) -> Result<Vec<T>> {
        let url = self.client.api_url(resource, None, Some(query));
        let mut request = self.client.get(url);
        if let Some(fields) = fields {
            request = request.header(SELECT_FIELDS_HEADER, fields.join(","));
        }
        Ok(self.client.send_json(request).await?)
    }

    /// Replace a record wholesale and return the stored representation.
    #[instrument(skip(self, value))]
    pub async fn update<T: Serialize + DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
        value: &T,
    ) -> Result<T> {
        validate::require_non_blank("type", resource)?;
        validate::require_non_blank("id", id)?;
        let url = self.client.api_url(resource, Some(id), None);
        Ok(self.client.put_json(&url, value, AuthMode::Signed).await?)
    }

    /// Delete a single record by id.
    #[instrument(skip(self))]
    pub async fn delete(&self, resource: &str, id: &str) -> Result<()> {
        validate::require_non_blank("type", resource)?;
        validate::require_non_blank("id", id)?;
        let url = self.client.api_url(resource, Some(id), None);
        Ok(self.client.delete_request(&url, AuthMode::Signed).await?)
    }
}
