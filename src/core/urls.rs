use url::Url;

use crate::core::parsing::tags;
use crate::domain::model::{Format, RequestAttribute};
use crate::utils::error::Result;
use crate::utils::validation::validate_base_url;

/// Builds the GET and POST targets for one bound endpoint.
///
/// The base URL, jurisdiction and wire format are fixed at construction;
/// every produced URL carries the format as its resource extension and, for
/// GET targets, the jurisdiction as a query parameter when one is set.
#[derive(Debug, Clone)]
pub struct RequestUrlBuilder {
    base_url: String,
    jurisdiction_id: String,
    format: Format,
}

impl RequestUrlBuilder {
    pub fn new(base_url: &str, jurisdiction_id: &str, format: Format) -> Result<Self> {
        validate_base_url("base_url", base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            jurisdiction_id: jurisdiction_id.to_string(),
            format,
        })
    }

    pub fn format(&self) -> Format {
        self.format
    }

    fn resource(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}.{}",
            self.base_url,
            path,
            self.format.extension()
        ))?;
        if !self.jurisdiction_id.is_empty() {
            url.query_pairs_mut()
                .append_pair(tags::JURISDICTION_ID, &self.jurisdiction_id);
        }
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    pub fn service_list(&self) -> Result<Url> {
        self.resource("services", &[])
    }

    pub fn service_definition(&self, service_code: &str) -> Result<Url> {
        self.resource(&format!("services/{}", service_code), &[])
    }

    /// POST target for new service requests. The jurisdiction travels in the
    /// request body, not the URL.
    pub fn post_service_request(&self) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}/requests.{}",
            self.base_url,
            self.format.extension()
        ))?)
    }

    pub fn request_id_from_token(&self, token: &str) -> Result<Url> {
        self.resource(&format!("tokens/{}", token), &[])
    }

    /// Query URL for a filtered list of service requests. Filter pairs are
    /// appended in the order given.
    pub fn service_requests(&self, filters: &[(&str, &str)]) -> Result<Url> {
        self.resource("requests", filters)
    }

    pub fn service_request(&self, service_request_id: &str) -> Result<Url> {
        self.resource(&format!("requests/{}", service_request_id), &[])
    }

    /// Body parameters for posting a new service request. Attribute pairs are
    /// appended after the plain arguments and override same-keyed ones.
    pub fn post_service_request_body(
        &self,
        arguments: &[(String, String)],
        attributes: &[RequestAttribute],
    ) -> Vec<(String, String)> {
        let mut body: Vec<(String, String)> = arguments.to_vec();
        if !self.jurisdiction_id.is_empty()
            && !body.iter().any(|(key, _)| key == tags::JURISDICTION_ID)
        {
            body.push((
                tags::JURISDICTION_ID.to_string(),
                self.jurisdiction_id.clone(),
            ));
        }
        let pairs: Vec<(String, String)> = attributes
            .iter()
            .flat_map(RequestAttribute::to_post_parameters)
            .collect();
        body.retain(|(key, _)| !pairs.iter().any(|(attr_key, _)| attr_key == key));
        body.extend(pairs);
        body
    }
}
