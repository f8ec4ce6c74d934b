use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, PredictError};
use crate::model::{PredictionRequest, PredictionResult};

const USER_AGENT: &str = concat!("homeprice/", env!("CARGO_PKG_VERSION"));

/// Anything that can turn a request into a price estimate.
pub trait PredictionClient {
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResult, PredictError>> + Send;
}

/// Posts requests as JSON to a fixed endpoint. One attempt per call.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: Client,
    endpoint: Url,
}

impl HttpPredictionClient {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ConfigError::HttpClient)?;
        Ok(Self { client, endpoint })
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictError> {
        debug!(endpoint = %self.endpoint, ?request, "sending prediction request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        debug!(status = %response.status(), "prediction response received");

        let result = response.json::<PredictionResult>().await?;
        debug!(price = result.predicted_price, "prediction decoded");
        Ok(result)
    }
}
