use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::{
    error::MetarError,
    model::{Finding, ReportRequest},
    parser::parse_response,
};

use super::{ProviderId, ReportProvider};

/// Query layout of one upstream endpoint.
#[derive(Debug, Clone, Copy)]
struct Endpoint {
    url: &'static str,
    /// Joins the codes in the `ids` parameter. A space is sent as `+`.
    codes_delim: &'static str,
    taf_values: (&'static str, &'static str),
    params: &'static [(&'static str, &'static str)],
}

fn endpoint(id: ProviderId) -> Endpoint {
    match id {
        ProviderId::AviationWeather => Endpoint {
            url: "https://aviationweather.gov/api/data/metar",
            codes_delim: ",",
            taf_values: ("true", "false"),
            params: &[("format", "raw")],
        },
        ProviderId::AviationWeatherLegacy => Endpoint {
            url: "https://aviationweather.gov/cgi-bin/data/metar.php",
            codes_delim: ",",
            taf_values: ("true", "false"),
            params: &[("hours", "0"), ("order", "id,-obs"), ("sep", "true")],
        },
        ProviderId::AviationWeatherClassic => Endpoint {
            url: "https://www.aviationweather.gov/metar/data",
            codes_delim: " ",
            taf_values: ("on", "off"),
            params: &[("format", "raw"), ("hours", "0"), ("layout", "off")],
        },
    }
}

#[derive(Debug, Clone)]
pub struct AviationWeatherProvider {
    id: ProviderId,
    base_url: String,
    http: Client,
}

impl AviationWeatherProvider {
    /// Every request uses a fresh connection: idle connections are not pooled.
    pub fn new(id: ProviderId, timeout: Duration) -> Result<Self, MetarError> {
        Self::with_base_url(id, endpoint(id).url, timeout)
    }

    /// Same query layout as `id`, sent to another host (a mirror or a test server).
    pub fn with_base_url(
        id: ProviderId,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MetarError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            id,
            base_url: base_url.into(),
            http,
        })
    }

    async fn fetch(&self, url: Url) -> Result<String, MetarError> {
        tracing::debug!(provider = %self.id, %url, "requesting reports");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(MetarError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        tracing::debug!(provider = %self.id, len = body.len(), "response received");
        Ok(body)
    }
}

#[async_trait]
impl ReportProvider for AviationWeatherProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn report_url(&self, request: &ReportRequest) -> Result<Url, MetarError> {
        let ep = endpoint(self.id);
        let ids = request.codes.join(ep.codes_delim);
        let (taf_on, taf_off) = ep.taf_values;
        let taf = if request.taf { taf_on } else { taf_off };

        let params = std::iter::once(("ids", ids.as_str()))
            .chain(ep.params.iter().copied())
            .chain(std::iter::once(("taf", taf)));

        Ok(Url::parse_with_params(&self.base_url, params)?)
    }

    async fn get_reports(&self, request: &ReportRequest) -> Result<Vec<Finding>, MetarError> {
        if request.codes.is_empty() {
            return Err(MetarError::NoCodes);
        }

        let url = self.report_url(request)?;
        let body = self.fetch(url).await?;

        parse_response(&body, &request.codes, request.taf, self.id.format())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
