use crate::{
    Config, Finding, ReportRequest,
    error::MetarError,
    parser::ResponseFormat,
    provider::aviationweather::AviationWeatherProvider,
};
use async_trait::async_trait;
use reqwest::Url;
use std::fmt::Debug;

pub mod aviationweather;

/// Upstream endpoints. They serve the same reports, each in its own layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderId {
    /// Current data API, line-tagged plain text.
    #[default]
    AviationWeather,
    /// CGI endpoint, reports separated by blank lines.
    AviationWeatherLegacy,
    /// Old website, reports wrapped in HTML `<code>` elements.
    AviationWeatherClassic,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::AviationWeather => "aviationweather",
            ProviderId::AviationWeatherLegacy => "aviationweather-legacy",
            ProviderId::AviationWeatherClassic => "aviationweather-classic",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[
            ProviderId::AviationWeather,
            ProviderId::AviationWeatherLegacy,
            ProviderId::AviationWeatherClassic,
        ]
    }

    pub fn format(&self) -> ResponseFormat {
        match self {
            ProviderId::AviationWeather => ResponseFormat::LineTagged,
            ProviderId::AviationWeatherLegacy => ResponseFormat::BlankLineDelimited,
            ProviderId::AviationWeatherClassic => ResponseFormat::HtmlCode,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        ProviderId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == lower)
            .ok_or_else(|| {
                let supported: Vec<&str> = ProviderId::all().iter().map(|id| id.as_str()).collect();
                anyhow::anyhow!(
                    "Unknown provider '{value}'. Supported providers: {}.",
                    supported.join(", ")
                )
            })
    }
}

#[async_trait]
pub trait ReportProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    /// URL the reports for `request` are fetched from.
    fn report_url(&self, request: &ReportRequest) -> Result<Url, MetarError>;

    async fn get_reports(&self, request: &ReportRequest) -> Result<Vec<Finding>, MetarError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> Result<Box<dyn ReportProvider>, MetarError> {
    let boxed: Box<dyn ReportProvider> = match id {
        ProviderId::AviationWeather
        | ProviderId::AviationWeatherLegacy
        | ProviderId::AviationWeatherClassic => {
            Box::new(AviationWeatherProvider::new(id, config.timeout())?)
        }
    };

    Ok(boxed)
}

/// Construct the provider named by the config's `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ReportProvider>> {
    let id = config.provider_id()?;
    Ok(provider_from_config(id, config)?)
}
