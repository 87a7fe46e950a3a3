//! Turns a raw provider response into per-airport [`Finding`]s.
//!
//! The upstream endpoints publish the same reports in different shapes, so the
//! segmentation strategy is picked explicitly with [`ResponseFormat`].

use crate::{codes::normalize_codes, error::MetarError, model::Finding};

mod blank_line;
mod html_code;
mod line_tagged;

/// Report signatures used to classify segments and synthesize missing headers.
pub const METAR_SIG: &str = "METAR";
pub const TAF_SIG: &str = "TAF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    /// One report per line group, each opened by a `METAR` or `TAF` line.
    LineTagged,
    /// Reports separated by an empty line, METAR first, TAF following.
    BlankLineDelimited,
    /// HTML page with every report wrapped in a `<code>` element.
    HtmlCode,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::LineTagged => "line-tagged",
            ResponseFormat::BlankLineDelimited => "blank-line",
            ResponseFormat::HtmlCode => "html-code",
        }
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `body` into findings.
///
/// `codes` goes through [`normalize_codes`] first. When the normalized list is
/// non-empty the result holds exactly one finding per code, in that order,
/// with empty reports for codes the body does not mention. A line-tagged body
/// may also be parsed with no codes at all, in which case one finding is
/// produced per distinct METAR header, in stream order.
pub fn parse_response<S: AsRef<str>>(
    body: &str,
    codes: &[S],
    taf: bool,
    format: ResponseFormat,
) -> Result<Vec<Finding>, MetarError> {
    let codes = normalize_codes(codes);
    tracing::debug!(%format, codes = ?codes, taf, len = body.len(), "parsing response");

    let findings = match format {
        ResponseFormat::LineTagged => line_tagged::parse(body, &codes, taf)?,
        ResponseFormat::BlankLineDelimited => blank_line::parse(body, &codes, taf),
        ResponseFormat::HtmlCode => html_code::parse(body, &codes, taf)?,
    };

    for f in findings.iter().filter(|f| f.metar.is_empty()) {
        tracing::warn!(code = %f.code, "no METAR found in response");
    }

    Ok(findings)
}

/// Returns `text` unchanged if it already starts with `sig`, otherwise
/// prefixes it with `sig` and a space.
fn with_signature(text: &str, sig: &str) -> String {
    if text.starts_with(sig) {
        text.to_string()
    } else {
        format!("{sig} {text}")
    }
}
