use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::MetarError,
    model::Finding,
    parser::{METAR_SIG, TAF_SIG, with_signature},
};

/// Phrase the page prints in place of a report for an unknown station.
const NOT_FOUND_PHRASE: &str = "No METAR found for";

static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<code>(.*?)</code>").expect("code block pattern is valid"));

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<br\s*/?>").expect("line break pattern is valid"));

fn decode(block: &str) -> String {
    LINE_BREAK.replace_all(block, "\n").replace("&nbsp;", " ")
}

/// Each `<code>` block naming a requested station is its METAR; with TAF
/// requested, the next block for a station that already has a METAR is its
/// TAF. Blocks carrying the provider's not-found phrase are skipped. Fails
/// with [`MetarError::NotFound`] when no station got a METAR.
pub(super) fn parse(body: &str, codes: &[String], taf: bool) -> Result<Vec<Finding>, MetarError> {
    let mut findings: Vec<Finding> = codes.iter().map(Finding::new).collect();

    for caps in CODE_BLOCK.captures_iter(body) {
        let block = decode(&caps[1]);
        let block = block.trim();

        if block.contains(NOT_FOUND_PHRASE) {
            tracing::debug!(block, "provider has no report");
            continue;
        }

        let Some(f) = findings.iter_mut().find(|f| block.contains(f.code.as_str())) else {
            continue;
        };

        if f.metar.is_empty() {
            f.metar = with_signature(block, METAR_SIG);
        } else if taf && f.taf.is_empty() {
            // US stations are published without the TAF signature.
            f.taf = if block.contains(TAF_SIG) {
                block.to_string()
            } else {
                format!("{TAF_SIG} {block}")
            };
        }
    }

    if !codes.is_empty() && findings.iter().all(|f| f.metar.is_empty()) {
        return Err(MetarError::NotFound(codes.join(", ")));
    }

    Ok(findings.into_iter().map(Finding::finish).collect())
}
