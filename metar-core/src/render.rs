use crate::{
    model::Finding,
    parser::{METAR_SIG, TAF_SIG},
};

/// Separator printed between airports when more than one code is requested.
pub const FINDING_DELIM: &str = "\n\n---------------------------------------\n\n";

fn or_not_found(report: &str, sig: &str, code: &str) -> String {
    if report.is_empty() {
        format!("No {sig} found for {code}")
    } else {
        report.to_string()
    }
}

impl Finding {
    /// Plain-text report, mirroring how the provider's website lays it out.
    pub fn render(&self, taf: bool) -> String {
        let metar = or_not_found(&self.metar, METAR_SIG, &self.code);

        if !taf {
            return metar;
        }

        let taf = or_not_found(&self.taf, TAF_SIG, &self.code);

        format!("{metar}\n\n{taf}")
    }
}

pub fn render_findings(findings: &[Finding], taf: bool) -> String {
    findings
        .iter()
        .map(|f| f.render(taf))
        .collect::<Vec<_>>()
        .join(FINDING_DELIM)
}
