use crate::{
    codes::ICAO_CODE_LEN,
    error::MetarError,
    model::Finding,
    parser::{METAR_SIG, TAF_SIG},
};

/// Byte offset of the station code in a `METAR XXXX ...` header line.
const HEADER_CODE_OFFSET: usize = METAR_SIG.len() + 1;

/// Extracts the station code from a METAR header line.
///
/// The upstream stream is fixed-width here: the code always sits right after
/// the `METAR ` prefix, at characters 6..10.
fn header_code(line: &str) -> Result<String, MetarError> {
    line.get(HEADER_CODE_OFFSET..HEADER_CODE_OFFSET + ICAO_CODE_LEN)
        .filter(|code| code.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_uppercase)
        .ok_or_else(|| {
            MetarError::MalformedResponse(format!("METAR header without station code: {line:?}"))
        })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Section {
    #[default]
    Metar,
    Taf,
}

/// Accumulator threaded through the line fold.
#[derive(Debug, Default)]
struct LineScan {
    findings: Vec<Finding>,
    current: Option<usize>,
    section: Section,
    buffer: String,
}

impl LineScan {
    fn step(mut self, line: &str, taf: bool) -> Result<Self, MetarError> {
        let line = line.trim_end_matches(' ');

        if line.starts_with(METAR_SIG) {
            let code = header_code(line)?;
            self.flush(taf);
            self.current = Some(self.open(code));
            self.section = Section::Metar;
        } else if line.starts_with(TAF_SIG) {
            if self.current.is_none() {
                return Err(MetarError::MalformedResponse(
                    "TAF report precedes any METAR report".to_string(),
                ));
            }
            self.flush(taf);
            self.section = Section::Taf;
        } else if self.current.is_none() {
            tracing::debug!(line, "skipping text before first METAR header");
            return Ok(self);
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');
        Ok(self)
    }

    /// Index of the finding for `code`, creating it on first sight.
    fn open(&mut self, code: String) -> usize {
        if let Some(idx) = self.findings.iter().position(|f| f.code == code) {
            tracing::debug!(%code, "repeated METAR header, keeping the first report");
            return idx;
        }
        self.findings.push(Finding::new(code));
        self.findings.len() - 1
    }

    /// Moves the pending buffer into the open section of the current finding.
    /// The first report seen for a section wins.
    fn flush(&mut self, taf: bool) {
        let text = std::mem::take(&mut self.buffer);
        let Some(f) = self.current.and_then(|idx| self.findings.get_mut(idx)) else {
            return;
        };

        let target = match self.section {
            Section::Metar => &mut f.metar,
            Section::Taf if taf => &mut f.taf,
            Section::Taf => return,
        };

        if target.is_empty() {
            *target = text;
        }
    }

    fn finish(mut self, taf: bool) -> Vec<Finding> {
        self.flush(taf);
        self.findings.into_iter().map(Finding::finish).collect()
    }
}

pub(super) fn parse(body: &str, codes: &[String], taf: bool) -> Result<Vec<Finding>, MetarError> {
    let found = body
        .lines()
        .try_fold(LineScan::default(), |scan, line| scan.step(line, taf))?
        .finish(taf);

    if codes.is_empty() {
        return Ok(found);
    }

    for f in found.iter().filter(|f| !codes.contains(&f.code)) {
        tracing::debug!(code = %f.code, "dropping report for code that was not requested");
    }

    Ok(codes
        .iter()
        .map(|code| {
            found
                .iter()
                .find(|f| &f.code == code)
                .cloned()
                .unwrap_or_else(|| Finding::new(code))
        })
        .collect())
}
