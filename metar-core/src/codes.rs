/// Length of an ICAO airport identifier.
pub const ICAO_CODE_LEN: usize = 4;

/// Upper-cases the candidates, drops anything that is not exactly
/// [`ICAO_CODE_LEN`] characters long and removes duplicates, keeping the
/// first occurrence.
///
/// Invalid input is filtered silently; an empty result is for the caller
/// to report.
pub fn normalize_codes<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .map(|c| c.as_ref().to_uppercase())
        .filter(|c| c.chars().count() == ICAO_CODE_LEN)
        .fold(Vec::new(), |mut clean, code| {
            if !clean.contains(&code) {
                clean.push(code);
            }
            clean
        })
}
