use crate::{
    model::Finding,
    parser::{METAR_SIG, TAF_SIG, with_signature},
};

const SEGMENT_DELIM: &str = "\n\n";

/// Segments are matched to the requested codes by substring. A matched segment
/// is the METAR; with TAF requested, the segment right after it is the TAF and
/// is consumed along with it.
pub(super) fn parse(body: &str, codes: &[String], taf: bool) -> Vec<Finding> {
    let segments: Vec<&str> = body
        .split(SEGMENT_DELIM)
        .map(|s| s.trim_matches('\n'))
        .filter(|s| !s.trim().is_empty())
        .collect();
    let mut findings: Vec<Finding> = codes.iter().map(Finding::new).collect();

    let mut rest = segments.iter();
    while let Some(segment) = rest.next() {
        let Some(f) = findings.iter_mut().find(|f| segment.contains(f.code.as_str())) else {
            continue;
        };

        if !f.metar.is_empty() {
            tracing::debug!(code = %f.code, "segment for already reported code, skipping");
            continue;
        }
        f.metar = with_signature(segment, METAR_SIG);

        if !taf {
            continue;
        }
        if let Some(next) = rest.next() {
            f.taf = with_signature(next, TAF_SIG);
        }
    }

    findings.into_iter().map(Finding::finish).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_SEP: &str = include_str!("../../testdata/legacy_sep.txt");

    const METAR_ABCD: &str = "ABCD 121200Z 27010KT CAVOK 15/05 Q1019";
    const TAF_ABCD: &str = "ABCD 121100Z 1212/1312 27010KT CAVOK";

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn synthesizes_metar_and_taf_headers() {
        let body = format!("{METAR_ABCD}\n\n{TAF_ABCD}\n");

        let findings = parse(&body, &codes(&["ABCD"]), true);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].metar, format!("METAR {METAR_ABCD}"));
        assert_eq!(findings[0].taf, format!("TAF {TAF_ABCD}"));
        assert!(findings[0].ok);
    }

    #[test]
    fn taf_segment_untouched_when_not_requested() {
        let body = format!("{METAR_ABCD}\n\n{TAF_ABCD}\n");

        let findings = parse(&body, &codes(&["ABCD"]), false);

        assert_eq!(findings[0].metar, format!("METAR {METAR_ABCD}"));
        assert!(findings[0].taf.is_empty());
    }

    #[test]
    fn existing_signatures_are_kept() {
        let metar = "METAR EPWA 121230Z 27010KT 9999 FEW030 14/06 Q1017";
        let taf = "TAF EPWA 121130Z 1212/1318 27010KT 9999 FEW030";
        let body = format!("{metar}\n\n{taf}\n\n");

        let findings = parse(&body, &codes(&["EPWA"]), true);

        assert_eq!(findings[0].metar, metar);
        assert_eq!(findings[0].taf, taf);
    }

    #[test]
    fn matches_by_containment_not_position() {
        let findings = parse(LEGACY_SEP, &codes(&["LKPR", "EPWA"]), true);

        let lkpr = &findings[0];
        assert_eq!(lkpr.code, "LKPR");
        assert!(lkpr.metar.starts_with("METAR LKPR 121230Z"));
        assert!(lkpr.taf.starts_with("TAF LKPR 121100Z"));
        assert!(lkpr.taf.ends_with("BECMG 1218/1220 VRB03KT"));
        assert!(!lkpr.ok);

        let epwa = &findings[1];
        assert_eq!(epwa.code, "EPWA");
        assert!(epwa.metar.starts_with("METAR EPWA 121230Z"));
        assert!(epwa.taf.contains("\n      TEMPO 1214/1218 SCT035CB"));
        assert!(epwa.ok);
    }

    #[test]
    fn unmatched_code_keeps_empty_finding() {
        let findings = parse(LEGACY_SEP, &codes(&["EPWA", "KLAX"]), true);

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[1], Finding::new("KLAX"));
    }

    #[test]
    fn last_metar_without_taf_segment() {
        let findings = parse(METAR_ABCD, &codes(&["ABCD"]), true);

        assert!(!findings[0].metar.is_empty());
        assert!(findings[0].taf.is_empty());
    }

    #[test]
    fn trailing_separator_is_not_a_taf() {
        for body in [
            format!("{METAR_ABCD}\n\n"),
            format!("{METAR_ABCD}\n\n\n\n"),
            format!("{METAR_ABCD}\n\n  \n\n"),
        ] {
            let findings = parse(&body, &codes(&["ABCD"]), true);

            assert_eq!(findings[0].metar, format!("METAR {METAR_ABCD}"));
            assert!(findings[0].taf.is_empty(), "body: {body:?}");
            assert_eq!(
                findings[0].render(true),
                format!("METAR {METAR_ABCD}\n\nNo TAF found for ABCD")
            );
        }
    }

    #[test]
    fn blank_segments_do_not_shift_taf() {
        let body = format!("\n\n{METAR_ABCD}\n\n\n\n{TAF_ABCD}\n\n");

        let findings = parse(&body, &codes(&["ABCD"]), true);

        assert_eq!(findings[0].taf, format!("TAF {TAF_ABCD}"));
    }

    #[test]
    fn no_codes_no_findings() {
        assert!(parse(LEGACY_SEP, &[], true).is_empty());
    }
}
