//! Textual runway metadata extraction.
//!
//! Every airport diagram carries a listing of its runways ("RWY 16L-34R"),
//! per-end magnetic headings, and threshold elevations. Two text extractions
//! of the same document are needed: the plain variant reads most glyphs
//! correctly but drops the degree symbol, while the rich variant preserves
//! `°` and is used only to decide which three-digit decimals are genuine
//! headings rather than frequencies or distances.

use std::sync::OnceLock;

use regex::Regex;

/// The two text extractions of one source document.
#[derive(Debug, Clone)]
pub struct DocumentText {
    /// Layout-preserving extraction; degree symbols are lost.
    pub plain: String,
    /// Glyph-preserving extraction; keeps `°` after heading angles.
    pub rich: String,
}

/// One runway end as documented in the diagram text.
#[derive(Debug, Clone, PartialEq)]
pub struct RunwayMeta {
    /// Corrected runway designator, e.g. `"05L"`.
    pub name: String,
    /// Documented magnetic heading in degrees.
    pub heading_deg: f32,
    /// Documented threshold elevation in feet.
    pub elevation_ft: i32,
}

// Runway listings: one or more dd[RCL]-dd[RCL] pairs, optionally
// comma-separated, after a possibly letter-spaced "RWY".
fn runway_list_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"R *W *Y *(( *\d\d[RCL]*-\d\d[RCL]*,*)*)").unwrap())
}

// Runway mentions anywhere in the text: one or two digits plus optional
// position letter, preceded by some separator character.
fn runway_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r".(\d{1,2}[LCR]*)").unwrap())
}

// Headings are four significant digits with tenths precision.
fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{3}\.\d)").unwrap())
}

fn heading_degrees_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{3}\.\d)°").unwrap())
}

// TODO: tighten to the elevation keywords (ELEV/TDZE); the bare-number form
// also matches stray numeric tokens on lines without an elevation.
fn elevation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r".*\b[A-Za-z]*(\d{1,4})\b.*").unwrap())
}

fn short_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d[LRC]*$").unwrap())
}

/// Zero-pad a one-digit runway designator.
///
/// The listing block pads one-digit runways ("RWY 05L-23R") but labels near
/// the drawn runways do not ("5L"); names are normalized to the padded form
/// before comparison.
pub fn correct_runway(name: &str) -> String {
    if name.len() < 3 && short_name_pattern().is_match(name) {
        format!("0{name}")
    } else {
        name.to_string()
    }
}

/// Names considered valid for this airport, from the runway listing block.
fn valid_runway_names(plain: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in plain.lines() {
        let Some(caps) = runway_list_pattern().captures(line) else {
            continue;
        };
        let pairs = caps[1].replace(' ', "");
        for pair in pairs.split(',').filter(|p| !p.is_empty()) {
            for name in pair.split('-') {
                if !name.is_empty() && !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
    }
    names
}

/// Heading strings considered valid, from the degree-symbol extraction.
///
/// String comparison on the formatted text sidesteps float-equality noise.
fn valid_headings(rich: &str) -> Vec<String> {
    let mut headings = Vec::new();
    for line in rich.lines() {
        if let Some(caps) = heading_degrees_pattern().captures(line) {
            let heading = caps[1].to_string();
            if !headings.contains(&heading) {
                headings.push(heading);
            }
        }
    }
    headings
}

/// Extract per-end runway metadata from the document text.
///
/// Lines failing a pattern contribute nothing. The three collected lists are
/// zipped positionally; a length mismatch is reported and the shortest list
/// wins. An entirely empty result is a soft signal that the document does
/// not follow the expected diagram format.
pub fn parse_runway_metadata(text: &DocumentText) -> Vec<RunwayMeta> {
    let valid_names = valid_runway_names(&text.plain);
    let valid_headings = valid_headings(&text.rich);

    let mut names: Vec<String> = Vec::new();
    let mut headings: Vec<f32> = Vec::new();
    let mut elevations: Vec<i32> = Vec::new();

    for line in text.plain.lines() {
        for caps in runway_pattern().captures_iter(line) {
            let corrected = correct_runway(&caps[1]);
            if valid_names.contains(&corrected) && !names.contains(&corrected) {
                names.push(corrected);
            }
        }

        if let Some(caps) = heading_pattern().captures(line) {
            let heading = &caps[1];
            if valid_headings.iter().any(|v| v == heading) {
                if let Ok(parsed) = heading.parse() {
                    headings.push(parsed);
                }
            }
        }

        if let Some(caps) = elevation_pattern().captures(line) {
            if let Ok(parsed) = caps[1].parse() {
                elevations.push(parsed);
            }
        }
    }

    let count = names.len().min(headings.len()).min(elevations.len());
    if count < names.len() || count < headings.len() || count < elevations.len() {
        tracing::warn!(
            "runway metadata lists desynchronized: {} names, {} headings, {} elevations",
            names.len(),
            headings.len(),
            elevations.len()
        );
    }
    if count == 0 {
        tracing::warn!("no runway metadata matched; document may not follow the diagram format");
        return Vec::new();
    }

    names
        .into_iter()
        .zip(headings)
        .zip(elevations)
        .take(count)
        .map(|((name, heading_deg), elevation_ft)| RunwayMeta {
            name,
            heading_deg,
            elevation_ft,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_digit_names_are_zero_padded() {
        assert_eq!(correct_runway("5L"), "05L");
        assert_eq!(correct_runway("5"), "05");
        assert_eq!(correct_runway("27"), "27");
        assert_eq!(correct_runway("09C"), "09C");
    }

    #[test]
    fn listing_block_defines_valid_names() {
        let plain = "ELEV 433\nR W Y 16L-34R, 16C-34C\nRWY 09-27\n";
        let names = valid_runway_names(plain);
        assert_eq!(names, vec!["16L", "34R", "16C", "34C", "09", "27"]);
    }

    #[test]
    fn degree_symbol_gates_headings() {
        let rich = "164.3°\nDME 113.0\n344.3°\n";
        assert_eq!(valid_headings(rich), vec!["164.3", "344.3"]);
    }

    #[test]
    fn document_parse_zips_names_headings_elevations() {
        let text = DocumentText {
            plain: "BIG CITY INTL (BCI)\n\
                    RWY 16L-34R\n\
                    164.3 ELEV 433\n\
                    344.3 ELEV 361\n"
                .to_string(),
            rich: "164.3°\n344.3°\n".to_string(),
        };
        let metas = parse_runway_metadata(&text);
        assert_eq!(
            metas,
            vec![
                RunwayMeta {
                    name: "16L".to_string(),
                    heading_deg: 164.3,
                    elevation_ft: 433,
                },
                RunwayMeta {
                    name: "34R".to_string(),
                    heading_deg: 344.3,
                    elevation_ft: 361,
                },
            ]
        );
    }

    #[test]
    fn headings_without_degree_confirmation_are_ignored() {
        let text = DocumentText {
            plain: "RWY 16L-34R\n113.0 ELEV 433\n".to_string(),
            rich: String::new(),
        };
        assert!(parse_runway_metadata(&text).is_empty());
    }

    #[test]
    fn unrelated_document_yields_nothing() {
        let text = DocumentText {
            plain: "quarterly earnings were strong\n".to_string(),
            rich: String::new(),
        };
        assert!(parse_runway_metadata(&text).is_empty());
    }
}
