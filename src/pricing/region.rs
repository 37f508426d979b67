use serde::{Deserialize, Serialize};

/// Coarse pricing region derived from client locale/timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    In,
    Us,
    Eu,
    Other,
}

/// Primary language subtags that resolve to India
const INDIAN_LANGUAGES: &[&str] = &["hi", "bn", "te", "mr", "ta", "gu"];

const INDIAN_TIMEZONES: &[&str] = &["Asia/Kolkata", "Asia/Calcutta"];

impl Region {
    pub const ALL: [Region; 4] = [Region::In, Region::Us, Region::Eu, Region::Other];

    /// Resolve a region from a BCP 47 locale tag and an IANA timezone name.
    ///
    /// First match wins: India (language or timezone), US (US English or an
    /// `America/` zone), Europe (`Europe/` zone), then `Other`.
    pub fn resolve(locale: &str, timezone: &str) -> Region {
        let timezone = timezone.trim();
        let mut subtags = locale.trim().split(['-', '_']);
        let language = subtags.next().unwrap_or_default();

        let indian_language = INDIAN_LANGUAGES
            .iter()
            .any(|lang| language.eq_ignore_ascii_case(lang));
        if indian_language || INDIAN_TIMEZONES.contains(&timezone) {
            return Region::In;
        }

        let us_english = language.eq_ignore_ascii_case("en")
            && subtags.any(|subtag| subtag.eq_ignore_ascii_case("us"));
        if us_english || timezone.starts_with("America/") {
            return Region::Us;
        }

        if timezone.starts_with("Europe/") {
            return Region::Eu;
        }

        Region::Other
    }

    /// Parse a region code; anything unrecognized is `Other`
    pub fn from_code(code: &str) -> Region {
        match code.trim().to_ascii_uppercase().as_str() {
            "IN" => Region::In,
            "US" => Region::Us,
            "EU" => Region::Eu,
            _ => Region::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::In => "IN",
            Region::Us => "US",
            Region::Eu => "EU",
            Region::Other => "OTHER",
        }
    }
}
