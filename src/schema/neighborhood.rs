use serde::{Deserialize, Serialize};

/// Counties the generator knows how to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum County {
    Travis,
    Williamson,
    Hays,
    Bastrop,
    Caldwell,
    Burnet,
}

impl County {
    pub const ALL: [County; 6] = [
        County::Travis,
        County::Williamson,
        County::Hays,
        County::Bastrop,
        County::Caldwell,
        County::Burnet,
    ];

    /// Display name, e.g. "Travis".
    pub fn name(&self) -> &'static str {
        match self {
            Self::Travis => "Travis",
            Self::Williamson => "Williamson",
            Self::Hays => "Hays",
            Self::Bastrop => "Bastrop",
            Self::Caldwell => "Caldwell",
            Self::Burnet => "Burnet",
        }
    }

    /// Parse a county label. Case-insensitive; a trailing "County" is ignored.
    pub fn parse(raw: &str) -> Option<County> {
        let trimmed = raw.trim();
        let lowered = trimmed.to_lowercase();
        let base = lowered
            .strip_suffix("county")
            .map(str::trim_end)
            .unwrap_or(&lowered);
        Self::ALL
            .iter()
            .copied()
            .find(|county| county.name().eq_ignore_ascii_case(base))
    }
}

/// A categorical feature that routes a record to the landmark-anchored
/// template regardless of its distance from downtown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    Lakefront,
    HistoricDistrict,
    Downtown,
    Campus,
}

impl Anchor {
    /// Lowercase phrase used by the `{anchor}` placeholder.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Lakefront => "lakefront",
            Self::HistoricDistrict => "historic district",
            Self::Downtown => "downtown",
            Self::Campus => "campus-side",
        }
    }
}

/// One row of the neighborhood fact table. Supplied externally and never
/// mutated by the generator.
///
/// Every field may be absent from the file. Absent values are reported as a
/// failure of that record alone, never of the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// Raw county label; validated by the selector.
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub direction: String,
    /// NaN when absent.
    #[serde(default = "unset_distance")]
    pub distance_miles: f64,
    #[serde(default)]
    pub school_districts: Vec<String>,
    #[serde(default)]
    pub highways: Vec<String>,
    #[serde(default)]
    pub landmarks: Vec<String>,
    #[serde(default)]
    pub persona_tags: Vec<String>,
    #[serde(default)]
    pub anchor: Option<Anchor>,
}

fn unset_distance() -> f64 {
    f64::NAN
}

/// Whether `slug` is lowercase words joined by single hyphens, e.g.
/// "acre-tract" or "lake-travis-2".
pub fn is_valid_slug(slug: &str) -> bool {
    slug.split('-').all(|part| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    })
}

impl NeighborhoodInput {
    /// Returns the parsed county, if the raw label is known.
    pub fn known_county(&self) -> Option<County> {
        County::parse(&self.county)
    }
}
