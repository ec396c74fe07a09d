use serde::{Deserialize, Serialize};

/// The closed set of prose templates a neighborhood can be written with.
///
/// Selection is a pure function of the input record; see
/// [`crate::core::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateKind {
    InTownWalkable,
    EstablishedSuburb,
    OuterRing,
    Exurban,
    LandmarkAnchored,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        TemplateKind::InTownWalkable,
        TemplateKind::EstablishedSuburb,
        TemplateKind::OuterRing,
        TemplateKind::Exurban,
        TemplateKind::LandmarkAnchored,
    ];

    /// Stable identifier, e.g. "established_suburb".
    pub fn id(&self) -> &'static str {
        match self {
            Self::InTownWalkable => "in_town_walkable",
            Self::EstablishedSuburb => "established_suburb",
            Self::OuterRing => "outer_ring",
            Self::Exurban => "exurban",
            Self::LandmarkAnchored => "landmark_anchored",
        }
    }
}
