use serde::{Deserialize, Serialize};

/// One generated neighborhood page record, in the shape the website reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityContent {
    pub slug: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub best_for: Vec<String>,
    pub nearby_landmarks: Vec<String>,
}
