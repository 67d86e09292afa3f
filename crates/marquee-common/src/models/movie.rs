use serde::{Deserialize, Serialize};

/// Legacy ranking value marking the "unranked" placeholder category.
pub const UNRANKED_VALUE: i32 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub genre_id: i32,
    pub genre_name: String,
}

/// Sentiment category a review can be classified into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub ranking_name: String,
    pub ranking_value: i32,
    /// Excluded from classifier prompts
    #[serde(default)]
    pub unranked: bool,
}

impl Ranking {
    /// Build a ranking, flagging the legacy sentinel value as unranked.
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            ranking_name: name.into(),
            ranking_value: value,
            unranked: value == UNRANKED_VALUE,
        }
    }
}

/// The ranking assigned to a movie by review classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRanking {
    pub ranking_name: String,
    pub ranking_value: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub imdb_id: String,
    pub title: String,
    pub poster_path: String,
    pub youtube_id: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_review: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<MovieRanking>,
}
