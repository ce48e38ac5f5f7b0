use serde::{Deserialize, Serialize};

// ── Language tracks ──────────────────────────────────────────────

/// Audio/subtitle track identifiers, as the server spells them.
///
/// The set is closed: an unknown value in a payload is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lang {
    GerDub,
    GerSub,
    EngDub,
    EngSub,
    GerSubK,
    EngSubK,
}

impl Lang {
    /// Wire spelling, used verbatim in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GerDub => "GerDub",
            Self::GerSub => "GerSub",
            Self::EngDub => "EngDub",
            Self::EngSub => "EngSub",
            Self::GerSubK => "GerSubK",
            Self::EngSubK => "EngSubK",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Catalog types ────────────────────────────────────────────────

/// One series in the catalog.
///
/// The index endpoint returns summary records; `seasons`, `movies` and
/// `infos` stay at their defaults until the detail endpoint hydrates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub categorie: String,
    pub title: String,
    /// Season-grouped episodes: `seasons[s-1][e-1]`, both 1-based outside.
    #[serde(default)]
    pub seasons: Vec<Vec<Episode>>,
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub infos: SeriesInfos,
}

/// Free-form descriptive metadata on a series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesInfos {
    #[serde(default)]
    pub infos: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub primary_name: String,
    #[serde(default)]
    pub secondary_name: String,
    pub season: u32,
    pub episode: u32,
    pub langs: Vec<Lang>,
    #[serde(rename = "subID", default)]
    pub sub_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub primary_name: String,
    #[serde(default)]
    pub secondary_name: String,
    pub langs: Vec<Lang>,
    #[serde(rename = "subID", default)]
    pub sub_id: String,
}

/// Detail-endpoint payload: a partial [`Series`].
///
/// Every field is optional so a merge can overwrite exactly what the server
/// sent and nothing else.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesDetail {
    pub categorie: Option<String>,
    pub title: Option<String>,
    pub seasons: Option<Vec<Vec<Episode>>>,
    pub movies: Option<Vec<Movie>>,
    pub infos: Option<SeriesInfos>,
}

// ── Watch progress ───────────────────────────────────────────────

/// One server-held watch record for a (series, entity) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchItem {
    #[serde(rename = "ID")]
    pub id: String,
    pub season: i32,
    pub episode: i32,
    #[serde(default = "no_movie")]
    pub movie: i32,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub watched: bool,
}

fn no_movie() -> i32 {
    -1
}

// ── Auth types ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Profile snapshot returned by `/auth/info`.
///
/// `settings` and `activity_details` are opaque blobs the server manages;
/// the client stores and displays them without interpretation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthInfo {
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: u32,
    #[serde(default)]
    pub settings: String,
    #[serde(rename = "activityDetails", default)]
    pub activity_details: String,
}
