use cinefinn_api::types::{Series, SeriesDetail};

/// In-memory series catalog.
///
/// The list fetch replaces the whole cache; detail fetches merge into the
/// matching record in place, so list identity and order survive hydration.
#[derive(Debug, Default)]
pub struct CatalogCache {
    series: Vec<Series>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Series] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Replace the cache wholesale with a fresh index fetch.
    pub fn replace_all(&mut self, series: Vec<Series>) {
        self.series = series;
    }

    /// Merge detail fields into the series with the given ID.
    ///
    /// Field-wise: only fields present in the detail payload overwrite, so a
    /// partial response can never blank out previously hydrated data. All
    /// other series are untouched. Returns `false` when the ID is not in the
    /// cache (the payload is dropped).
    pub fn apply_detail(&mut self, id: &str, detail: SeriesDetail) -> bool {
        let Some(series) = self.series.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if let Some(categorie) = detail.categorie {
            series.categorie = categorie;
        }
        if let Some(title) = detail.title {
            series.title = title;
        }
        if let Some(seasons) = detail.seasons {
            series.seasons = seasons;
        }
        if let Some(movies) = detail.movies {
            series.movies = movies;
        }
        if let Some(infos) = detail.infos {
            series.infos = infos;
        }
        true
    }

    /// Pure lookup by ID, no network.
    pub fn find(&self, id: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.id == id)
    }

    /// Case-insensitive title substring search.
    pub fn search(&self, query: &str) -> Vec<&Series> {
        let needle = query.to_lowercase();
        self.series
            .iter()
            .filter(|s| s.title.to_lowercase().contains(&needle))
            .collect()
    }
}
