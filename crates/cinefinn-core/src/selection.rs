use cinefinn_api::types::{Episode, Lang, Movie, Series};

use crate::catalog::CatalogCache;

/// The addressed entity within a series: a movie position or a
/// season/episode pair, never both. Indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Movie(u32),
    Episode { season: u32, episode: u32 },
}

/// A resolved addressed entity, borrowed from the catalog.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Movie(&'a Movie),
    Episode(&'a Episode),
}

impl<'a> Entity<'a> {
    pub fn langs(&self) -> &'a [Lang] {
        match self {
            Entity::Movie(m) => &m.langs,
            Entity::Episode(e) => &e.langs,
        }
    }
}

/// Current playback selection: series, addressed entity, language track.
///
/// Transitions are synchronous and total. Each one re-runs language
/// resolution, so whenever the addressed entity is resolvable the active
/// language is guaranteed to be one the entity actually offers.
#[derive(Debug, Clone)]
pub struct Selection {
    series_id: Option<String>,
    target: Target,
    language: Lang,
}

impl Selection {
    pub fn new(default_language: Lang) -> Self {
        Self {
            series_id: None,
            target: Target::Episode {
                season: 1,
                episode: 1,
            },
            language: default_language,
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn series_id(&self) -> Option<&str> {
        self.series_id.as_deref()
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn language(&self) -> Lang {
        self.language
    }

    /// 1-based movie position, `None` while episode-addressed.
    pub fn movie_index(&self) -> Option<u32> {
        match self.target {
            Target::Movie(index) => Some(index),
            Target::Episode { .. } => None,
        }
    }

    /// 1-based (season, episode) pair, `None` while movie-addressed.
    pub fn season_episode(&self) -> Option<(u32, u32)> {
        match self.target {
            Target::Movie(_) => None,
            Target::Episode { season, episode } => Some((season, episode)),
        }
    }

    // ── Transitions ─────────────────────────────────────────────

    /// Switch series. Entity and language are left for the caller's next
    /// `select_movie`/`select_season` to settle.
    pub fn select_series(&mut self, id: impl Into<String>) {
        self.series_id = Some(id.into());
    }

    pub fn select_movie(&mut self, index: u32, catalog: &CatalogCache) {
        self.target = Target::Movie(index);
        self.resolve_language(catalog);
    }

    /// A season switch always lands on episode 1.
    pub fn select_season(&mut self, season: u32, catalog: &CatalogCache) {
        self.target = Target::Episode { season, episode: 1 };
        self.resolve_language(catalog);
    }

    /// Move within the current season. A movie target keeps precedence and
    /// is left in place.
    pub fn select_episode(&mut self, episode: u32, catalog: &CatalogCache) {
        if let Target::Episode { season, .. } = self.target {
            self.target = Target::Episode { season, episode };
        }
        self.resolve_language(catalog);
    }

    /// User intent is always honored; resolution corrects it right away if
    /// the addressed entity does not offer the track.
    pub fn select_language(&mut self, lang: Lang, catalog: &CatalogCache) {
        self.language = lang;
        self.resolve_language(catalog);
    }

    // ── Resolution ──────────────────────────────────────────────

    /// Resolve the addressed entity against the catalog.
    ///
    /// `None` when the series is unknown or the index is out of the current
    /// bounds. Expected between a navigation event and catalog hydration,
    /// to be rendered as a loading state.
    pub fn resolve_entity<'a>(&self, catalog: &'a CatalogCache) -> Option<Entity<'a>> {
        let series = catalog.find(self.series_id.as_deref()?)?;
        self.resolve_in(series)
    }

    /// Resolve against an already-looked-up series.
    pub fn resolve_in<'a>(&self, series: &'a Series) -> Option<Entity<'a>> {
        match self.target {
            Target::Movie(index) => series.movies.get(ordinal(index)?).map(Entity::Movie),
            Target::Episode { season, episode } => series
                .seasons
                .get(ordinal(season)?)?
                .get(ordinal(episode)?)
                .map(Entity::Episode),
        }
    }

    /// Re-run language resolution without changing the target. Called after
    /// hydration, when a previously unresolvable entity may have appeared.
    pub fn refresh_language(&mut self, catalog: &CatalogCache) {
        self.resolve_language(catalog);
    }

    fn resolve_language(&mut self, catalog: &CatalogCache) {
        // Unresolvable entity: keep the language, re-check on hydration.
        let Some(entity) = self.resolve_entity(catalog) else {
            return;
        };
        if !entity.langs().contains(&self.language) {
            if let Some(&first) = entity.langs().first() {
                self.language = first;
            }
        }
    }
}

/// 1-based index to vec position.
fn ordinal(n: u32) -> Option<usize> {
    n.checked_sub(1).map(|i| i as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinefinn_api::types::SeriesInfos;

    fn episode(season: u32, episode: u32, langs: Vec<Lang>) -> Episode {
        Episode {
            file_path: format!("/files/s{season}e{episode}.mp4"),
            primary_name: format!("Episode {episode}"),
            secondary_name: String::new(),
            season,
            episode,
            langs,
            sub_id: String::new(),
        }
    }

    fn movie(name: &str, langs: Vec<Lang>) -> Movie {
        Movie {
            file_path: format!("/files/{name}.mp4"),
            primary_name: name.into(),
            secondary_name: String::new(),
            langs,
            sub_id: String::new(),
        }
    }

    fn series(id: &str, seasons: Vec<Vec<Episode>>, movies: Vec<Movie>) -> Series {
        Series {
            id: id.into(),
            categorie: "Aniworld".into(),
            title: "Frieren".into(),
            seasons,
            movies,
            infos: SeriesInfos::default(),
        }
    }

    fn catalog_with(series_list: Vec<Series>) -> CatalogCache {
        let mut catalog = CatalogCache::new();
        catalog.replace_all(series_list);
        catalog
    }

    #[test]
    fn test_movie_only_series_routes_through_movies() {
        let catalog = catalog_with(vec![series(
            "x",
            vec![],
            vec![movie("Film", vec![Lang::GerDub])],
        )]);
        let mut sel = Selection::new(Lang::GerDub);
        sel.select_series("x");
        sel.select_movie(1, &catalog);

        assert!(matches!(
            sel.resolve_entity(&catalog),
            Some(Entity::Movie(_))
        ));
        assert_eq!(sel.movie_index(), Some(1));
        assert_eq!(sel.season_episode(), None);

        // No seasons exist: episode addressing can never resolve here, and
        // a movie target keeps precedence over a stray episode pick.
        sel.select_episode(3, &catalog);
        assert!(matches!(
            sel.resolve_entity(&catalog),
            Some(Entity::Movie(_))
        ));
    }

    #[test]
    fn test_season_after_movie_is_strictly_episode_addressed() {
        let catalog = catalog_with(vec![series(
            "x",
            vec![vec![
                episode(1, 1, vec![Lang::GerDub]),
                episode(1, 2, vec![Lang::GerDub]),
            ]],
            vec![movie("Film", vec![Lang::GerDub])],
        )]);
        let mut sel = Selection::new(Lang::GerDub);
        sel.select_series("x");
        sel.select_movie(1, &catalog);
        sel.select_season(1, &catalog);

        assert_eq!(sel.movie_index(), None);
        assert_eq!(sel.season_episode(), Some((1, 1)));
        match sel.resolve_entity(&catalog) {
            Some(Entity::Episode(ep)) => assert_eq!(ep.episode, 1),
            other => panic!("Expected episode 1, got {other:?}"),
        }
    }

    #[test]
    fn test_language_falls_back_to_first_declared() {
        let catalog = catalog_with(vec![series(
            "x",
            vec![vec![
                episode(1, 1, vec![Lang::GerDub]),
                episode(1, 2, vec![Lang::EngDub, Lang::EngSub]),
            ]],
            vec![],
        )]);
        let mut sel = Selection::new(Lang::GerDub);
        sel.select_series("x");
        sel.select_season(1, &catalog);
        assert_eq!(sel.language(), Lang::GerDub);

        // Episode 2 has no GerDub: landing on it falls back to its first track.
        sel.select_episode(2, &catalog);
        assert_eq!(sel.language(), Lang::EngDub);
    }

    #[test]
    fn test_language_retained_when_still_valid() {
        let catalog = catalog_with(vec![series(
            "x",
            vec![vec![
                episode(1, 1, vec![Lang::EngSub, Lang::GerDub]),
                episode(1, 2, vec![Lang::EngDub, Lang::EngSub]),
            ]],
            vec![],
        )]);
        let mut sel = Selection::new(Lang::EngSub);
        sel.select_series("x");
        sel.select_season(1, &catalog);
        sel.select_episode(2, &catalog);

        assert_eq!(sel.language(), Lang::EngSub);
    }

    #[test]
    fn test_invalid_language_choice_is_corrected_immediately() {
        let catalog = catalog_with(vec![series(
            "x",
            vec![vec![episode(1, 1, vec![Lang::EngDub, Lang::EngSub])]],
            vec![],
        )]);
        let mut sel = Selection::new(Lang::EngSub);
        sel.select_series("x");
        sel.select_season(1, &catalog);

        sel.select_language(Lang::GerDub, &catalog);
        assert_eq!(sel.language(), Lang::EngDub);
    }

    #[test]
    fn test_language_kept_while_entity_unresolvable() {
        // Summary-level catalog: no seasons hydrated yet.
        let catalog = catalog_with(vec![series("x", vec![], vec![])]);
        let mut sel = Selection::new(Lang::GerDub);
        sel.select_series("x");
        sel.select_season(2, &catalog);
        sel.select_language(Lang::EngSubK, &catalog);

        // Nothing to resolve against: the choice stands until hydration.
        assert!(sel.resolve_entity(&catalog).is_none());
        assert_eq!(sel.language(), Lang::EngSubK);
    }

    #[test]
    fn test_fallback_runs_once_entity_hydrates() {
        let mut catalog = catalog_with(vec![series("x", vec![], vec![])]);
        let mut sel = Selection::new(Lang::GerDub);
        sel.select_series("x");
        sel.select_season(1, &catalog);
        sel.select_language(Lang::GerSubK, &catalog);

        catalog.replace_all(vec![series(
            "x",
            vec![vec![episode(1, 1, vec![Lang::EngDub])]],
            vec![],
        )]);
        sel.refresh_language(&catalog);
        assert_eq!(sel.language(), Lang::EngDub);
    }

    #[test]
    fn test_out_of_bounds_resolution_is_a_miss_not_a_panic() {
        let catalog = catalog_with(vec![series(
            "x",
            vec![vec![episode(1, 1, vec![Lang::GerDub])]],
            vec![movie("Film", vec![Lang::GerDub])],
        )]);
        let mut sel = Selection::new(Lang::GerDub);
        sel.select_series("x");

        sel.select_movie(5, &catalog);
        assert!(sel.resolve_entity(&catalog).is_none());

        sel.select_season(9, &catalog);
        assert!(sel.resolve_entity(&catalog).is_none());

        // Unknown series is a miss too.
        sel.select_series("zzz");
        sel.select_season(1, &catalog);
        assert!(sel.resolve_entity(&catalog).is_none());
    }

    #[test]
    fn test_zero_index_never_resolves() {
        let catalog = catalog_with(vec![series(
            "x",
            vec![vec![episode(1, 1, vec![Lang::GerDub])]],
            vec![movie("Film", vec![Lang::GerDub])],
        )]);
        let mut sel = Selection::new(Lang::GerDub);
        sel.select_series("x");
        sel.select_movie(0, &catalog);
        assert!(sel.resolve_entity(&catalog).is_none());
    }
}
