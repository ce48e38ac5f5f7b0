use cinefinn_api::types::{AuthInfo, Lang};
use cinefinn_api::CinemaClient;
use tracing::{debug, info, warn};

use crate::catalog::CatalogCache;
use crate::config::AppConfig;
use crate::error::CoreError;
use crate::locator::{build_locator, Locator};
use crate::selection::{Entity, Selection};
use crate::store::TokenStore;
use crate::watch::WatchLog;

/// Shared network status, overwritten by each operation.
///
/// Failures land here instead of propagating; callers poll rather than
/// handle errors, and only the most recent operation's outcome is visible.
#[derive(Debug, Clone, Default)]
pub struct Status {
    pub loading: bool,
    pub error: Option<String>,
}

impl Status {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, err: impl std::fmt::Display) {
        self.error = Some(err.to_string());
    }

    fn finish(&mut self) {
        self.loading = false;
    }
}

/// One user's playback session: auth lifecycle, catalog, watch records and
/// the current selection, behind a single explicitly-owned object.
///
/// All operations run to completion once started; an op that overlaps a
/// second call to itself races last-write-wins. Callers should re-derive
/// addressed-entity state after any await instead of holding references
/// across it.
pub struct PlaybackSession {
    client: CinemaClient,
    tokens: TokenStore,
    auth_token: String,
    auth_info: Option<AuthInfo>,
    api_url: String,

    pub catalog: CatalogCache,
    pub watch: WatchLog,
    pub selection: Selection,
    pub status: Status,
}

impl PlaybackSession {
    /// Session backed by the on-disk token store.
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let tokens = TokenStore::open(&AppConfig::ensure_db_path()?)?;
        Self::with_store(config, tokens)
    }

    /// Session backed by an in-memory token store (tests, throwaway use).
    pub fn ephemeral(config: &AppConfig) -> Result<Self, CoreError> {
        Self::with_store(config, TokenStore::open_memory()?)
    }

    fn with_store(config: &AppConfig, tokens: TokenStore) -> Result<Self, CoreError> {
        Ok(Self {
            client: CinemaClient::new(&config.server.api_url)?,
            tokens,
            auth_token: String::new(),
            auth_info: None,
            api_url: config.server.api_url.trim_end_matches('/').to_string(),
            catalog: CatalogCache::new(),
            watch: WatchLog::new(),
            selection: Selection::new(config.playback.default_language),
            status: Status::default(),
        })
    }

    // ── Auth lifecycle ──────────────────────────────────────────

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn auth_info(&self) -> Option<&AuthInfo> {
        self.auth_info.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.auth_token.is_empty()
    }

    /// Exchange credentials for a token, keeping it in memory and in the
    /// durable store. A failure leaves the prior token untouched.
    pub async fn login(&mut self, username: &str, password: &str) {
        self.status.begin();
        match self.client.login(username, password).await {
            Ok(token) => {
                if let Err(e) = self.tokens.save_token(&token) {
                    warn!(error = %e, "Failed to persist auth token");
                    self.status.fail(&e);
                }
                self.auth_token = token;
                info!("Logged in");
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.status.fail(&e);
            }
        }
        self.status.finish();
    }

    /// Restore a persisted token (if any) into memory, then fetch the
    /// profile with whatever token is now held, possibly none. A rejected
    /// fetch is recorded, never fatal: the session just stays
    /// unauthenticated.
    pub async fn restore_and_authenticate(&mut self) {
        self.status.begin();
        match self.tokens.token() {
            Ok(Some(token)) => {
                debug!("Restored persisted auth token");
                self.auth_token = token;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Token store read failed");
                self.status.fail(&e);
            }
        }

        match self.client.auth_info(&self.auth_token).await {
            Ok(info) => {
                info!(username = %info.username, "Authenticated");
                self.auth_info = Some(info);
            }
            Err(e) => {
                debug!(error = %e, "Profile fetch failed");
                self.status.fail(&e);
            }
        }
        self.status.finish();
    }

    /// Clear the in-memory session and delete the persisted token.
    /// Idempotent.
    pub fn logout(&mut self) {
        self.auth_token.clear();
        self.auth_info = None;
        if let Err(e) = self.tokens.clear_token() {
            warn!(error = %e, "Failed to delete persisted auth token");
            self.status.fail(&e);
        }
    }

    // ── Catalog and watch sync ──────────────────────────────────

    /// Fetch the series index and replace the cache wholesale. On failure
    /// the cache keeps its last-known-good contents.
    pub async fn refresh_list(&mut self) {
        self.status.begin();
        match self.client.series_index(&self.auth_token).await {
            Ok(series) => {
                info!(count = series.len(), "Refreshed series index");
                self.catalog.replace_all(series);
            }
            Err(e) => {
                warn!(error = %e, "Series index fetch failed");
                self.status.fail(&e);
            }
        }
        self.status.finish();
    }

    /// Fetch detail for one series and merge it into the cache.
    pub async fn hydrate(&mut self, id: &str) {
        self.status.begin();
        match self.client.series_detail(id, &self.auth_token).await {
            Ok(detail) => {
                if self.catalog.apply_detail(id, detail) {
                    debug!(series = %id, "Hydrated series detail");
                    // The addressed entity may just have become resolvable;
                    // settle the language now.
                    self.selection.refresh_language(&self.catalog);
                } else {
                    debug!(series = %id, "Detail for unknown series dropped");
                }
            }
            Err(e) => {
                warn!(series = %id, error = %e, "Series detail fetch failed");
                self.status.fail(&e);
            }
        }
        self.status.finish();
    }

    /// Fetch all watch records for one series, replacing the local set.
    pub async fn refresh_watch(&mut self, series_id: &str) {
        self.status.begin();
        match self.client.watch_info(series_id, &self.auth_token).await {
            Ok(items) => {
                debug!(series = %series_id, count = items.len(), "Refreshed watch records");
                self.watch.replace(series_id, items);
            }
            Err(e) => {
                warn!(series = %series_id, error = %e, "Watch list fetch failed");
                self.status.fail(&e);
            }
        }
        self.status.finish();
    }

    // ── Selection ───────────────────────────────────────────────

    pub fn select_series(&mut self, id: impl Into<String>) {
        self.selection.select_series(id);
    }

    pub fn select_movie(&mut self, index: u32) {
        self.selection.select_movie(index, &self.catalog);
    }

    pub fn select_season(&mut self, season: u32) {
        self.selection.select_season(season, &self.catalog);
    }

    pub fn select_episode(&mut self, episode: u32) {
        self.selection.select_episode(episode, &self.catalog);
    }

    pub fn select_language(&mut self, lang: Lang) {
        self.selection.select_language(lang, &self.catalog);
    }

    /// The currently addressed entity, or `None` while the catalog has not
    /// caught up with the selection.
    pub fn addressed_entity(&self) -> Option<Entity<'_>> {
        self.selection.resolve_entity(&self.catalog)
    }

    /// Playback locator for the current selection, once the series is known.
    pub fn current_locator(&self) -> Option<Locator> {
        let series = self.catalog.find(self.selection.series_id()?)?;
        Some(build_locator(
            series,
            self.selection.target(),
            self.selection.language(),
            &self.auth_token,
            &self.api_url,
        ))
    }
}
