use crate::filter::FilterCriteria;
use crate::gateway::{GenerationError, KeywordGateway};
use crate::pipeline::{self, ResultsPage};
use crate::record::{ContentIdeas, KeywordRecord};
use crate::sort::{SortField, SortSpec};
use crate::store::ResultStore;

pub const EMPTY_TOPIC_MESSAGE: &str = "Please enter a topic.";
const FALLBACK_FETCH_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// The one stateful controller of a research session: the fetched result
/// store, the active filter/sort/page inputs, and the gateway that feeds it.
/// Every user event maps to one method; the visible page is re-derived from
/// scratch after any of them.
pub struct Session<G> {
    gateway: G,
    store: ResultStore,
    country: String,
    criteria: FilterCriteria,
    sort: SortSpec,
    page: usize,
}

impl<G: KeywordGateway> Session<G> {
    pub fn new(gateway: G, country: impl Into<String>) -> Self {
        Session {
            gateway,
            store: ResultStore::default(),
            country: country.into(),
            criteria: FilterCriteria::default(),
            sort: SortSpec::default(),
            page: 1,
        }
    }

    pub fn topic(&self) -> &str {
        &self.store.topic
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn loading(&self) -> bool {
        self.store.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.store.error.as_deref()
    }

    /// Size of the raw fetched set, before any filtering.
    pub fn record_count(&self) -> usize {
        self.store.records.len()
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Filter edits mutate in place and deliberately do NOT reset the page;
    /// only a new search or a country refetch does.
    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    /// Submit a new search. A blank topic is a validation failure surfaced
    /// inline; no request is made.
    pub async fn submit(&mut self, topic: &str) {
        if topic.trim().is_empty() {
            self.store.error = Some(EMPTY_TOPIC_MESSAGE.to_string());
            return;
        }

        self.page = 1;
        self.store.begin_fetch(topic, &self.country);
        log::info!("fetching keywords for {topic:?} in {}", self.country);

        match self.gateway.generate_keywords(topic, &self.country).await {
            Ok(records) => {
                log::info!("received {} keyword records", records.len());
                self.store.commit_success(records);
            }
            Err(e) => self.store.commit_failure(fetch_message(e)),
        }
    }

    /// Country selector change. Re-fetches for the new country only when a
    /// topic is already active; otherwise the new value just becomes the
    /// baseline for the next comparison.
    pub async fn set_country(&mut self, country: &str) {
        if self.country == country {
            return;
        }
        self.country = country.to_string();

        if self.store.topic.is_empty() {
            log::debug!("country changed to {country} with no active topic, no refetch");
            return;
        }

        self.page = 1;
        let topic = self.store.topic.clone();
        self.store.begin_fetch(&topic, country);
        log::info!("country changed, refetching keywords for {topic:?} in {country}");

        match self.gateway.generate_keywords(&topic, country).await {
            Ok(records) => self.store.commit_success(records),
            Err(e) => {
                log::warn!("refetch for {country} failed: {e}");
                self.store
                    .commit_failure(format!("Failed to fetch keywords for {country}."));
            }
        }
    }

    /// Sort header click. Never resets the page.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.toggle(field);
        log::debug!("sorting by {:?} {:?}", self.sort.field, self.sort.direction);
    }

    /// Direct sort assignment for non-interactive callers. Never resets the
    /// page either.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Derive the currently visible page from the raw store and the active
    /// filter/sort/page inputs.
    pub fn view(&self) -> ResultsPage {
        pipeline::derive(
            &self.store.records,
            &self.criteria,
            &self.store.topic,
            &self.sort,
            self.page,
        )
    }

    /// The full filtered-and-sorted set; what CSV export serializes.
    pub fn processed(&self) -> Vec<KeywordRecord> {
        pipeline::process(
            &self.store.records,
            &self.criteria,
            &self.store.topic,
            &self.sort,
        )
    }

    /// Page navigation clamps against the current totals; a page left
    /// stranded past the end by a later filter edit stays where it is until
    /// the user navigates.
    pub fn next_page(&mut self) {
        if self.page < self.view().total_pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        let total = self.view().total_pages.max(1);
        self.page = page.clamp(1, total);
    }

    /// Content ideas for one keyword. Runs on its own error channel: the
    /// main result state is never touched, a failure here is returned to the
    /// caller and nothing else changes.
    pub async fn content_ideas(&self, keyword: &str) -> Result<ContentIdeas, GenerationError> {
        self.gateway
            .generate_content_ideas(keyword, &self.store.topic)
            .await
    }
}

fn fetch_message(error: GenerationError) -> String {
    if error.message.is_empty() {
        FALLBACK_FETCH_MESSAGE.to_string()
    } else {
        error.message
    }
}
