use crate::record::KeywordRecord;

/// The last-fetched result set plus the loading/error flags the surface
/// reads. Replaced wholesale on every fetch; there is deliberately no
/// sequencing guard, whichever commit lands last wins.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    /// Topic the records were generated for.
    pub topic: String,
    /// Country the records were generated for.
    pub country: String,
    /// Records in the order the model returned them. That order is the
    /// tie-break baseline for every later sort.
    pub records: Vec<KeywordRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ResultStore {
    /// Start a fetch: prior records and errors are cleared before the
    /// request goes out, so stale rows are never visible while loading.
    pub fn begin_fetch(&mut self, topic: &str, country: &str) {
        self.topic = topic.to_string();
        self.country = country.to_string();
        self.records.clear();
        self.loading = true;
        self.error = None;
    }

    pub fn commit_success(&mut self, records: Vec<KeywordRecord>) {
        self.records = records;
        self.loading = false;
        self.error = None;
    }

    /// A failed fetch yields an empty set, never a partial one.
    pub fn commit_failure(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}
