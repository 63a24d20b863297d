use crate::filter::FilterCriteria;
use crate::record::KeywordRecord;
use crate::sort::SortSpec;

pub const PAGE_SIZE: usize = 20;

/// One derived page of results plus the totals the surrounding controls
/// need. Pure data; recomputed from scratch on every input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPage {
    /// The visible slice, at most [`PAGE_SIZE`] records.
    pub rows: Vec<KeywordRecord>,
    pub total_filtered: usize,
    /// `ceil(total_filtered / PAGE_SIZE)`; 0 when nothing matches.
    pub total_pages: usize,
    pub current_page: usize,
}

/// The full filtered-and-sorted set: a single order-preserving filter pass,
/// then a stable sort. This is also what export serializes.
pub fn process(
    records: &[KeywordRecord],
    criteria: &FilterCriteria,
    topic: &str,
    sort: &SortSpec,
) -> Vec<KeywordRecord> {
    let active = criteria.compile(topic);
    let mut filtered: Vec<KeywordRecord> = records
        .iter()
        .filter(|record| active.matches(record))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| sort.compare(a, b));
    filtered
}

/// Derive the visible page. Pure and total: identical inputs always produce
/// identical output.
pub fn derive(
    records: &[KeywordRecord],
    criteria: &FilterCriteria,
    topic: &str,
    sort: &SortSpec,
    current_page: usize,
) -> ResultsPage {
    paginate(process(records, criteria, topic, sort), current_page)
}

/// Slice one 1-based page out of an already processed set. A page past the
/// end yields no rows; the page index itself is not clamped here, page
/// navigation is where clamping happens.
pub fn paginate(processed: Vec<KeywordRecord>, current_page: usize) -> ResultsPage {
    let total_filtered = processed.len();
    let total_pages = total_filtered.div_ceil(PAGE_SIZE);
    let start = PAGE_SIZE * current_page.saturating_sub(1);
    let end = (start + PAGE_SIZE).min(total_filtered);
    let rows = if start < total_filtered {
        processed[start..end].to_vec()
    } else {
        Vec::new()
    };

    ResultsPage {
        rows,
        total_filtered,
        total_pages,
        current_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterMode;

    fn cooking_records() -> Vec<KeywordRecord> {
        vec![
            KeywordRecord::new("cooking for beginners", 5000, 20),
            KeywordRecord::new("easy cooking tips", 12000, 45),
            KeywordRecord::new("cooking 2020", 100, 80),
        ]
    }

    fn many_records(n: usize) -> Vec<KeywordRecord> {
        (0..n)
            .map(|i| KeywordRecord::new(format!("keyword {i:04}"), (i as u64) * 7 % 5000, 50))
            .collect()
    }

    #[test]
    fn default_sort_orders_by_volume_descending() {
        let page = derive(
            &cooking_records(),
            &FilterCriteria::default(),
            "cooking",
            &SortSpec::default(),
            1,
        );
        let names: Vec<_> = page.rows.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(
            names,
            vec!["easy cooking tips", "cooking for beginners", "cooking 2020"]
        );
        assert_eq!(page.total_filtered, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn exclude_filter_drops_matching_records() {
        let criteria = FilterCriteria {
            exclude_terms: "2020".to_string(),
            ..Default::default()
        };
        let page = derive(
            &cooking_records(),
            &criteria,
            "cooking",
            &SortSpec::default(),
            1,
        );
        assert_eq!(page.total_filtered, 2);
        assert!(page.rows.iter().all(|r| !r.keyword.contains("2020")));
    }

    #[test]
    fn derive_is_idempotent() {
        let records = many_records(137);
        let criteria = FilterCriteria {
            mode: FilterMode::All,
            min_volume: "50".to_string(),
            ..Default::default()
        };
        let sort = SortSpec::default();

        let first = derive(&records, &criteria, "keyword", &sort, 3);
        let second = derive(&records, &criteria, "keyword", &sort, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn pages_concatenate_to_the_full_processed_set() {
        let records = many_records(137);
        let criteria = FilterCriteria::default();
        let sort = SortSpec::default();

        let processed = process(&records, &criteria, "", &sort);
        let total_pages = derive(&records, &criteria, "", &sort, 1).total_pages;
        assert_eq!(total_pages, 7);

        let mut concatenated = Vec::new();
        for page in 1..=total_pages {
            concatenated.extend(derive(&records, &criteria, "", &sort, page).rows);
        }
        assert_eq!(concatenated, processed);
    }

    #[test]
    fn total_pages_is_a_ceiling_and_zero_when_empty() {
        assert_eq!(paginate(many_records(0), 1).total_pages, 0);
        assert_eq!(paginate(many_records(1), 1).total_pages, 1);
        assert_eq!(paginate(many_records(20), 1).total_pages, 1);
        assert_eq!(paginate(many_records(21), 1).total_pages, 2);
        assert_eq!(paginate(many_records(40), 1).total_pages, 2);
    }

    #[test]
    fn page_past_the_end_has_no_rows_but_keeps_totals() {
        let page = paginate(many_records(25), 9);
        assert!(page.rows.is_empty());
        assert_eq!(page.total_filtered, 25);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 9);
    }

    #[test]
    fn filter_pass_preserves_fetched_order_before_sorting() {
        // With an inert sort (all keys equal) the stable sort leaves the
        // filter pass order, which is the fetched order.
        let records = vec![
            KeywordRecord::new("b", 100, 50),
            KeywordRecord::new("a", 100, 50),
            KeywordRecord::new("c", 100, 50),
        ];
        let processed = process(&records, &FilterCriteria::default(), "", &SortSpec::default());
        let names: Vec<_> = processed.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
