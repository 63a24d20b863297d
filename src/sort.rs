use crate::record::KeywordRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Keyword,
    SearchVolume,
    Competition,
}

impl SortField {
    /// Lenient name lookup for CLI input.
    pub fn parse(name: &str) -> Option<SortField> {
        match name.trim().to_lowercase().as_str() {
            "keyword" => Some(SortField::Keyword),
            "volume" | "search_volume" | "searchvolume" => Some(SortField::SearchVolume),
            "competition" => Some(SortField::Competition),
            _ => None,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Keyword => write!(f, "keyword"),
            SortField::SearchVolume => write!(f, "search volume"),
            SortField::Competition => write!(f, "competition"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One selected column and direction. The comparator leaves equal keys
/// untouched, so applying it through a stable sort preserves the fetched
/// order among ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec {
            field: SortField::SearchVolume,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn compare(&self, a: &KeywordRecord, b: &KeywordRecord) -> Ordering {
        let ordering = match self.field {
            SortField::Keyword => a.keyword.cmp(&b.keyword),
            SortField::SearchVolume => a.search_volume.cmp(&b.search_volume),
            SortField::Competition => a.competition.cmp(&b.competition),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Header-click rule: re-selecting the active field while ascending flips
    /// to descending; any other selection starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        let direction = if self.field == field && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        *self = SortSpec { field, direction };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<KeywordRecord> {
        vec![
            KeywordRecord::new("cooking for beginners", 5000, 20),
            KeywordRecord::new("easy cooking tips", 12000, 45),
            KeywordRecord::new("cooking 2020", 100, 80),
        ]
    }

    fn sorted(spec: SortSpec) -> Vec<String> {
        let mut records = sample();
        records.sort_by(|a, b| spec.compare(a, b));
        records.into_iter().map(|r| r.keyword).collect()
    }

    #[test]
    fn ascending_reversed_equals_descending() {
        for field in [
            SortField::Keyword,
            SortField::SearchVolume,
            SortField::Competition,
        ] {
            let mut ascending = sorted(SortSpec {
                field,
                direction: SortDirection::Ascending,
            });
            let descending = sorted(SortSpec {
                field,
                direction: SortDirection::Descending,
            });
            ascending.reverse();
            assert_eq!(ascending, descending);
        }
    }

    #[test]
    fn keyword_sort_is_lexicographic() {
        let names = sorted(SortSpec {
            field: SortField::Keyword,
            direction: SortDirection::Ascending,
        });
        assert_eq!(
            names,
            vec!["cooking 2020", "cooking for beginners", "easy cooking tips"]
        );
    }

    #[test]
    fn equal_keys_keep_their_fetched_order() {
        let mut records = vec![
            KeywordRecord::new("first", 1000, 10),
            KeywordRecord::new("second", 1000, 20),
            KeywordRecord::new("third", 1000, 30),
        ];
        let spec = SortSpec {
            field: SortField::SearchVolume,
            direction: SortDirection::Descending,
        };
        records.sort_by(|a, b| spec.compare(a, b));
        let names: Vec<_> = records.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn toggle_cycles_the_active_field_and_resets_on_a_new_one() {
        let mut spec = SortSpec::default();

        // Default is volume descending; clicking volume starts ascending.
        spec.toggle(SortField::SearchVolume);
        assert_eq!(spec.direction, SortDirection::Ascending);
        spec.toggle(SortField::SearchVolume);
        assert_eq!(spec.direction, SortDirection::Descending);
        spec.toggle(SortField::SearchVolume);
        assert_eq!(spec.direction, SortDirection::Ascending);

        // A different field always starts ascending.
        spec.toggle(SortField::Competition);
        assert_eq!(spec.field, SortField::Competition);
        assert_eq!(spec.direction, SortDirection::Ascending);
    }

    #[test]
    fn parse_accepts_cli_spellings() {
        assert_eq!(SortField::parse("Volume"), Some(SortField::SearchVolume));
        assert_eq!(SortField::parse("keyword"), Some(SortField::Keyword));
        assert_eq!(SortField::parse("competition"), Some(SortField::Competition));
        assert_eq!(SortField::parse("difficulty"), None);
    }
}
