use crate::record::KeywordRecord;
use serde::{Deserialize, Serialize};

/// Which keywords qualify at all: everything the model returned, or only
/// keywords that contain the search topic itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    ContainingTopic,
}

/// User-entered filter inputs, kept as raw text. Numeric fields are parsed
/// at evaluation time; anything unparseable simply deactivates that filter
/// so a half-typed bound can never hide the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub mode: FilterMode,
    pub min_volume: String,
    /// Upper competition bound; 100 (the default) is a no-op.
    pub max_competition: String,
    pub min_words: String,
    pub max_words: String,
    /// Comma-separated terms that must all appear in the keyword.
    pub include_terms: String,
    /// Comma-separated terms none of which may appear in the keyword.
    pub exclude_terms: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            mode: FilterMode::All,
            min_volume: String::new(),
            max_competition: "100".to_string(),
            min_words: String::new(),
            max_words: String::new(),
            include_terms: String::new(),
            exclude_terms: String::new(),
        }
    }
}

impl FilterCriteria {
    /// Parse the raw inputs once for a pipeline pass. The compiled form is
    /// what gets evaluated per record, so typing in a filter field costs one
    /// parse per recompute rather than one per record.
    pub fn compile(&self, topic: &str) -> ActiveFilters {
        let topic = match self.mode {
            FilterMode::ContainingTopic if !topic.is_empty() => Some(topic.to_lowercase()),
            _ => None,
        };

        // Bounds that must be positive to mean anything deactivate at zero;
        // the competition cap deactivates at its 100 default.
        let min_volume = parse_number::<u64>(&self.min_volume).filter(|v| *v > 0);
        let max_competition = parse_number::<i64>(&self.max_competition).filter(|c| *c < 100);
        let min_words = parse_number::<usize>(&self.min_words).filter(|n| *n > 0);
        let max_words = parse_number::<usize>(&self.max_words).filter(|n| *n > 0);

        ActiveFilters {
            topic,
            min_volume,
            max_competition,
            min_words,
            max_words,
            include: parse_terms(&self.include_terms),
            exclude: parse_terms(&self.exclude_terms),
        }
    }
}

/// A compiled, ready-to-evaluate snapshot of [`FilterCriteria`]. Inactive
/// criteria are `None`/empty and skip their check entirely.
#[derive(Debug, Clone)]
pub struct ActiveFilters {
    topic: Option<String>,
    min_volume: Option<u64>,
    max_competition: Option<i64>,
    min_words: Option<usize>,
    max_words: Option<usize>,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl ActiveFilters {
    /// Logical AND over every active criterion.
    pub fn matches(&self, record: &KeywordRecord) -> bool {
        let keyword = record.keyword.to_lowercase();

        if let Some(topic) = &self.topic {
            if !keyword.contains(topic.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_volume {
            if record.search_volume < min {
                return false;
            }
        }
        if let Some(max) = self.max_competition {
            if i64::from(record.competition) > max {
                return false;
            }
        }
        if self.min_words.is_some() || self.max_words.is_some() {
            let words = word_count(&record.keyword);
            if let Some(min) = self.min_words {
                if words < min {
                    return false;
                }
            }
            if let Some(max) = self.max_words {
                if words > max {
                    return false;
                }
            }
        }
        if !self.include.iter().all(|t| keyword.contains(t.as_str())) {
            return false;
        }
        if self.exclude.iter().any(|t| keyword.contains(t.as_str())) {
            return false;
        }

        true
    }
}

/// Whitespace-delimited token count, empty tokens dropped.
pub fn word_count(keyword: &str) -> usize {
    keyword.split_whitespace().count()
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

fn parse_terms(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<KeywordRecord> {
        vec![
            KeywordRecord::new("cooking for beginners", 5000, 20),
            KeywordRecord::new("easy cooking tips", 12000, 45),
            KeywordRecord::new("cooking 2020", 100, 80),
            KeywordRecord::new("sourdough", 900, 60),
        ]
    }

    fn count(criteria: &FilterCriteria, topic: &str) -> usize {
        let active = criteria.compile(topic);
        sample().iter().filter(|r| active.matches(r)).count()
    }

    #[test]
    fn default_criteria_match_everything() {
        assert_eq!(count(&FilterCriteria::default(), "cooking"), 4);
    }

    #[test]
    fn containing_topic_mode_is_case_insensitive() {
        let criteria = FilterCriteria {
            mode: FilterMode::ContainingTopic,
            ..Default::default()
        };
        assert_eq!(count(&criteria, "COOKING"), 3);
        // Without an active topic the mode is inert.
        assert_eq!(count(&criteria, ""), 4);
    }

    #[test]
    fn min_volume_bound() {
        let criteria = FilterCriteria {
            min_volume: "1000".to_string(),
            ..Default::default()
        };
        assert_eq!(count(&criteria, ""), 2);
    }

    #[test]
    fn max_competition_at_100_is_inactive() {
        let criteria = FilterCriteria::default();
        assert!(criteria.compile("").matches(&KeywordRecord::new("x", 1, 100)));

        let criteria = FilterCriteria {
            max_competition: "50".to_string(),
            ..Default::default()
        };
        assert_eq!(count(&criteria, ""), 2);
    }

    #[test]
    fn word_count_bounds_apply_independently() {
        let criteria = FilterCriteria {
            min_words: "2".to_string(),
            ..Default::default()
        };
        assert_eq!(count(&criteria, ""), 3);

        let criteria = FilterCriteria {
            max_words: "1".to_string(),
            ..Default::default()
        };
        assert_eq!(count(&criteria, ""), 1);

        let criteria = FilterCriteria {
            min_words: "2".to_string(),
            max_words: "2".to_string(),
            ..Default::default()
        };
        assert_eq!(count(&criteria, ""), 1);
    }

    #[test]
    fn include_terms_all_required() {
        let criteria = FilterCriteria {
            include_terms: "cooking, tips".to_string(),
            ..Default::default()
        };
        assert_eq!(count(&criteria, ""), 1);
    }

    #[test]
    fn exclude_terms_reject_any_match() {
        let criteria = FilterCriteria {
            exclude_terms: "2020".to_string(),
            ..Default::default()
        };
        assert_eq!(count(&criteria, ""), 3);
    }

    #[test]
    fn empty_terms_between_commas_are_dropped() {
        let criteria = FilterCriteria {
            exclude_terms: " , 2020 ,, ".to_string(),
            ..Default::default()
        };
        assert_eq!(count(&criteria, ""), 3);
    }

    #[test]
    fn unparseable_bounds_are_inactive_not_rejections() {
        let criteria = FilterCriteria {
            min_volume: "lots".to_string(),
            max_competition: "abc".to_string(),
            min_words: "0".to_string(),
            max_words: "-3".to_string(),
            ..Default::default()
        };
        assert_eq!(count(&criteria, ""), 4);
    }

    #[test]
    fn adding_a_criterion_never_increases_the_count() {
        let base = FilterCriteria::default();
        let baseline = count(&base, "cooking");

        let narrowed = [
            FilterCriteria {
                mode: FilterMode::ContainingTopic,
                ..base.clone()
            },
            FilterCriteria {
                min_volume: "500".to_string(),
                ..base.clone()
            },
            FilterCriteria {
                max_competition: "60".to_string(),
                ..base.clone()
            },
            FilterCriteria {
                min_words: "2".to_string(),
                ..base.clone()
            },
            FilterCriteria {
                include_terms: "cooking".to_string(),
                ..base.clone()
            },
            FilterCriteria {
                exclude_terms: "tips".to_string(),
                ..base.clone()
            },
        ];
        for criteria in narrowed {
            assert!(count(&criteria, "cooking") <= baseline);
        }
    }
}
