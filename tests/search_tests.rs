/// Unit tests for lead search validation and chat filter suggestions
/// Tests the allow-list, value handling, and the keyword rule table
use lead_search::chat::{suggest_filters, DEFAULT_RULES};
use lead_search::errors::AppError;
use lead_search::search::{Condition, LeadQuery, SEARCH_LIMIT};

#[cfg(test)]
mod allow_list_tests {
    use super::*;

    #[test]
    fn test_known_fields_accepted() {
        let fields = ["name", "username", "category", "location", "email", "followers", "state"];
        for field in fields {
            let query = LeadQuery::from_params([(field, "x")]).unwrap();
            assert_eq!(query.conditions().len(), 1, "field {}", field);
        }
    }

    #[test]
    fn test_unknown_fields_rejected() {
        for field in ["id", "password", "name OR 1=1", "leads.name", ""] {
            let result = LeadQuery::from_params([(field, "x")]);
            assert!(
                matches!(result, Err(AppError::BadRequest(_))),
                "field {:?} should be rejected",
                field
            );
        }
    }

    #[test]
    fn test_unknown_field_rejected_even_when_empty() {
        assert!(LeadQuery::from_params([("password", "")]).is_err());
    }

    #[test]
    fn test_one_bad_field_rejects_whole_query() {
        let result = LeadQuery::from_params([("name", "ana"), ("secret", "x")]);
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod value_tests {
    use super::*;

    #[test]
    fn test_empty_values_skipped() {
        let query = LeadQuery::from_params([("name", ""), ("category", "")]).unwrap();
        assert!(query.is_unfiltered());
        assert_eq!(query.limit(), SEARCH_LIMIT);
    }

    #[test]
    fn test_surrounding_whitespace_is_kept() {
        let query = LeadQuery::from_params([("location", "  Miami ")]).unwrap();
        assert_eq!(
            query.conditions(),
            &[Condition::Contains {
                column: "location",
                pattern: "%  Miami %".to_string()
            }]
        );
    }

    #[test]
    fn test_whitespace_only_value_is_a_filter() {
        let query = LeadQuery::from_params([("name", " ")]).unwrap();
        assert_eq!(
            query.conditions(),
            &[Condition::Contains {
                column: "name",
                pattern: "% %".to_string()
            }]
        );
    }

    #[test]
    fn test_wildcards_match_literally() {
        let query = LeadQuery::from_params([("email", "a_b%")]).unwrap();
        assert_eq!(
            query.conditions()[0],
            Condition::Contains {
                column: "email",
                pattern: "%a\\_b\\%%".to_string()
            }
        );
    }

    #[test]
    fn test_state_matches_whole_word_in_location() {
        let query = LeadQuery::from_params([("state", "FL")]).unwrap();
        assert!(query.to_builder().sql().contains("WHERE location ~* $1"));
        assert_eq!(
            query.conditions()[0],
            Condition::MatchesWord {
                column: "location",
                pattern: "\\yFL\\y".to_string()
            }
        );
    }

    #[test]
    fn test_state_punctuation_is_literal() {
        let query = LeadQuery::from_params([("state", "N.Y.")]).unwrap();
        assert_eq!(
            query.conditions()[0],
            Condition::MatchesWord {
                column: "location",
                pattern: "\\yN\\.Y\\.\\y".to_string()
            }
        );
    }

    #[test]
    fn test_followers_substring_casts_to_text() {
        let query = LeadQuery::from_params([("followers", "100")]).unwrap();
        assert!(query
            .to_builder()
            .sql()
            .contains("WHERE CAST(followers AS TEXT) ILIKE $1"));
    }

    #[test]
    fn test_min_followers_parsing() {
        let query = LeadQuery::from_params([("min_followers", "10000")]).unwrap();
        assert_eq!(
            query.conditions()[0],
            Condition::AtLeast {
                column: "followers",
                value: 10_000
            }
        );

        assert!(LeadQuery::from_params([("minFollowers", "-5")]).is_err());
        assert!(LeadQuery::from_params([("minFollowers", "10k")]).is_err());
        assert!(LeadQuery::from_params([("minFollowers", " 500 ")]).is_ok());
        assert!(LeadQuery::from_params([("minFollowers", "  ")]).is_err());
    }

    #[test]
    fn test_values_never_reach_sql_text() {
        let query = LeadQuery::from_params([("name", "'; DROP TABLE leads; --")]).unwrap();
        let builder = query.to_builder();
        assert!(!builder.sql().contains("DROP"));
        assert!(builder.sql().ends_with("WHERE name ILIKE $1 LIMIT $2"));
    }
}

#[cfg(test)]
mod chat_suggestion_tests {
    use super::*;

    #[test]
    fn test_chat_suggestions_feed_back_into_search() {
        let filters = suggest_filters(
            "Looking for a gym in Florida with over 10k followers",
            DEFAULT_RULES,
        );

        let query =
            LeadQuery::from_params(filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))).unwrap();

        assert_eq!(query.conditions().len(), 3);
        assert!(query.to_builder().sql().contains("followers >= $"));
    }

    #[test]
    fn test_rule_keys_are_all_searchable() {
        for rule in DEFAULT_RULES {
            assert!(
                LeadQuery::from_params([(rule.key, rule.value)]).is_ok(),
                "rule key {} is not a search field",
                rule.key
            );
        }
    }
}
