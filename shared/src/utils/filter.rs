//! Selection of wines by pattern and rating state.
//!
//! A [`WineFilter`] is the caller-supplied query used when listing: an
//! optional case-insensitive regular expression matched against the
//! wine's default rendering, plus switches for rated and unrated wines.

use regex::{Regex, RegexBuilder};

use crate::core::errors::{CoreError, CoreResult};
use crate::models::{Record, Wine};

/// Filter criteria for selecting wines from a collection
#[derive(Debug, Clone, Default)]
pub struct WineFilter {
    pattern: Option<Regex>,
    rated_only: bool,
    unrated_only: bool,
}

impl WineFilter {
    /// A filter that matches every wine
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the default rendering to match a pattern
    /// (case-insensitive). An unparsable pattern is a configuration
    /// error.
    pub fn pattern(mut self, pattern: &str) -> CoreResult<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                CoreError::configuration(format!("invalid selection pattern '{pattern}': {e}"))
            })?;
        self.pattern = Some(regex);
        Ok(self)
    }

    /// Keep only rated wines
    pub fn rated_only(mut self) -> Self {
        self.rated_only = true;
        self.unrated_only = false;
        self
    }

    /// Keep only unrated wines
    pub fn unrated_only(mut self) -> Self {
        self.unrated_only = true;
        self.rated_only = false;
        self
    }

    /// Does this wine satisfy the filter?
    pub fn matches(&self, wine: &Wine) -> CoreResult<bool> {
        if self.rated_only && !wine.is_rated() {
            return Ok(false);
        }
        if self.unrated_only && wine.is_rated() {
            return Ok(false);
        }

        match &self.pattern {
            Some(regex) => Ok(regex.is_match(&wine.render(None)?)),
            None => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WineColor;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn wines() -> (Wine, Wine) {
        let date = NaiveDate::from_ymd_opt(2014, 10, 11).unwrap();
        let unrated = Wine::new(0, date, WineColor::Red, "Chianti", 2011, "Fontodi", 20.99);
        let rated = Wine::with_rating(
            1,
            date,
            WineColor::White,
            "Chablis",
            2019,
            "Dauvissat",
            34.50,
            5,
            "superbe",
        );
        (unrated, rated)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let (unrated, rated) = wines();
        let filter = WineFilter::new();
        assert!(filter.matches(&unrated).unwrap());
        assert!(filter.matches(&rated).unwrap());
    }

    #[test]
    fn test_pattern_is_case_insensitive() {
        let (unrated, rated) = wines();
        let filter = WineFilter::new().pattern("chianti").unwrap();
        assert!(filter.matches(&unrated).unwrap());
        assert!(!filter.matches(&rated).unwrap());
    }

    #[test]
    fn test_pattern_sees_the_rendered_form() {
        let (_, rated) = wines();
        // The comment only appears in the rendering of a rated wine
        let filter = WineFilter::new().pattern("superbe").unwrap();
        assert!(filter.matches(&rated).unwrap());
    }

    #[test]
    fn test_rating_state_switches() {
        let (unrated, rated) = wines();

        let filter = WineFilter::new().rated_only();
        assert!(!filter.matches(&unrated).unwrap());
        assert!(filter.matches(&rated).unwrap());

        let filter = WineFilter::new().unrated_only();
        assert!(filter.matches(&unrated).unwrap());
        assert!(!filter.matches(&rated).unwrap());
    }

    #[test]
    fn test_invalid_pattern_is_a_configuration_error() {
        assert_matches!(
            WineFilter::new().pattern("(["),
            Err(CoreError::Configuration { .. })
        );
    }
}
