//! Keyword match rules.
//!
//! Every keyword resolves to a `MatchRule` through an explicit lookup:
//! the four experience-range labels get their own regex, everything else
//! (including unknown experience labels) is a case-insensitive substring test.

use regex::Regex;

lazy_static::lazy_static! {
    // The number may not follow a word character or a '.', so "16 years" is not 6
    // and the "5" in "2.5 years" is not a number of its own. A fraction is only
    // allowed where the whole value stays inside the range.
    // Separator between the number and the unit: "5 years", "5+ years", "5-year", "5yrs".
    static ref ZERO_TO_ONE_RE: Regex = Regex::new(
        r"(?i)(?:^|[^\w.])(?:0(?:\.\d+)?|1(?:\.0+)?|zero|one|less\s+than\s+(?:a|one|1))\s*\+?\s*-?\s*(?:years?|yrs?)\b"
    ).unwrap();
    static ref ONE_TO_THREE_RE: Regex = Regex::new(
        r"(?i)(?:^|[^\w.])(?:[12](?:\.\d+)?|3(?:\.0+)?|one|two|three)\s*\+?\s*-?\s*(?:years?|yrs?)\b"
    ).unwrap();
    static ref THREE_TO_FIVE_RE: Regex = Regex::new(
        r"(?i)(?:^|[^\w.])(?:[34](?:\.\d+)?|5(?:\.0+)?|three|four|five)\s*\+?\s*-?\s*(?:years?|yrs?)\b"
    ).unwrap();
    static ref FIVE_PLUS_RE: Regex = Regex::new(
        r"(?i)(?:^|[^\w.])(?:(?:[5-9]|[1-9]\d+)(?:\.\d+)?|five|six|seven|eight|nine|ten)\s*\+?\s*-?\s*(?:years?|yrs?)\b"
    ).unwrap();
}

/// The fixed experience-range labels and their dedicated patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceRange {
    ZeroToOne,
    OneToThree,
    ThreeToFive,
    FivePlus,
}

impl ExperienceRange {
    pub const ALL: [ExperienceRange; 4] = [
        ExperienceRange::ZeroToOne,
        ExperienceRange::OneToThree,
        ExperienceRange::ThreeToFive,
        ExperienceRange::FivePlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceRange::ZeroToOne => "0-1 years",
            ExperienceRange::OneToThree => "1-3 years",
            ExperienceRange::ThreeToFive => "3-5 years",
            ExperienceRange::FivePlus => "5+ years",
        }
    }

    /// Exact lookup on the trimmed, lower-cased label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|r| r.label() == label)
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            ExperienceRange::ZeroToOne => &ZERO_TO_ONE_RE,
            ExperienceRange::OneToThree => &ONE_TO_THREE_RE,
            ExperienceRange::ThreeToFive => &THREE_TO_FIVE_RE,
            ExperienceRange::FivePlus => &FIVE_PLUS_RE,
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern().is_match(text)
    }
}

/// How a single keyword is tested against document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Substring,
    Experience(ExperienceRange),
}

impl MatchRule {
    pub fn for_keyword(keyword: &str) -> Self {
        match ExperienceRange::from_label(keyword) {
            Some(range) => MatchRule::Experience(range),
            None => MatchRule::Substring,
        }
    }
}

/// Document text prepared for repeated keyword tests.
pub struct KeywordMatcher<'a> {
    text: &'a str,
    lowered: String,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lowered: text.to_lowercase(),
        }
    }

    pub fn matches(&self, keyword: &str) -> bool {
        match MatchRule::for_keyword(keyword) {
            MatchRule::Experience(range) => range.is_match(self.text),
            MatchRule::Substring => self.lowered.contains(&keyword.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_matches(text: &str, keyword: &str) -> bool {
        KeywordMatcher::new(text).matches(keyword)
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        assert!(keyword_matches("Senior python developer", "Python"));
        assert!(keyword_matches("PYTHON, SQL", "Python"));
        assert!(!keyword_matches("Java developer", "Python"));
    }

    #[test]
    fn test_substring_matches_inside_words() {
        // containment, not word matching
        assert!(keyword_matches("JavaScript", "java"));
    }

    #[test]
    fn test_six_years_is_five_plus_not_one_to_three() {
        let text = "I have 6 years of experience";
        assert!(keyword_matches(text, "5+ years"));
        assert!(!keyword_matches(text, "1-3 years"));
    }

    #[test]
    fn test_two_yrs_is_one_to_three_not_five_plus() {
        let text = "2 yrs experience";
        assert!(keyword_matches(text, "1-3 years"));
        assert!(!keyword_matches(text, "5+ years"));
    }

    #[test]
    fn test_zero_to_one_patterns() {
        let r = ExperienceRange::ZeroToOne;
        assert!(r.is_match("1 year of internship"));
        assert!(r.is_match("0.5 years in support"));
        assert!(r.is_match("less than a year"));
        assert!(r.is_match("One Year contract"));
        assert!(!r.is_match("10 years leading teams"));
        assert!(!r.is_match("4 years"));
        assert!(!r.is_match("1.5 years"));
    }

    #[test]
    fn test_one_to_three_accepts_fractional_years() {
        let r = ExperienceRange::OneToThree;
        assert!(r.is_match("1.5 years of QA"));
        assert!(r.is_match("2.5 years"));
        assert!(!r.is_match("3.5 years"));
        assert!(!r.is_match("0.5 years"));
    }

    #[test]
    fn test_three_to_five_patterns() {
        let r = ExperienceRange::ThreeToFive;
        assert!(r.is_match("four years at Acme"));
        assert!(r.is_match("3+ yrs"));
        assert!(r.is_match("5-year tenure"));
        assert!(!r.is_match("2 years"));
        assert!(!r.is_match("15 years"));
        assert!(r.is_match("4.5 years"));
        assert!(!r.is_match("0.5 years"));
        assert!(!r.is_match("2.5 years"));
        assert!(!r.is_match("5.5 years"));
    }

    #[test]
    fn test_five_plus_accepts_large_and_spelled_numbers() {
        let r = ExperienceRange::FivePlus;
        assert!(r.is_match("12+ years building compilers"));
        assert!(r.is_match("Ten years in finance"));
        assert!(r.is_match("seven yrs"));
        assert!(!r.is_match("4 years"));
        assert!(!r.is_match("often years ago"));
        assert!(r.is_match("7.5 years"));
        assert!(!r.is_match("2.5 years of Rust"));
        assert!(!r.is_match("0.5 years"));
    }

    #[test]
    fn test_number_must_start_at_word_boundary() {
        assert!(!ExperienceRange::OneToThree.is_match("13 years"));
        assert!(!ExperienceRange::FivePlus.is_match("v16years"));
    }

    #[test]
    fn test_experience_label_lookup() {
        assert_eq!(
            ExperienceRange::from_label(" 5+ Years "),
            Some(ExperienceRange::FivePlus)
        );
        assert_eq!(ExperienceRange::from_label("10+ years"), None);
        for range in ExperienceRange::ALL {
            assert_eq!(ExperienceRange::from_label(range.label()), Some(range));
        }
    }

    #[test]
    fn test_unknown_experience_label_falls_back_to_substring() {
        assert_eq!(MatchRule::for_keyword("10+ years"), MatchRule::Substring);
        assert!(keyword_matches("Over 10+ years of Go", "10+ years"));
        assert!(!keyword_matches("Over 12 years of Go", "10+ years"));
    }

    #[test]
    fn test_range_label_does_not_require_literal_label() {
        assert!(!keyword_matches("5 years of Rust", "1-3 years"));
        assert!(keyword_matches("5 years of Rust", "3-5 years"));
    }
}
