use serde::{Deserialize, Serialize};

/// One of the four fixed keyword buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Skills,
    Experience,
    Location,
    Certification,
}

impl KeywordCategory {
    /// Iteration order used for flattening and reporting.
    pub const ALL: [KeywordCategory; 4] = [
        KeywordCategory::Skills,
        KeywordCategory::Experience,
        KeywordCategory::Location,
        KeywordCategory::Certification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Skills => "skills",
            KeywordCategory::Experience => "experience",
            KeywordCategory::Location => "location",
            KeywordCategory::Certification => "certification",
        }
    }
}

/// The user's keyword lists. Uniqueness is not enforced across categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub location: Vec<String>,
    #[serde(default)]
    pub certification: Vec<String>,
}

impl KeywordSet {
    pub fn get(&self, category: KeywordCategory) -> &[String] {
        match category {
            KeywordCategory::Skills => &self.skills,
            KeywordCategory::Experience => &self.experience,
            KeywordCategory::Location => &self.location,
            KeywordCategory::Certification => &self.certification,
        }
    }

    fn get_mut(&mut self, category: KeywordCategory) -> &mut Vec<String> {
        match category {
            KeywordCategory::Skills => &mut self.skills,
            KeywordCategory::Experience => &mut self.experience,
            KeywordCategory::Location => &mut self.location,
            KeywordCategory::Certification => &mut self.certification,
        }
    }

    /// Adds a trimmed keyword. Empty strings and exact duplicates within the
    /// same category are ignored; returns whether the keyword was inserted.
    pub fn add(&mut self, category: KeywordCategory, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }
        let list = self.get_mut(category);
        if list.iter().any(|k| k == keyword) {
            return false;
        }
        list.push(keyword.to_string());
        true
    }

    /// Removes every exact occurrence of `keyword` from `category`.
    pub fn remove(&mut self, category: KeywordCategory, keyword: &str) -> bool {
        let keyword = keyword.trim();
        let list = self.get_mut(category);
        let before = list.len();
        list.retain(|k| k != keyword);
        list.len() != before
    }

    /// The flattened keyword list in category order, each paired with its category.
    pub fn entries(&self) -> impl Iterator<Item = (KeywordCategory, &str)> + '_ {
        KeywordCategory::ALL
            .into_iter()
            .flat_map(move |c| self.get(c).iter().map(move |k| (c, k.as_str())))
    }

    pub fn total(&self) -> usize {
        KeywordCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
