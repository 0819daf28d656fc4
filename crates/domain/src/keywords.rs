//! Search keyword derivation.
//!
//! A `KeywordSet` is the deduplicated union of the user's goals, the skills
//! extracted from their profile, their persona and a handful of fixed
//! domain-context terms. It only ever feeds the content scout.

use std::collections::BTreeSet;

/// Deduplicated, order-independent set of search keywords.
///
/// Backed by a `BTreeSet` so the joined query text is stable between runs.
/// Blank entries are dropped; entries are otherwise kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: BTreeSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of goals, skills, persona and the fixed domain terms.
    pub fn derive<S: AsRef<str>>(
        goals: &[S],
        skills: &[S],
        persona: &str,
        domain_terms: &[&str],
    ) -> Self {
        let mut set = Self::new();
        set.extend(goals.iter().map(|g| g.as_ref()));
        set.extend(skills.iter().map(|s| s.as_ref()));
        set.insert(persona);
        set.extend(domain_terms.iter().copied());
        set
    }

    /// Returns `true` if the keyword was not already present.
    pub fn insert(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }
        self.keywords.insert(keyword.to_string())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Space-joined keywords, the form the search collaborator receives.
    pub fn to_query(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }

    pub fn into_vec(self) -> Vec<String> {
        self.keywords.into_iter().collect()
    }
}

impl<'a> Extend<&'a str> for KeywordSet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for keyword in iter {
            self.insert(keyword);
        }
    }
}

impl<'a> FromIterator<&'a str> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
