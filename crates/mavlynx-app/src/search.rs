//! # Alumni Search Engine
//!
//! Case-insensitive substring search over name, field of study and
//! industry. The query is staged on every keystroke and only matched on
//! explicit submit.

use crate::views::Alumnus;

/// Match `query` against a single alumnus
pub fn alumnus_matches(alumnus: &Alumnus, query_lower: &str) -> bool {
    [&alumnus.name, &alumnus.field_of_study, &alumnus.industry]
        .iter()
        .any(|field| field.to_lowercase().contains(query_lower))
}

/// Search `directory` for `query`, preserving directory order.
///
/// An empty query yields no results.
pub fn search_alumni<'a>(directory: &'a [Alumnus], query: &str) -> Vec<&'a Alumnus> {
    if query.is_empty() {
        return Vec::new();
    }
    let query_lower = query.to_lowercase();
    directory
        .iter()
        .filter(|a| alumnus_matches(a, &query_lower))
        .collect()
}

/// Staged query plus the results of the last submission
#[derive(Debug, Clone, Default)]
pub struct AlumniSearch {
    query: String,
    submitted: Option<String>,
    results: Vec<Alumnus>,
}

impl AlumniSearch {
    /// Create an empty search
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently in the search bar
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Query of the last submission, if any
    pub fn submitted_query(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    /// Replace the staged query; results are untouched until submit
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Run the staged query against `directory`
    pub fn submit(&mut self, directory: &[Alumnus]) -> &[Alumnus] {
        self.results = search_alumni(directory, &self.query)
            .into_iter()
            .cloned()
            .collect();
        self.submitted = Some(self.query.clone());
        &self.results
    }

    /// Re-run the last submitted query, e.g. after the directory reloads.
    /// Does nothing if nothing was submitted yet.
    pub fn refresh(&mut self, directory: &[Alumnus]) {
        if let Some(submitted) = &self.submitted {
            self.results = search_alumni(directory, submitted)
                .into_iter()
                .cloned()
                .collect();
        }
    }

    /// Results of the last submission
    pub fn results(&self) -> &[Alumnus] {
        &self.results
    }
}
