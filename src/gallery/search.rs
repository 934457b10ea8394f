/// Tag search box with live suggestions
///
/// Suggestions are recomputed from scratch on every input change.
use super::filter::tag_matches;

pub const NO_TAGS_FOUND: &str = "No tags found";
pub const TAG_NOT_FOUND: &str = "Tag not found";

/// What the suggestion list currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Suggestions {
    #[default]
    Hidden,
    /// Clickable tag suggestions
    Tags(Vec<String>),
    /// A single non-interactive message
    Notice(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    tags: Vec<String>,
    input: String,
    suggestions: Suggestions,
}

/// Tags containing `query` (trimmed, case-insensitive), in tag-set order
pub fn matching_tags(tags: &[String], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    tags.iter()
        .filter(|tag| tag.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

impl SearchBox {
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    /// With no known tags the box accepts text but never suggests or navigates
    pub fn is_enabled(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Called on every keystroke
    pub fn set_input(&mut self, value: String) {
        self.input = value;
        if !self.is_enabled() {
            return;
        }

        if self.input.trim().is_empty() {
            self.suggestions = Suggestions::Hidden;
            return;
        }

        let matches = matching_tags(&self.tags, &self.input);
        self.suggestions = if matches.is_empty() {
            Suggestions::Notice(NO_TAGS_FOUND)
        } else {
            Suggestions::Tags(matches)
        };
    }

    /// A suggestion was clicked: returns the tag to navigate to
    pub fn select(&mut self, tag: &str) -> String {
        self.clear();
        tag.to_string()
    }

    /// Enter was pressed. Returns the matching tag (with its original
    /// casing) when the input names one exactly, ignoring case.
    pub fn submit(&mut self) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }

        let query = self.input.trim();
        if query.is_empty() {
            return None;
        }

        match self.tags.iter().find(|tag| tag_matches(tag, query)).cloned() {
            Some(tag) => {
                self.clear();
                Some(tag)
            }
            None => {
                tracing::warn!("Tag not found: {}", self.input);
                self.suggestions = Suggestions::Notice(TAG_NOT_FOUND);
                None
            }
        }
    }

    /// Click outside the search control: hide suggestions, keep the text
    pub fn dismiss(&mut self) {
        self.suggestions = Suggestions::Hidden;
    }

    fn clear(&mut self) {
        self.input.clear();
        self.suggestions = Suggestions::Hidden;
    }
}
