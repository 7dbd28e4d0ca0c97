//! Live search over a list of items.

use serde::Serialize;

/// Keep ASCII letters, digits and spaces; drop everything else.
///
/// Case is left alone, callers fold case before cleaning.
pub fn clean_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Search query in the form items are matched against
pub fn normalize_query(query: &str) -> String {
    clean_string(&query.to_lowercase())
}

/// An item with its visibility under the current query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredItem<'a> {
    pub text: &'a str,
    pub visible: bool,
}

/// Show each item whose lower-cased text contains the cleaned query.
///
/// An empty (or all-punctuation) query shows everything.
pub fn filter_list<'a, S: AsRef<str>>(query: &str, items: &'a [S]) -> Vec<FilteredItem<'a>> {
    let needle = normalize_query(query);
    items
        .iter()
        .map(|item| {
            let text = item.as_ref();
            FilteredItem {
                text,
                visible: text.to_lowercase().contains(&needle),
            }
        })
        .collect()
}

/// Only the items left visible by `query`
pub fn visible_items<'a, S: AsRef<str>>(query: &str, items: &'a [S]) -> Vec<&'a str> {
    filter_list(query, items)
        .into_iter()
        .filter(|item| item.visible)
        .map(|item| item.text)
        .collect()
}
