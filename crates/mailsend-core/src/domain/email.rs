use crate::domain::file::ParsedFile;
use std::collections::HashSet;

/// Splits file contents into one entry per line, dropping blank lines.
///
/// Lines are trimmed, so CRLF files and stray indentation do not produce
/// distinct entries. No address-format validation happens here; the server
/// owns that decision.
pub fn split_email_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Unique email strings in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl EmailSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the email was already present.
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        if email.is_empty() || self.seen.contains(&email) {
            return false;
        }
        self.seen.insert(email.clone());
        self.ordered.push(email);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl<S: Into<String>> FromIterator<S> for EmailSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = EmailSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for EmailSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for email in iter {
            self.insert(email);
        }
    }
}

pub fn build_email_list(files: &[ParsedFile]) -> EmailSet {
    files
        .iter()
        .flat_map(|file| file.emails.iter().map(String::as_str))
        .collect()
}
