//! Known-subject vocabulary used to pick subjects out of OCR text

use crate::core::error::ScheduleError;
use regex::{Regex, RegexBuilder};

/// Subjects taught under the standard timetable, in tie-break order.
/// Longer names that contain a shorter one (e.g. `OS LAB` / `OS`) come first.
pub const STANDARD_SUBJECTS: [&str; 16] = [
    "PROJECT",
    "DS LAB",
    "DDCO",
    "MAT",
    "OS LAB",
    "OS",
    "DSA",
    "CRC",
    "SCR",
    "YOGA",
    "PROCTORING",
    "OOPS",
    "ENGLISH",
    "TUTORIAL",
    "REMEDIAL",
    "JAVA",
];

#[derive(Debug, Clone)]
struct VocabularyEntry {
    name: String,
    pattern: Regex,
    is_lab: bool,
}

/// A subject recognised in a day block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectMatch<'a> {
    /// Vocabulary name of the subject
    pub name: &'a str,
    /// Whether the subject is a lab and spans two slots
    pub is_lab: bool,
}

/// Ordered list of subject names recognised by the parser
///
/// Matching is a case-insensitive literal search. Anything outside the
/// vocabulary is never reported.
#[derive(Debug, Clone)]
pub struct SubjectVocabulary {
    entries: Vec<VocabularyEntry>,
}

impl SubjectVocabulary {
    /// Build a vocabulary from subject names in tie-break order.
    ///
    /// Names are trimmed; a repeated name (ignoring case) keeps its first position.
    ///
    /// # Errors
    /// Returns an error if a name is blank or its pattern cannot be compiled.
    pub fn new<I, S>(names: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<VocabularyEntry> = Vec::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(ScheduleError::BlankSubject);
            }
            if entries.iter().any(|e| e.name.eq_ignore_ascii_case(name)) {
                continue;
            }

            let pattern = RegexBuilder::new(&regex::escape(name))
                .case_insensitive(true)
                .build()?;

            entries.push(VocabularyEntry {
                name: name.to_string(),
                pattern,
                is_lab: is_lab_subject(name),
            });
        }

        Ok(Self { entries })
    }

    /// The standard subject list
    ///
    /// # Errors
    /// Returns an error only if a standard pattern fails to compile.
    pub fn standard() -> Result<Self, ScheduleError> {
        Self::new(STANDARD_SUBJECTS)
    }

    /// Number of subjects
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vocabulary has no subjects
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Subject names in vocabulary order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Whether `name` is exactly a vocabulary subject
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Recognise subjects in one day's block of text.
    ///
    /// The block is whitespace-normalised, then every occurrence of every
    /// subject is located. Occurrences are taken left to right; on the same
    /// offset the earlier vocabulary entry wins, and an occurrence starting
    /// inside an already accepted one is dropped. Each subject is reported
    /// once, at its first accepted occurrence.
    #[must_use]
    pub fn extract<'a>(&'a self, block: &str) -> Vec<SubjectMatch<'a>> {
        let normalized = block.split_whitespace().collect::<Vec<_>>().join(" ");

        // (start, end, entry index)
        let mut hits: Vec<(usize, usize, usize)> = Vec::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            hits.extend(
                entry
                    .pattern
                    .find_iter(&normalized)
                    .map(|m| (m.start(), m.end(), idx)),
            );
        }
        hits.sort_unstable_by_key(|&(start, _, idx)| (start, idx));

        let mut claimed_until = 0;
        let mut seen = vec![false; self.entries.len()];
        let mut found = Vec::new();

        for (start, end, idx) in hits {
            if start < claimed_until {
                continue;
            }
            claimed_until = end;

            if !seen[idx] {
                seen[idx] = true;
                let entry = &self.entries[idx];
                found.push(SubjectMatch {
                    name: &entry.name,
                    is_lab: entry.is_lab,
                });
            }
        }

        found
    }
}

/// A lab is any subject whose name mentions `LAB`
#[must_use]
pub fn is_lab_subject(name: &str) -> bool {
    name.to_ascii_uppercase().contains("LAB")
}
