use std::fmt;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Deserialize;

use super::error::KnowledgeError;

/// A canned reply. Structured replies always carry a cause and a treatment;
/// the vaccine note is optional.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Plain(String),
    Structured {
        cause: String,
        treatment: String,
        #[serde(default)]
        vaccine: Option<String>,
    },
}

impl Answer {
    pub fn structured(cause: &str, treatment: &str, vaccine: Option<&str>) -> Answer {
        Answer::Structured {
            cause: cause.to_string(),
            treatment: treatment.to_string(),
            vaccine: vaccine.map(str::to_string),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Plain(text) => f.write_str(text),
            Answer::Structured {
                cause,
                treatment,
                vaccine,
            } => {
                write!(f, "Cause:\n{cause}\n\nTreatment:\n{treatment}")?;
                if let Some(vaccine) = vaccine {
                    write!(f, "\n\nVaccine:\n{vaccine}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct KnowledgeEntry {
    keyword: String,
    answer: Answer,
}

impl KnowledgeEntry {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }
}

/// Ordered keyword table. Lookups walk the entries in definition order and
/// the first keyword contained in the message wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeTable {
    entries: Vec<KnowledgeEntry>,
}

lazy_static! {
    static ref BUILTIN: Arc<KnowledgeTable> = Arc::new(builtin_table());
}

const COMMON_DISEASES: [&str; 10] = [
    "diabetes",
    "hypertension",
    "asthma",
    "pneumonia",
    "arthritis",
    "bronchitis",
    "migraine",
    "tuberculosis",
    "malaria",
    "dengue",
];

fn builtin_table() -> KnowledgeTable {
    let mut entries = vec![
        KnowledgeEntry {
            keyword: "good morning".into(),
            answer: Answer::Plain(
                "Good morning! Hope you have a great and healthy day ahead! How can I assist you today?".into(),
            ),
        },
        KnowledgeEntry {
            keyword: "good afternoon".into(),
            answer: Answer::Plain(
                "Good afternoon! Staying hydrated is important. What health query do you have?".into(),
            ),
        },
        KnowledgeEntry {
            keyword: "good night".into(),
            answer: Answer::Plain(
                "Good night! Proper sleep is essential for good health. Do you need any health tips before you sleep?".into(),
            ),
        },
        KnowledgeEntry {
            keyword: "fever".into(),
            answer: Answer::structured(
                "Fever is caused by infections, such as flu, cold, or bacterial infections. It can also result from heat exhaustion or inflammatory conditions.",
                "Stay hydrated, rest well, and take medications like acetaminophen or ibuprofen if needed. Seek medical help if fever lasts more than 3 days.",
                Some("Vaccines such as flu shots and COVID-19 vaccines help prevent fevers caused by viral infections."),
            ),
        },
        KnowledgeEntry {
            keyword: "cold".into(),
            answer: Answer::structured(
                "The common cold is caused by viruses, primarily rhinoviruses. It spreads through droplets from sneezing, coughing, or touching contaminated surfaces.",
                "Stay hydrated, use steam inhalation, drink warm fluids, and take antihistamines if needed.",
                None,
            ),
        },
    ];

    entries.extend(COMMON_DISEASES.iter().map(|disease| KnowledgeEntry {
        keyword: disease.to_string(),
        answer: Answer::Structured {
            cause: format!("Detailed explanation of the cause, risk factors, and spread of {disease}."),
            treatment: format!(
                "Comprehensive treatment options for {disease}, including medications, lifestyle changes, and professional medical advice."
            ),
            vaccine: None,
        },
    }));

    KnowledgeTable { entries }
}

impl KnowledgeTable {
    /// Builds a table, lower-casing keywords. Empty and repeated keywords are
    /// rejected.
    pub fn new<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, Answer)>,
    ) -> Result<KnowledgeTable, KnowledgeError> {
        let mut table: Vec<KnowledgeEntry> = Vec::new();
        for (index, (keyword, answer)) in entries.into_iter().enumerate() {
            let keyword = keyword.into().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(KnowledgeError::EmptyKeyword(index));
            }
            if table.iter().any(|entry| entry.keyword == keyword) {
                return Err(KnowledgeError::DuplicateKeyword(keyword));
            }
            table.push(KnowledgeEntry { keyword, answer });
        }
        Ok(KnowledgeTable { entries: table })
    }

    /// The table shipped with the assistant, shared by every session.
    pub fn builtin() -> Arc<KnowledgeTable> {
        Arc::clone(&BUILTIN)
    }

    /// Parses a JSON array of `{"keyword": .., "answer": ..}` objects, where an
    /// answer is either a string or `{"cause", "treatment", "vaccine"?}`.
    pub fn from_json(json: &str) -> Result<KnowledgeTable, KnowledgeError> {
        let raw: Vec<KnowledgeEntry> = serde_json::from_str(json)?;
        KnowledgeTable::new(raw.into_iter().map(|entry| (entry.keyword, entry.answer)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<KnowledgeTable, KnowledgeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        KnowledgeTable::from_json(&json)
    }

    pub fn lookup(&self, text: &str) -> Option<&Answer> {
        self.lookup_entry(text).map(KnowledgeEntry::answer)
    }

    pub fn lookup_entry(&self, text: &str) -> Option<&KnowledgeEntry> {
        let text = text.to_lowercase();
        self.entries
            .iter()
            .find(|entry| text.contains(entry.keyword.as_str()))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.keyword.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
