//! The immutable knowledge base and its serializable content form.

use super::category::{Category, ConversationKind};
use super::model::{Detail, DetailLookup, DetailRecords, Section, SkillGroup};
use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{EnumCount, IntoEnumIterator};

/// Everything the knowledge base knows about one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub section: Section,
    /// Lowercase trigger substrings.
    pub keywords: Vec<String>,
    pub templates: Vec<String>,
}

/// Read-only content store shared by every session.
///
/// Construction goes through [`KnowledgeBase::from_fn`], which asks for an
/// entry for every [`Category`] and a pool for every [`ConversationKind`],
/// so a category cannot exist in one table but not another. Once built the
/// value is never mutated; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    owner_name: String,
    welcome: String,
    entries: Vec<CategoryEntry>,
    conversation: Vec<Vec<String>>,
    details: DetailRecords,
}

impl KnowledgeBase {
    /// Builds a knowledge base from total functions over the closed sets.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::Knowledge` if any keyword list or template pool
    /// is empty, or if a section is keyed to the wrong category.
    pub fn from_fn<E, C>(
        owner_name: impl Into<String>,
        welcome: impl Into<String>,
        details: DetailRecords,
        mut entry: E,
        mut pool: C,
    ) -> Result<Self>
    where
        E: FnMut(Category) -> CategoryEntry,
        C: FnMut(ConversationKind) -> Vec<String>,
    {
        let mut entries = Vec::with_capacity(Category::COUNT);
        for category in Category::all() {
            let mut e = entry(category);
            if e.section.key != category {
                return Err(FolioError::knowledge(format!(
                    "section for '{}' is keyed as '{}'",
                    category, e.section.key
                )));
            }
            if e.keywords.is_empty() {
                return Err(FolioError::knowledge(format!(
                    "category '{}' has no keywords",
                    category
                )));
            }
            if e.templates.is_empty() {
                return Err(FolioError::knowledge(format!(
                    "category '{}' has no response templates",
                    category
                )));
            }
            // A blank keyword would match every input.
            if e.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(FolioError::knowledge(format!(
                    "category '{}' has a blank keyword",
                    category
                )));
            }
            if e.templates.iter().any(|t| t.trim().is_empty()) {
                return Err(FolioError::knowledge(format!(
                    "category '{}' has a blank response template",
                    category
                )));
            }
            e.keywords = e.keywords.iter().map(|k| k.to_lowercase()).collect();
            entries.push(e);
        }

        let mut conversation = Vec::with_capacity(ConversationKind::COUNT);
        for kind in ConversationKind::iter() {
            let templates = pool(kind);
            if templates.is_empty() || templates.iter().any(|t| t.trim().is_empty()) {
                return Err(FolioError::knowledge(format!(
                    "conversation pool '{}' is empty or has a blank entry",
                    kind
                )));
            }
            conversation.push(templates);
        }

        Ok(Self {
            owner_name: owner_name.into(),
            welcome: welcome.into(),
            entries,
            conversation,
            details,
        })
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// First message of the greeting pair.
    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    fn entry(&self, category: Category) -> &CategoryEntry {
        &self.entries[category.index()]
    }

    /// Coarse lookup: the section for a category.
    pub fn resolve_section(&self, category: Category) -> &Section {
        &self.entry(category).section
    }

    pub fn label(&self, category: Category) -> &str {
        &self.entry(category).section.label
    }

    pub fn keywords(&self, category: Category) -> &[String] {
        &self.entry(category).keywords
    }

    pub fn templates(&self, category: Category) -> &[String] {
        &self.entry(category).templates
    }

    pub fn conversation_pool(&self, kind: ConversationKind) -> &[String] {
        &self.conversation[kind.index()]
    }

    pub fn details(&self) -> &DetailRecords {
        &self.details
    }

    /// Fine-grained lookup of one record by sub-query.
    ///
    /// Matching is a case-insensitive substring test; a miss is returned as
    /// [`DetailLookup::NotFound`] rather than an error.
    pub fn lookup_detail(&self, category: Category, sub_query: &str) -> DetailLookup {
        let query = sub_query.trim().to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&query);
        let details = &self.details;

        let found = match category {
            Category::About => {
                let highlights: Vec<_> = details
                    .highlights
                    .iter()
                    .filter(|h| query.is_empty() || contains(&h.title))
                    .cloned()
                    .collect();
                (!highlights.is_empty()).then_some(Detail::About(highlights))
            }
            Category::Projects => {
                let by_id = query.parse::<u32>().ok();
                details
                    .projects
                    .iter()
                    .find(|p| match by_id {
                        Some(id) => p.id == id,
                        None => !query.is_empty() && contains(&p.title),
                    })
                    .cloned()
                    .map(Detail::Project)
            }
            Category::Experience => details
                .experience
                .iter()
                .find(|e| !query.is_empty() && (contains(&e.company) || contains(&e.role)))
                .cloned()
                .map(Detail::Experience),
            Category::Skills => {
                let skills = &details.skills;
                [
                    (SkillGroup::Technical, &skills.technical),
                    (SkillGroup::Personal, &skills.personal),
                    (SkillGroup::Languages, &skills.languages),
                ]
                .into_iter()
                .find_map(|(group, list)| {
                    let matches: Vec<String> = list
                        .iter()
                        .filter(|s| !query.is_empty() && contains(s))
                        .cloned()
                        .collect();
                    (!matches.is_empty()).then_some(Detail::Skills { group, matches })
                })
            }
            Category::Education => {
                let records: Vec<_> = details
                    .education
                    .iter()
                    .filter(|r| {
                        query.is_empty()
                            || contains(&r.degree)
                            || r.institution.as_deref().is_some_and(contains)
                    })
                    .cloned()
                    .collect();
                (!records.is_empty()).then_some(Detail::Education(records))
            }
            Category::Contact => Some(Detail::Contact(details.contact.clone())),
        };

        match found {
            Some(detail) => DetailLookup::Found(detail),
            None => DetailLookup::NotFound {
                category,
                query: sub_query.trim().to_string(),
            },
        }
    }

    /// Exports the knowledge base into its file representation.
    pub fn to_content(&self) -> KnowledgeContent {
        let categories = Category::all()
            .map(|c| {
                let e = self.entry(c);
                (
                    c.key().to_string(),
                    CategoryContent {
                        label: e.section.label.clone(),
                        content: e.section.content.clone(),
                        keywords: e.keywords.clone(),
                        templates: e.templates.clone(),
                    },
                )
            })
            .collect();
        let conversation = ConversationKind::iter()
            .map(|k| (k.to_string(), self.conversation_pool(k).to_vec()))
            .collect();

        KnowledgeContent {
            owner_name: self.owner_name.clone(),
            welcome: self.welcome.clone(),
            categories,
            conversation,
            details: self.details.clone(),
        }
    }
}

/// Per-category block of a knowledge content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryContent {
    pub label: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub templates: Vec<String>,
}

/// Serializable form of the knowledge base (TOML content files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeContent {
    pub owner_name: String,
    pub welcome: String,
    /// Keyed by category id (`about`, `skills`, ...).
    pub categories: BTreeMap<String, CategoryContent>,
    /// Keyed by conversation kind (`greeting`, `fallback`, ...).
    pub conversation: BTreeMap<String, Vec<String>>,
    pub details: DetailRecords,
}

impl TryFrom<KnowledgeContent> for KnowledgeBase {
    type Error = FolioError;

    fn try_from(mut content: KnowledgeContent) -> Result<Self> {
        for key in content.categories.keys() {
            if !Category::all().any(|c| c.key() == key.as_str()) {
                return Err(FolioError::UnknownCategory(key.clone()));
            }
        }

        // Resolve every category up front so the builder closures stay total.
        let mut resolved = Vec::with_capacity(Category::COUNT);
        for category in Category::all() {
            let block = content
                .categories
                .remove(category.key())
                .ok_or_else(|| {
                    FolioError::knowledge(format!("missing category '{}'", category))
                })?;
            resolved.push(block);
        }
        let mut pools = Vec::with_capacity(ConversationKind::COUNT);
        for kind in ConversationKind::iter() {
            let pool = content.conversation.remove(&kind.to_string()).ok_or_else(|| {
                FolioError::knowledge(format!("missing conversation pool '{}'", kind))
            })?;
            pools.push(pool);
        }

        KnowledgeBase::from_fn(
            content.owner_name,
            content.welcome,
            content.details,
            |category| {
                let block = &resolved[category.index()];
                CategoryEntry {
                    section: Section {
                        key: category,
                        label: block.label.clone(),
                        content: block.content.clone(),
                    },
                    keywords: block.keywords.clone(),
                    templates: block.templates.clone(),
                }
            },
            |kind| pools[kind.index()].clone(),
        )
    }
}
