//! Knowledge domain module.
//!
//! # Module Structure
//!
//! - `category`: The closed category set (`Category`) and conversational pools (`ConversationKind`)
//! - `model`: Sections and detail records (`Section`, `ProjectRecord`, `DetailLookup`, ...)
//! - `base`: The immutable store (`KnowledgeBase`) and its file form (`KnowledgeContent`)
//! - `builtin`: Compiled-in portfolio content
//! - `repository`: Storage trait for knowledge content files

mod base;
mod builtin;
mod category;
mod model;
mod repository;

pub use base::{CategoryContent, CategoryEntry, KnowledgeBase, KnowledgeContent};
pub use repository::KnowledgeRepository;
pub use category::{Category, ConversationKind};
pub use model::{
    ContactRecord, Detail, DetailLookup, DetailRecords, EducationRecord, ExperienceRecord,
    Highlight, ProjectLinks, ProjectRecord, Section, SkillGroup, SkillSet,
};
