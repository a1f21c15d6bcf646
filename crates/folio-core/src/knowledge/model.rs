//! Knowledge records: coarse sections and fine-grained detail records.

use super::category::Category;
use serde::{Deserialize, Serialize};

/// A top-level topic reply: `{key, label, content}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub key: Category,
    pub label: String,
    /// May embed paragraph breaks.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub full_description: String,
    pub technologies: Vec<String>,
    pub year: String,
    pub status: String,
    #[serde(default)]
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillSet {
    pub technical: Vec<String>,
    pub personal: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// Structured records backing `lookup_detail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecords {
    pub highlights: Vec<Highlight>,
    pub projects: Vec<ProjectRecord>,
    pub experience: Vec<ExperienceRecord>,
    pub education: Vec<EducationRecord>,
    pub skills: SkillSet,
    pub contact: ContactRecord,
}

/// Which group of skills a skill lookup matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillGroup {
    Technical,
    Personal,
    Languages,
}

/// A successful detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    About(Vec<Highlight>),
    Project(ProjectRecord),
    Experience(ExperienceRecord),
    Skills {
        group: SkillGroup,
        matches: Vec<String>,
    },
    Education(Vec<EducationRecord>),
    Contact(ContactRecord),
}

/// Outcome of `KnowledgeBase::lookup_detail`; a miss is data, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLookup {
    Found(Detail),
    NotFound { category: Category, query: String },
}

impl DetailLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, DetailLookup::Found(_))
    }

    /// Renders the lookup as reply text. `owner` is the portfolio owner's name.
    pub fn render(&self, owner: &str) -> String {
        match self {
            DetailLookup::Found(detail) => detail.render(owner),
            DetailLookup::NotFound { category, .. } => not_found_text(*category),
        }
    }
}

fn not_found_text(category: Category) -> String {
    match category {
        Category::Projects => {
            "I couldn't find details for that project. Would you like to know about another project?"
                .to_string()
        }
        Category::Experience => {
            "I don't have specific details about that experience. Would you like to know about his other experiences?"
                .to_string()
        }
        Category::Skills => {
            "I don't have specific information about that skill. Would you like to know about his other skills?"
                .to_string()
        }
        Category::Education => {
            "I don't have details about that qualification. Would you like to hear about his other studies?"
                .to_string()
        }
        Category::About | Category::Contact => format!(
            "I don't have anything more specific on that. Would you like to know about another {} topic?",
            category.key()
        ),
    }
}

impl Detail {
    pub fn render(&self, owner: &str) -> String {
        match self {
            Detail::About(highlights) => highlights
                .iter()
                .map(|h| format!("{}: {}", h.title, h.description))
                .collect::<Vec<_>>()
                .join("\n"),
            Detail::Project(project) => format!(
                "Project: {}\nDescription: {}\nTechnologies: {}\nYear: {}\nStatus: {}",
                project.title,
                project.full_description,
                project.technologies.join(", "),
                project.year,
                project.status
            ),
            Detail::Experience(exp) => format!(
                "Role: {}\nCompany: {}\nPeriod: {}\nDescription: {}",
                exp.role, exp.company, exp.period, exp.description
            ),
            Detail::Skills { group, matches } => match group {
                SkillGroup::Technical => {
                    format!("{} is developing skills in {}.", owner, matches.join(", "))
                }
                SkillGroup::Personal => {
                    format!("His personal skills include {}.", matches.join(", "))
                }
                SkillGroup::Languages => format!("He speaks {}.", matches.join(", ")),
            },
            Detail::Education(records) => records
                .iter()
                .map(render_education)
                .collect::<Vec<_>>()
                .join("\n"),
            Detail::Contact(contact) => format!(
                "You can reach {} at:\nEmail: {}\nPhone: {}\nLocation: {}",
                owner, contact.email, contact.phone, contact.location
            ),
        }
    }
}

fn render_education(record: &EducationRecord) -> String {
    let mut parts = vec![record.degree.clone()];
    if let Some(institution) = &record.institution {
        parts.push(institution.clone());
    }
    if let Some(period) = &record.period {
        parts.push(period.clone());
    }
    if let Some(score) = &record.score {
        parts.push(format!("score {}", score));
    }
    if let Some(status) = &record.status {
        parts.push(status.clone());
    }
    parts.join(" - ")
}
