//! Compiled-in portfolio content.
//!
//! Every table here is an exhaustive `match` over [`Category`] or
//! [`ConversationKind`]: adding a category does not compile until it has a
//! section, keywords and a template pool.

use super::base::{CategoryEntry, KnowledgeBase};
use super::category::{Category, ConversationKind};
use super::model::{
    ContactRecord, DetailRecords, EducationRecord, ExperienceRecord, Highlight, ProjectLinks,
    ProjectRecord, Section, SkillSet,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

const OWNER_NAME: &str = "Sidharth";

const WELCOME: &str = "Hello! I'm Sidharth's AI assistant. How can I help you today?";

static BUILTIN: Lazy<Arc<KnowledgeBase>> = Lazy::new(|| {
    // The tables below are total and non-empty; the unit tests pin this.
    Arc::new(
        KnowledgeBase::from_fn(OWNER_NAME, WELCOME, details(), entry, pool)
            .expect("builtin knowledge content is complete"),
    )
});

impl KnowledgeBase {
    /// The compiled-in knowledge base.
    pub fn builtin() -> KnowledgeBase {
        BUILTIN.as_ref().clone()
    }

    /// Process-wide shared handle to the compiled-in knowledge base.
    pub fn shared_builtin() -> Arc<KnowledgeBase> {
        Arc::clone(&BUILTIN)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn entry(category: Category) -> CategoryEntry {
    CategoryEntry {
        section: Section {
            key: category,
            label: label(category).to_string(),
            content: content(category).to_string(),
        },
        keywords: strings(keywords(category)),
        templates: strings(templates(category)),
    }
}

fn label(category: Category) -> &'static str {
    match category {
        Category::About => "About",
        Category::Skills => "Skills",
        Category::Projects => "Projects",
        Category::Experience => "Experience",
        Category::Education => "Education",
        Category::Contact => "Contact",
    }
}

fn content(category: Category) -> &'static str {
    match category {
        Category::About => {
            "Hi, I'm Sidharth! A BCA student passionate about technology, looking to apply what I learn in real-world projects while growing in software development and quality assurance."
        }
        Category::Skills => {
            "Manual Testing & QA, HTML, CSS, JavaScript (learning), React basics (learning), Microsoft Office Suite, Bug Reporting & Documentation."
        }
        Category::Projects => {
            "Project 1: Learning Management System\nTech stack: HTML, CSS, JavaScript, PHP, MySQL\nDescription: Academic LMS with registration, enrollment and content management.\n\nProject 2: Personal Portfolio Website\nTech stack: React, TypeScript, Tailwind CSS\nDescription: This site, including its assistant.\n\nProject 3: Simple Calculator App\nTech stack: HTML, CSS, JavaScript\nDescription: Early project on DOM manipulation and event handling."
        }
        Category::Experience => {
            "June 2024 - August 2024: QA Testing Intern at Loqal.ai\nJune 2024 - August 2024: Frontend + Testing Intern at SingleInterface\nAugust 2024 - Dec 2024: Internshala Student Partner"
        }
        Category::Education => {
            "Bachelor of Computer Applications (BCA), DPG Degree College (MDU Rohtak), currently pursuing\n12th Grade (CBSE), 2022 - 2023: 85%\n10th Grade (CBSE), 2020 - 2021: 50%"
        }
        Category::Contact => {
            "Email: sid240711@gmail.com\nPhone: 9870220973\nLocation: Dwarka Sec-26, South West Delhi 110077"
        }
    }
}

fn keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::About => &["about", "introduce", "introduction", "who are you", "who is sidharth"],
        Category::Skills => &[
            "skill",
            "technologies",
            "technology",
            "programming",
            "javascript",
            "react",
            "html",
            "css",
        ],
        Category::Projects => &["project", "work", "portfolio", "lms", "calculator", "website"],
        Category::Experience => &[
            "experience",
            "internship",
            "job",
            "work experience",
            "qa",
            "testing",
        ],
        Category::Education => &["education", "degree", "bca", "college", "school", "study", "student"],
        Category::Contact => &[
            "contact", "email", "phone", "reach", "location", "address", "hire", "linkedin",
            "github",
        ],
    }
}

fn templates(category: Category) -> &'static [&'static str] {
    match category {
        Category::About => &[
            "Sidharth is a BCA student passionate about technology, seeking opportunities to apply his learning in real-world projects.",
            "He's currently pursuing his Bachelor of Computer Applications at DPG Degree College, affiliated by MDU Rohtak.",
            "Sidharth has experience in manual testing, quality assurance, frontend development, and bug reporting.",
        ],
        Category::Skills => &[
            "Sidharth is developing skills in manual testing, QA, HTML, CSS, JavaScript, and React.",
            "His technical skills include Manual Testing & QA, HTML, CSS, JavaScript (Learning), React Basics (Learning), and Microsoft Office Suite.",
            "He also has personal skills like Attention to Detail, Quick Learning ability, and Team Collaboration.",
        ],
        Category::Projects => &[
            "Sidharth has worked on several projects including a Learning Management System, a Personal Portfolio Website, and a Simple Calculator App.",
            "His projects showcase his learning journey with technologies like HTML, CSS, JavaScript, PHP, MySQL, React, TypeScript, and Tailwind CSS.",
            "You can view his projects in the Projects section. Would you like details about a specific project?",
        ],
        Category::Experience => &[
            "Sidharth has completed internships in QA testing at Loqal.ai and frontend development at SingleInterface.",
            "He also worked as an Internshala Student Partner, helping students find suitable courses and internships.",
            "His experience includes manual testing of web and mobile applications, bug reporting, and frontend development.",
        ],
        Category::Education => &[
            "Sidharth is currently pursuing his Bachelor of Computer Applications (BCA) at DPG Degree College.",
            "He completed his 12th grade with 85% and his 10th grade with 50%.",
            "His education background shows a strong commitment to learning computer applications.",
        ],
        Category::Contact => &[
            "You can reach Sidharth at sid240711@gmail.com or call him at 9870220973.",
            "He's located in Dwarka Sec-26, South West Delhi 110077.",
            "Feel free to contact him through the contact form on this portfolio or directly via email.",
        ],
    }
}

fn pool(kind: ConversationKind) -> Vec<String> {
    let items: &[&str] = match kind {
        ConversationKind::Greeting => &[
            "Hello there! I'm Sidharth's AI assistant. How can I help you today?",
            "Hi! I'm here to help you learn more about Sidharth and his work. What would you like to know?",
            "Welcome! I'm Sidharth's virtual assistant. Feel free to ask me anything about his portfolio!",
        ],
        ConversationKind::Appreciation => &[
            "Thank you for your interest! I'm glad I could help.",
            "You're very welcome! Is there anything else you'd like to know?",
            "I'm happy to assist! Feel free to ask me anything else about Sidharth.",
        ],
        ConversationKind::Clarification => &[
            "Could you tell me a bit more about what you're looking for?",
            "I'd like to help with that. Could you be more specific about what information you need?",
            "That's an interesting question. Could you clarify what you'd like to know?",
        ],
        ConversationKind::Fallback => &[
            "I'm here to help you learn more about Sidharth and his portfolio. What would you like to know?",
            "That's an interesting question! I can tell you more about Sidharth's projects, skills, or experience. What interests you most?",
            "I'd be happy to help with that. You can ask me about his background, projects, or how to contact him!",
        ],
    };
    strings(items)
}

fn details() -> DetailRecords {
    DetailRecords {
        highlights: vec![
            Highlight {
                title: "Education".into(),
                description: "Currently pursuing Bachelor of Computer Applications (BCA) at DPG Degree College".into(),
            },
            Highlight {
                title: "Experience".into(),
                description: "Internships in QA testing and frontend development".into(),
            },
            Highlight {
                title: "Leadership".into(),
                description: "Certificate for Leadership and 2nd Position in PPT Competition".into(),
            },
            Highlight {
                title: "Expertise".into(),
                description: "Manual Testing & QA, HTML, CSS, JavaScript, React Basics, Microsoft Office Suite".into(),
            },
        ],
        projects: vec![
            ProjectRecord {
                id: 1,
                title: "Learning Management System (Academic Project)".into(),
                description: "A simple learning management system built as part of BCA coursework, focusing on basic CRUD operations and user authentication.".into(),
                full_description: "This academic project helped understand fundamental web development concepts including user registration, course enrollment, and basic content management. Built using HTML, CSS, JavaScript, and PHP with MySQL database.".into(),
                technologies: strings(&["HTML", "CSS", "JavaScript", "PHP", "MySQL"]),
                year: "2024".into(),
                status: "Academic Project".into(),
                links: ProjectLinks {
                    live: Some("https://github.com/sidharth-demo/lms-project".into()),
                    github: Some("https://github.com/sidharth-demo/lms-project".into()),
                },
            },
            ProjectRecord {
                id: 2,
                title: "Personal Portfolio Website".into(),
                description: "A personal portfolio website built with React and modern web technologies, showcasing learning journey and projects.".into(),
                full_description: "This portfolio represents the journey in learning modern web development. Built with React, TypeScript, and Tailwind CSS, it demonstrates understanding of component-based architecture, responsive design, and modern development practices.".into(),
                technologies: strings(&["React", "TypeScript", "Tailwind CSS", "Framer Motion", "Vite"]),
                year: "2024".into(),
                status: "Live".into(),
                links: ProjectLinks {
                    live: Some("https://sidha.netlify.app".into()),
                    github: Some("https://github.com/sidharth-demo/portfolio".into()),
                },
            },
            ProjectRecord {
                id: 3,
                title: "Simple Calculator App".into(),
                description: "A basic calculator application built while learning JavaScript fundamentals and DOM manipulation.".into(),
                full_description: "One of the first JavaScript projects that helped understand event handling, DOM manipulation, and basic programming logic. Features include basic arithmetic operations and a clean, responsive interface.".into(),
                technologies: strings(&["HTML", "CSS", "JavaScript"]),
                year: "2024".into(),
                status: "Learning Project".into(),
                links: ProjectLinks {
                    live: Some("https://sidharth-calculator.netlify.app".into()),
                    github: Some("https://github.com/sidharth-demo/calculator".into()),
                },
            },
        ],
        experience: vec![
            ExperienceRecord {
                role: "QA Testing Intern".into(),
                company: "Loqal.ai".into(),
                period: "June 2024 - August 2024".into(),
                description: "Performing manual testing of web and mobile applications to identify bugs and ensure functionality, usability, and performance. Preparing detailed bug reports and collaborating with the development team to resolve issues efficiently.".into(),
            },
            ExperienceRecord {
                role: "Internshala Student Partner".into(),
                company: "Internshala".into(),
                period: "August 2024 - Dec 2024".into(),
                description: "Represented Internshala in college, guiding students to find suitable courses and internships.".into(),
            },
            ExperienceRecord {
                role: "Frontend + Testing Intern".into(),
                company: "SingleInterface".into(),
                period: "June 2024 - August 2024".into(),
                description: "Completed a 1.5-month internship in web development as a frontend tester. Gained valuable experience working with a supportive team and mentors.".into(),
            },
        ],
        education: vec![
            EducationRecord {
                degree: "Bachelor of Computer Applications (BCA)".into(),
                institution: Some("DPG Degree College, affiliated by MDU Rohtak, Haryana".into()),
                period: None,
                score: None,
                status: Some("Currently Pursuing".into()),
            },
            EducationRecord {
                degree: "12th Grade (CBSE)".into(),
                institution: None,
                period: Some("2022 - 2023".into()),
                score: Some("85%".into()),
                status: None,
            },
            EducationRecord {
                degree: "10th Grade (Matric) (CBSE)".into(),
                institution: None,
                period: Some("2020 - 2021".into()),
                score: Some("50%".into()),
                status: None,
            },
        ],
        skills: SkillSet {
            technical: strings(&[
                "Manual Testing & QA",
                "HTML",
                "CSS",
                "JavaScript (Learning)",
                "React Basics (Learning)",
                "Microsoft Office Suite",
                "Bug Reporting & Documentation",
            ]),
            personal: strings(&["Attention to Detail", "Quick Learner", "Team Collaboration"]),
            languages: strings(&["Hindi (Fluent)", "English (Proficient)"]),
        },
        contact: ContactRecord {
            email: "sid240711@gmail.com".into(),
            phone: "9870220973".into(),
            location: "Vill. Bharthal, Dwarka Sec-26, South West Delhi 110077".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_complete() {
        let kb = KnowledgeBase::builtin();
        for category in Category::all() {
            assert!(!kb.keywords(category).is_empty());
            assert!(!kb.templates(category).is_empty());
        }
        assert_eq!(kb.owner_name(), "Sidharth");
    }

    #[test]
    fn test_shared_builtin_is_one_instance() {
        let a = KnowledgeBase::shared_builtin();
        let b = KnowledgeBase::shared_builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
