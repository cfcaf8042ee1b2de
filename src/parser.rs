use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Section titles recognized when they stand alone on a line.
pub const SECTION_HEADERS: &[&str] = &[
    "EDUCATION",
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "EMPLOYMENT HISTORY",
    "PROFESSIONAL EXPERIENCE",
    "SKILLS",
    "TECHNICAL SKILLS",
    "CORE COMPETENCIES",
    "PROJECTS",
    "CERTIFICATIONS",
    "AWARDS",
    "ACHIEVEMENTS",
    "SUMMARY",
    "PROFESSIONAL SUMMARY",
    "OBJECTIVE",
    "CAREER OBJECTIVE",
];

const SKILL_SECTIONS: &[&str] = &["SKILLS", "TECHNICAL SKILLS", "CORE COMPETENCIES"];

/// Name given to the lines that come before the first recognized header.
pub const PREAMBLE_SECTION: &str = "HEADER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSection {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub sections: Vec<ResumeSection>,
    pub contact_info: ContactInfo,
    pub skills: Vec<String>,
    pub raw_text: String,
}

impl ParsedResume {
    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.content.as_str())
    }
}

/// Splits plain resume text into sections and pulls out contact details and
/// listed skills.
pub struct ResumeParser {
    email: Regex,
    phone: Regex,
}

impl ResumeParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")?,
            phone: Regex::new(r"(?:\+\d{1,3}[-.\s]?)?\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b")?,
        })
    }

    pub fn parse(&self, text: &str) -> ParsedResume {
        let sections = extract_sections(text);
        let skills = extract_skills(&sections);
        ParsedResume {
            contact_info: self.extract_contact_info(text),
            sections,
            skills,
            raw_text: text.to_string(),
        }
    }

    pub fn extract_contact_info(&self, text: &str) -> ContactInfo {
        ContactInfo {
            email: self.email.find(text).map(|m| m.as_str().to_string()),
            phone: self.phone.find(text).map(|m| m.as_str().to_string()),
        }
    }
}

fn section_header(line: &str) -> Option<&'static str> {
    SECTION_HEADERS
        .iter()
        .copied()
        .find(|header| header.eq_ignore_ascii_case(line))
}

pub fn extract_sections(text: &str) -> Vec<ResumeSection> {
    let mut sections = Vec::new();
    let mut current = PREAMBLE_SECTION;
    let mut content: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match section_header(line) {
            Some(header) => {
                if !content.is_empty() {
                    sections.push(ResumeSection {
                        name: current.to_string(),
                        content: content.join("\n"),
                    });
                    content.clear();
                }
                current = header;
            }
            None => content.push(line),
        }
    }

    if !content.is_empty() {
        sections.push(ResumeSection {
            name: current.to_string(),
            content: content.join("\n"),
        });
    }
    sections
}

/// Skills listed in the skills sections, split on commas, bullets and line
/// breaks, deduplicated case-insensitively.
pub fn extract_skills(sections: &[ResumeSection]) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for section in sections.iter().filter(|s| SKILL_SECTIONS.contains(&s.name.as_str())) {
        for item in section.content.split([',', '•', '\n']) {
            let skill = item.trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '*');
            if !skill.is_empty() && seen.insert(skill.to_lowercase()) {
                skills.push(skill.to_string());
            }
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\njane.doe@example.com | 555-123-4567\n\n\
        Summary\nBackend engineer with 6 years of Rust.\n\n\
        EXPERIENCE\nAcme Corp - Senior Engineer\nBuilt payment APIs\n\n\
        Technical Skills\nRust, Python • SQL\n- Docker\nrust\n";

    fn parsed() -> ParsedResume {
        ResumeParser::new().unwrap().parse(RESUME)
    }

    #[test]
    fn test_sections_split_on_headers() {
        let resume = parsed();
        let names: Vec<_> = resume.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["HEADER", "SUMMARY", "EXPERIENCE", "TECHNICAL SKILLS"]);
        assert_eq!(
            resume.section("EXPERIENCE"),
            Some("Acme Corp - Senior Engineer\nBuilt payment APIs")
        );
    }

    #[test]
    fn test_contact_info() {
        let contact = parsed().contact_info;
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(contact.phone.as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_skills_from_skill_sections() {
        assert_eq!(parsed().skills, vec!["Rust", "Python", "SQL", "Docker"]);
    }

    #[test]
    fn test_header_only_text() {
        let sections = extract_sections("SKILLS\n\nEDUCATION\n");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_no_contact_info() {
        let contact = ResumeParser::new()
            .unwrap()
            .extract_contact_info("no details here");
        assert_eq!(contact, ContactInfo::default());
    }
}
