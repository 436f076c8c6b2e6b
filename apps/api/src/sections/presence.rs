use crate::models::resume::ResumeDocument;
use crate::sections::key::SectionKey;

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Whether `key` has anything to render. Templates skip the whole section
/// (heading included) when this is false.
pub fn has_content(doc: &ResumeDocument, key: SectionKey) -> bool {
    match key {
        SectionKey::Summary => filled(&doc.personal_info.summary),
        SectionKey::Experience => doc
            .experience
            .iter()
            .any(|e| filled(&e.job_title) || filled(&e.company)),
        SectionKey::Projects => doc
            .projects
            .iter()
            .any(|p| filled(&p.title) || filled(&p.description)),
        SectionKey::Education => doc
            .education
            .iter()
            .any(|e| filled(&e.degree) || filled(&e.institution)),
        SectionKey::Skills => doc
            .skills
            .iter()
            .any(|g| filled(&g.category) || g.items.iter().any(|i| filled(i))),
        SectionKey::Certifications => doc
            .certifications
            .iter()
            .any(|c| filled(&c.name) || filled(&c.issuer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, SkillGroup,
    };

    fn skills(category: &str, items: &[&str]) -> ResumeDocument {
        ResumeDocument {
            skills: vec![SkillGroup {
                category: category.to_string(),
                items: items.iter().map(|s| s.to_string()).collect(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_document_has_no_content_anywhere() {
        let doc = ResumeDocument::default();
        for key in SectionKey::ALL {
            assert!(!has_content(&doc, key), "{key}");
        }
    }

    #[test]
    fn test_experience_requires_title_or_company() {
        let mut doc = ResumeDocument {
            experience: vec![ExperienceEntry::default()],
            ..Default::default()
        };
        assert!(!has_content(&doc, SectionKey::Experience));

        doc.experience[0].job_title = "Engineer".to_string();
        assert!(has_content(&doc, SectionKey::Experience));

        doc.experience[0].job_title = "   ".to_string();
        doc.experience[0].responsibilities = vec!["Wrote code".to_string()];
        assert!(!has_content(&doc, SectionKey::Experience));
    }

    #[test]
    fn test_skills_blank_items_do_not_count() {
        assert!(!has_content(&skills("", &["", " "]), SectionKey::Skills));
        assert!(has_content(&skills("", &["Go"]), SectionKey::Skills));
        assert!(has_content(&skills("Languages", &[]), SectionKey::Skills));
    }

    #[test]
    fn test_summary_is_trimmed() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.summary = "\n\t ".to_string();
        assert!(!has_content(&doc, SectionKey::Summary));
        doc.personal_info.summary = "Builder of things.".to_string();
        assert!(has_content(&doc, SectionKey::Summary));
    }

    #[test]
    fn test_other_sections_use_their_identifying_fields() {
        let doc = ResumeDocument {
            projects: vec![ProjectEntry {
                description: "A compiler".to_string(),
                ..Default::default()
            }],
            education: vec![EducationEntry {
                gpa: "4.0".to_string(),
                ..Default::default()
            }],
            certifications: vec![CertificationEntry {
                issuer: "CNCF".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(has_content(&doc, SectionKey::Projects));
        assert!(!has_content(&doc, SectionKey::Education));
        assert!(has_content(&doc, SectionKey::Certifications));
    }
}
