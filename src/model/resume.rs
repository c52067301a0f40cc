//! Résumé document types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A complete résumé document.
///
/// Every section is optional; the exporter skips absent sections entirely,
/// emitting no placeholder headings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    /// Identity, contact details, summary, and highlights.
    #[serde(default)]
    pub profile: Profile,

    /// Work history, most recent first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experience: Vec<ExperienceEntry>,

    /// Grouped skill listings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<SkillGroup>,

    /// Education history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<EducationEntry>,
}

impl ResumeDocument {
    /// Load a résumé document from JSON with boundary validation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Return a copy with experience bullets filtered for the given audience.
    ///
    /// Bullets without tags are audience-neutral and always kept.
    pub fn for_audience(&self, audience: Audience) -> Self {
        if audience == Audience::All {
            return self.clone();
        }
        let mut doc = self.clone();
        for entry in &mut doc.experience {
            entry
                .bullets
                .retain(|bullet| bullet.matches_audience(audience));
        }
        doc
    }
}

/// Identity and headline information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Free-form summary text; may contain multiple paragraphs separated by
    /// blank lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Ordered label/value pairs shown as headline chips.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Highlight>,

    /// External profile links, label to URL.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, String>,
}

impl Profile {
    /// Check whether there is anything to render for the header section.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.title.is_none()
            && self.location.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.links.is_empty()
    }
}

/// One label/value headline pair, e.g. `Unreal Engine 5: Expert`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub label: String,
    pub value: String,
}

/// One work-history entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    /// Explicit display text for the date range; overrides `start`/`end`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Current position; substitutes "Present" for a missing `end`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub present: bool,

    /// Pre-formatted duration text, e.g. `2 yrs 3 mos`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<Bullet>,
}

impl ExperienceEntry {
    /// Heading text: role and company joined when both are present.
    pub fn heading(&self) -> String {
        match (trimmed(&self.role), trimmed(&self.company)) {
            (Some(role), Some(company)) => format!("{role} — {company}"),
            (Some(role), None) => role.to_string(),
            (None, Some(company)) => company.to_string(),
            (None, None) => String::new(),
        }
    }

    /// The displayed date range.
    ///
    /// Precedence is uniform across every surface: explicit `display` text
    /// wins; otherwise `start — end`, with "Present" substituted for a
    /// missing end when the `present` flag is set.
    pub fn date_range(&self) -> Option<String> {
        if let Some(display) = trimmed(&self.display) {
            return Some(display.to_string());
        }
        let end = trimmed(&self.end)
            .map(str::to_string)
            .or_else(|| self.present.then(|| "Present".to_string()));
        match (trimmed(&self.start), end) {
            (Some(start), Some(end)) => Some(format!("{start} — {end}")),
            (Some(start), None) => Some(start.to_string()),
            (None, Some(end)) => Some(end),
            (None, None) => None,
        }
    }
}

fn trimmed(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// One experience bullet: a plain string, or text with audience tags.
///
/// Content documents carry both shapes, so this deserializes from either
/// `"Shipped the thing"` or `{"text": "...", "tags": ["tech"]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bullet {
    Plain(String),
    Tagged {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tags: Vec<String>,
    },
}

impl Bullet {
    /// The bullet text regardless of shape.
    pub fn text(&self) -> &str {
        match self {
            Bullet::Plain(text) => text,
            Bullet::Tagged { text, .. } => text,
        }
    }

    /// Audience tags; empty for plain bullets.
    pub fn tags(&self) -> &[String] {
        match self {
            Bullet::Plain(_) => &[],
            Bullet::Tagged { tags, .. } => tags,
        }
    }

    /// Whether this bullet should be shown to the given audience.
    ///
    /// Untagged bullets apply to everyone.
    pub fn matches_audience(&self, audience: Audience) -> bool {
        let tags = self.tags();
        match audience {
            Audience::All => true,
            _ if tags.is_empty() => true,
            Audience::Technical => tags.iter().any(|t| t == "tech"),
            Audience::Management => tags.iter().any(|t| t == "mgr"),
        }
    }
}

impl From<&str> for Bullet {
    fn from(text: &str) -> Self {
        Bullet::Plain(text.to_string())
    }
}

/// A named group of skills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub group: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Title of a thesis or final project, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_work: Option<String>,
}

/// Which reader the experience bullets are selected for.
///
/// Always passed explicitly; there is no process-global audience state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Every bullet.
    #[default]
    All,
    /// Bullets tagged `tech` (plus untagged ones).
    #[serde(rename = "tech")]
    Technical,
    /// Bullets tagged `mgr` (plus untagged ones).
    #[serde(rename = "mgr")]
    Management,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ExperienceEntry {
        ExperienceEntry {
            role: Some("Gameplay Programmer".to_string()),
            company: Some("Nevith Games".to_string()),
            start: Some("Aug 2023".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_date_range_display_wins() {
        let mut e = entry();
        e.end = Some("Jul 2024".to_string());
        e.display = Some("2023–2024".to_string());
        assert_eq!(e.date_range().as_deref(), Some("2023–2024"));
    }

    #[test]
    fn test_date_range_present_substitution() {
        let mut e = entry();
        e.present = true;
        assert_eq!(e.date_range().as_deref(), Some("Aug 2023 — Present"));
    }

    #[test]
    fn test_date_range_explicit_end_beats_present_flag() {
        let mut e = entry();
        e.end = Some("Jul 2024".to_string());
        e.present = true;
        assert_eq!(e.date_range().as_deref(), Some("Aug 2023 — Jul 2024"));
    }

    #[test]
    fn test_date_range_empty() {
        let e = ExperienceEntry::default();
        assert_eq!(e.date_range(), None);
    }

    #[test]
    fn test_bullet_deserializes_both_shapes() {
        let bullets: Vec<Bullet> =
            serde_json::from_str(r#"["plain", {"text": "tagged", "tags": ["tech"]}]"#).unwrap();
        assert_eq!(bullets[0].text(), "plain");
        assert_eq!(bullets[1].tags(), ["tech".to_string()]);
    }

    #[test]
    fn test_audience_filter_keeps_untagged() {
        let doc = ResumeDocument {
            experience: vec![ExperienceEntry {
                bullets: vec![
                    Bullet::from("neutral"),
                    Bullet::Tagged {
                        text: "deep tech".to_string(),
                        tags: vec!["tech".to_string()],
                    },
                    Bullet::Tagged {
                        text: "led the team".to_string(),
                        tags: vec!["mgr".to_string()],
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        };

        let technical = doc.for_audience(Audience::Technical);
        let texts: Vec<&str> = technical.experience[0]
            .bullets
            .iter()
            .map(Bullet::text)
            .collect();
        assert_eq!(texts, vec!["neutral", "deep tech"]);

        assert_eq!(doc.for_audience(Audience::All), doc);
    }

    #[test]
    fn test_profile_defaults_from_empty_json() {
        let doc = ResumeDocument::from_json("{}").unwrap();
        assert!(doc.profile.is_empty());
        assert!(doc.experience.is_empty());
    }
}
