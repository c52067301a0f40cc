//! Résumé document model.
//!
//! The intermediate representation between loaded profile data and the PDF
//! exporter. Constructed fresh per invocation and discarded after use; the
//! renderer only ever reads it.

mod resume;

pub use resume::{
    Audience, Bullet, EducationEntry, ExperienceEntry, Highlight, Profile, ResumeDocument,
    SkillGroup,
};
