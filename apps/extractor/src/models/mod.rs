pub mod cv;
pub mod report;

pub use cv::{ContactInfo, EducationEntry, ExperienceEntry, LanguageSkill, Project, StructuredCv};
pub use report::{Provenance, ProcessingResult, ValidationChecks, ValidationReport};
