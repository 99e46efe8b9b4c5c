pub mod resume;

pub use resume::{
    EducationEntry, ExperienceEntry, Links, ModelError, PersonalInfo,
    ProjectEntry, ResumeEntry, ResumeModel, SkillCategory, SkillSet,
};
