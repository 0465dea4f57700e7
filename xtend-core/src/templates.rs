//! Built-in templates of the generated PHP files.

use crate::technology::Technology;

pub const MODULE: &str = include_str!("../templates/module/module.mustache");

/// Templates of the classes generated for one technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassTemplates {
    pub entity: &'static str,
    pub repository: &'static str,
}

impl ClassTemplates {
    /// Built-in templates, `None` for technologies that generate no classes.
    pub fn for_technology(technology: Technology) -> Option<Self> {
        match technology {
            Technology::Orm => Some(ClassTemplates {
                entity: include_str!("../templates/orm/entity.mustache"),
                repository: include_str!("../templates/orm/repository.mustache"),
            }),
            Technology::Odm => Some(ClassTemplates {
                entity: include_str!("../templates/odm/document.mustache"),
                repository: include_str!("../templates/odm/repository.mustache"),
            }),
            Technology::Phpcr => Some(ClassTemplates {
                entity: include_str!("../templates/phpcr/document.mustache"),
                repository: include_str!("../templates/phpcr/repository.mustache"),
            }),
            Technology::Serializer => None,
        }
    }
}
