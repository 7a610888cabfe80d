use serde::Serialize;

use crate::domain::{
    entities::{common::RelativePath, template::TemplateId},
    error::DomainError,
};

/// Fully rendered output of a dry run, ready for the committer.
///
/// Contains no behaviour beyond its own consistency checks. Files keep the
/// catalog's registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    pub(crate) files: Vec<PlannedFile>,
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file, rejecting a second file at the same path.
    pub fn push(&mut self, file: PlannedFile) -> Result<(), DomainError> {
        if self.files.iter().any(|f| f.path == file.path) {
            return Err(DomainError::DuplicatePath {
                path: file.path.to_string(),
            });
        }
        self.files.push(file);
        Ok(())
    }

    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(PlannedFile::size).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    #[serde(serialize_with = "serialize_display")]
    pub template_id: TemplateId,
    #[serde(serialize_with = "serialize_display")]
    pub path: RelativePath,
    #[serde(skip)]
    pub content: String,
}

impl PlannedFile {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

fn serialize_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
