//! Paper identifiers and the asset file naming convention.

use crate::model::session::{year_suffix, Session};
use serde::{Deserialize, Serialize};

/// Artifact published for one paper variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    #[serde(rename = "qp")]
    QuestionPaper,
    #[serde(rename = "ms")]
    MarkScheme,
}

impl ArtifactKind {
    /// Both kinds, question paper first.
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::QuestionPaper, ArtifactKind::MarkScheme];

    pub fn code(self) -> &'static str {
        match self {
            Self::QuestionPaper => "qp",
            Self::MarkScheme => "ms",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "qp" => Some(Self::QuestionPaper),
            "ms" => Some(Self::MarkScheme),
            _ => None,
        }
    }
}

/// Fully qualified reference to one candidate asset file.
///
/// Generated, checked for existence and discarded; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperIdentifier<'a> {
    pub subject_code: &'a str,
    pub year: i32,
    pub session: Session,
    pub paper_number: &'a str,
    pub variant: &'a str,
    pub kind: ArtifactKind,
}

impl PaperIdentifier<'_> {
    /// File name following
    /// `{subject}_{session}{yy}_{kind}_{paper}{variant}.pdf`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}{}_{}_{}{}.pdf",
            self.subject_code,
            self.session.code(),
            year_suffix(self.year),
            self.kind.code(),
            self.paper_number,
            self.variant
        )
    }
}
