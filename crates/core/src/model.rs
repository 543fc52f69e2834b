#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Default expression language for component text.
pub const DEFAULT_LANGUAGE: &str = "pt";

/// Structural kind of a component in the document hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Norm,
    Title,
    Chapter,
    Section,
    Subsection,
    Article,
    Paragraph,
    Item,
    Letter,
}

impl ComponentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Norm => "norm",
            Self::Title => "title",
            Self::Chapter => "chapter",
            Self::Section => "section",
            Self::Subsection => "subsection",
            Self::Article => "article",
            Self::Paragraph => "paragraph",
            Self::Item => "item",
            Self::Letter => "letter",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "norm" => Some(Self::Norm),
            "title" => Some(Self::Title),
            "chapter" => Some(Self::Chapter),
            "section" => Some(Self::Section),
            "subsection" => Some(Self::Subsection),
            "article" => Some(Self::Article),
            "paragraph" => Some(Self::Paragraph),
            "item" => Some(Self::Item),
            "letter" => Some(Self::Letter),
            _ => None,
        }
    }

    /// Articles and below carry normative text; everything above is a
    /// structural connector that at most carries a heading.
    pub fn is_text_bearing(self) -> bool {
        matches!(
            self,
            Self::Article | Self::Paragraph | Self::Item | Self::Letter
        )
    }
}

/// What an amendment does to one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Modify,
    Add,
    Repeal,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modify => "modify",
            Self::Add => "add",
            Self::Repeal => "repeal",
        }
    }
}

/// Why a CTV beyond version 1 exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreatedBy {
    Amendment,
    AmendmentPropagation,
}

impl CreatedBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amendment => "amendment",
            Self::AmendmentPropagation => "amendment_propagation",
        }
    }
}
