//! Category tokens shared by toggles, counts and the preference store

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, SelectableElement};
use crate::error::PaletteError;

/// UI bucket an element is shown, counted and pinned under.
///
/// Mirrors `Category` except that connectors are split into plain and
/// specialized (title-prefix marked) buckets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CategoryToken {
    #[serde(rename = "eip")]
    MessageFlow,
    #[serde(rename = "components")]
    Connector,
    #[serde(rename = "kamelets")]
    Snippet,
    #[serde(rename = "zsegment-components")]
    SpecializedConnector,
    #[serde(rename = "interface-sources")]
    InterfaceSource,
    #[serde(rename = "interface-targets")]
    InterfaceTarget,
}

impl CategoryToken {
    pub const ALL: [CategoryToken; 6] = [
        CategoryToken::MessageFlow,
        CategoryToken::Connector,
        CategoryToken::Snippet,
        CategoryToken::SpecializedConnector,
        CategoryToken::InterfaceSource,
        CategoryToken::InterfaceTarget,
    ];

    /// Wire string, used as toggle id and preference partition key
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryToken::MessageFlow => "eip",
            CategoryToken::Connector => "components",
            CategoryToken::Snippet => "kamelets",
            CategoryToken::SpecializedConnector => "zsegment-components",
            CategoryToken::InterfaceSource => "interface-sources",
            CategoryToken::InterfaceTarget => "interface-targets",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryToken::MessageFlow => "EIP",
            CategoryToken::Connector => "Components",
            CategoryToken::Snippet => "Kamelets",
            CategoryToken::SpecializedConnector => "ZSegment Components",
            CategoryToken::InterfaceSource => "Interface Sources",
            CategoryToken::InterfaceTarget => "Interface Targets",
        }
    }
}

impl fmt::Display for CategoryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryToken {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryToken::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PaletteError::UnknownToken(s.to_string()))
    }
}

/// The one mapping from element to bucket.
/// `prefix_lower` is the lowercase specialized-connector title marker.
pub fn effective_token(element: &SelectableElement, prefix_lower: &str) -> CategoryToken {
    match element.category {
        Category::MessageFlow => CategoryToken::MessageFlow,
        Category::Connector if element.has_title_prefix(prefix_lower) => {
            CategoryToken::SpecializedConnector
        }
        Category::Connector => CategoryToken::Connector,
        Category::Snippet => CategoryToken::Snippet,
        Category::InterfaceSource => CategoryToken::InterfaceSource,
        Category::InterfaceTarget => CategoryToken::InterfaceTarget,
    }
}
