//! Character domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assets;
use crate::error::{CatrineandoError, Result};

/// Maximum number of characters accepted for a character name.
pub const NAME_MAX_CHARS: usize = 20;

/// The two fixed character variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Catrin,
    Catrina,
}

impl Gender {
    /// All variants, in the order the creation form offers them.
    pub const ALL: [Gender; 2] = [Gender::Catrin, Gender::Catrina];

    /// Storage identifier (`catrin` / `catrina`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Catrin => "catrin",
            Gender::Catrina => "catrina",
        }
    }

    /// Human-readable label with its accent.
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Catrin => "Catrín",
            Gender::Catrina => "Catrina",
        }
    }

    /// Label with its Spanish article, as used in share titles ("el Catrín").
    pub fn with_article(&self) -> &'static str {
        match self {
            Gender::Catrin => "el Catrín",
            Gender::Catrina => "la Catrina",
        }
    }

    /// Emoji shown on the gender picker.
    pub fn emoji(&self) -> &'static str {
        match self {
            Gender::Catrin => "🎩",
            Gender::Catrina => "👗",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CatrineandoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "catrin" | "catrín" => Ok(Gender::Catrin),
            "catrina" => Ok(Gender::Catrina),
            other => Err(CatrineandoError::validation(
                "gender",
                format!("unknown character '{}', expected catrin or catrina", other),
            )),
        }
    }
}

/// The caller-supplied part of a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDraft {
    pub name: String,
    pub gender: Gender,
    pub image_index: usize,
}

impl CharacterDraft {
    pub fn new(name: impl Into<String>, gender: Gender, image_index: usize) -> Self {
        Self {
            name: name.into(),
            gender,
            image_index,
        }
    }

    /// Checks the draft and returns it with a trimmed name.
    ///
    /// Rejects an empty name, a name longer than [`NAME_MAX_CHARS`] and an
    /// image index outside the bundled set for the gender.
    pub fn validate(self) -> Result<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatrineandoError::validation(
                "name",
                "Por favor ingresa tu nombre",
            ));
        }

        let length = name.chars().count();
        if length > NAME_MAX_CHARS {
            return Err(CatrineandoError::validation(
                "name",
                format!(
                    "name has {} characters, at most {} are allowed",
                    length, NAME_MAX_CHARS
                ),
            ));
        }

        let count = assets::image_count(self.gender);
        if self.image_index >= count {
            return Err(CatrineandoError::validation(
                "image_index",
                format!(
                    "image index {} is out of range for {} (0..{})",
                    self.image_index, self.gender, count
                ),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            gender: self.gender,
            image_index: self.image_index,
        })
    }
}

/// A created character. Never modified after the store hands it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Unique identifier derived from the creation time in milliseconds.
    pub id: String,
    pub name: String,
    pub gender: Gender,
    /// Index into the bundled illustrations of `gender`.
    pub image_index: usize,
    /// Path of an exported image, if one was ever recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Character {
    /// Materializes a validated draft with store-assigned fields.
    pub fn from_draft(
        id: impl Into<String>,
        draft: CharacterDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            gender: draft.gender,
            image_index: draft.image_index,
            image_uri: None,
            created_at,
        }
    }

    /// The bundled illustration this character renders with.
    pub fn image(&self) -> &'static assets::BundledImage {
        assets::resolve(self.gender, self.image_index as i64)
    }

    /// Returns true when `image_index` is valid for `gender`.
    pub fn has_valid_image(&self) -> bool {
        self.image_index < assets::image_count(self.gender)
    }
}
