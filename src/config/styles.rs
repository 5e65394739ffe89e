//! Logo style catalog: one entry per registered logo command.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RESERVED_COMMANDS;
use crate::logo::{ServiceEndpoint, ServiceVariant};

/// Errors that can occur while loading or validating a style catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Style at index {index} has an empty command name")]
    EmptyName { index: usize },

    #[error("Style '{name}' has an invalid command name (no whitespace allowed)")]
    InvalidName { name: String },

    #[error("Style '{name}' clashes with a built-in command")]
    ReservedName { name: String },

    #[error("Duplicate command name found: {name}")]
    DuplicateName { name: String },

    #[error("Style '{name}' has an empty template id")]
    EmptyTemplate { name: String },

    #[error("Style '{name}' has an invalid template id: {template}")]
    InvalidTemplate { name: String, template: String },

    #[error("Style '{name}' has an empty default for its second text")]
    EmptyDefault { name: String },

    #[error("No styles configured")]
    NoStyles,

    #[error("Failed to read style catalog: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse style catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// How a command turns its argument string into the two logo texts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum InputForm {
    /// The whole argument is the first text; the second text is fixed.
    Single { secondary: String },

    /// `text1;text2`, both required.
    Pair,

    /// `text1;text2`, where the second text falls back to a default.
    PairOptional { secondary: String },
}

impl InputForm {
    /// Returns the default second text, if this form has one.
    #[must_use]
    pub fn default_secondary(&self) -> Option<&str> {
        match self {
            Self::Single { secondary } | Self::PairOptional { secondary } => Some(secondary),
            Self::Pair => None,
        }
    }

    /// Returns the argument placeholder shown in usage hints.
    #[must_use]
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Single { .. } => "WASI",
            Self::Pair => "text1;text2",
            Self::PairOptional { .. } => "text1",
        }
    }
}

/// A single registered logo command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoStyle {
    /// Command name, matched case-insensitively after the prefix.
    pub name: String,

    /// Short description shown in the menu.
    #[serde(default = "default_info")]
    pub info: String,

    /// Menu category.
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Path fragment of the template on the logo service.
    pub template: String,

    /// Service token, classified into a [`ServiceVariant`].
    #[serde(default = "default_service")]
    pub service: String,

    /// How arguments map onto the two texts.
    pub input: InputForm,
}

fn default_info() -> String {
    "Some text to image feature with various styles.".to_owned()
}

fn default_kind() -> String {
    "logo".to_owned()
}

fn default_service() -> String {
    "textpro".to_owned()
}

impl LogoStyle {
    /// Creates a style with the default info text and category.
    #[must_use]
    pub fn new(name: &str, template: &str, service: &str, input: InputForm) -> Self {
        Self {
            name: name.to_owned(),
            info: default_info(),
            kind: default_kind(),
            template: template.to_owned(),
            service: service.to_owned(),
            input,
        }
    }

    /// Returns the service variant this style is hosted on.
    #[must_use]
    pub fn variant(&self) -> ServiceVariant {
        ServiceVariant::classify(&self.service)
    }

    /// Returns the resolved template endpoint.
    #[must_use]
    pub fn endpoint(&self) -> ServiceEndpoint {
        ServiceEndpoint::resolve(self.variant(), &self.template)
    }
}

/// The set of logo commands the bot answers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleCatalog {
    /// Registered styles, in menu order.
    pub styles: Vec<LogoStyle>,
}

impl StyleCatalog {
    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Self = serde_json::from_str(&content)?;
        Ok(catalog)
    }

    /// Saves the catalog to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates every style in the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.styles.is_empty() {
            return Err(CatalogError::NoStyles);
        }

        let mut seen = HashSet::new();
        for (index, style) in self.styles.iter().enumerate() {
            validate_style(index, style)?;
            if !seen.insert(style.name.to_lowercase()) {
                return Err(CatalogError::DuplicateName {
                    name: style.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Returns a validation result for each style, for reporting.
    #[must_use]
    pub fn validate_all(&self) -> Vec<Result<(), CatalogError>> {
        if self.styles.is_empty() {
            return vec![Err(CatalogError::NoStyles)];
        }

        let mut seen = HashSet::new();
        self.styles
            .iter()
            .enumerate()
            .map(|(index, style)| {
                validate_style(index, style)?;
                if seen.insert(style.name.to_lowercase()) {
                    Ok(())
                } else {
                    Err(CatalogError::DuplicateName {
                        name: style.name.clone(),
                    })
                }
            })
            .collect()
    }

    /// Finds a style by command name (case-insensitive).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&LogoStyle> {
        self.styles
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Returns the number of styles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Checks if there are no styles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Returns the twelve built-in logo commands.
    #[must_use]
    pub fn builtin() -> Self {
        let single = |secondary: &str| InputForm::Single {
            secondary: secondary.to_owned(),
        };

        Self {
            styles: vec![
                LogoStyle::new(
                    "logo1",
                    "hieu-ung-chu/tao-hieu-ung-chu-mam-anh-sang-74",
                    "1",
                    single("ser"),
                ),
                LogoStyle::new(
                    "logo2",
                    "tao-hieu-ung-chu-digital-glitch-truc-tuyen-941",
                    "1",
                    single("WASI"),
                ),
                LogoStyle::new(
                    "logo3",
                    "tao-hieu-ung-chu-pixel-glitch-truc-tuyen-940",
                    "1",
                    single("WASI"),
                ),
                LogoStyle::new(
                    "logo4",
                    "tao-hieu-ung-chu-graffiti-duong-pho-an-tuong-online-795",
                    "1",
                    single("WASI"),
                ),
                LogoStyle::new(
                    "logo5",
                    "hieu-ung-chu/chu-graffiti-online-mau-8-182",
                    "1",
                    single("WASI"),
                ),
                LogoStyle::new(
                    "logo6",
                    "tao-hieu-ung-chu-graffiti-sieu-ngau-online-794",
                    "textpro",
                    InputForm::Pair,
                ),
                LogoStyle::new(
                    "logo7",
                    "hieu-ung-chu/tao-cover-graffiti-online-181",
                    "1",
                    InputForm::PairOptional {
                        secondary: "ser".to_owned(),
                    },
                ),
                LogoStyle::new("logo8", "tao-logo-gradient-3d-truc-tuyen-501", "1", InputForm::Pair),
                LogoStyle::new("logo9", "tao-logo-chu-truc-tuyen-499", "1", InputForm::Pair),
                LogoStyle::new("logo10", "tao-logo-phong-cach-pornhub-612", "1", InputForm::Pair),
                LogoStyle::new("logo11", "tao-logo-3d-phong-cach-avengers-445", "1", InputForm::Pair),
                LogoStyle::new("logo12", "tao-logo-phong-cach-marvel-419", "1", InputForm::Pair),
            ],
        }
    }

    /// Creates an example catalog for users to reference.
    #[must_use]
    pub fn example() -> Self {
        let mut glitch = LogoStyle::new(
            "glitch",
            "tao-hieu-ung-chu-digital-glitch-truc-tuyen-941",
            "ephoto360",
            InputForm::Single {
                secondary: "WASI".to_owned(),
            },
        );
        glitch.info = "Digital glitch text effect".to_owned();

        let mut avengers = LogoStyle::new(
            "avengers",
            "tao-logo-3d-phong-cach-avengers-445",
            "ephoto360",
            InputForm::Pair,
        );
        avengers.info = "3D Avengers style logo (text1;text2)".to_owned();

        Self {
            styles: vec![glitch, avengers],
        }
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_style(index: usize, style: &LogoStyle) -> Result<(), CatalogError> {
    if style.name.is_empty() {
        return Err(CatalogError::EmptyName { index });
    }

    if style.name.chars().any(char::is_whitespace) {
        return Err(CatalogError::InvalidName {
            name: style.name.clone(),
        });
    }

    if RESERVED_COMMANDS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(&style.name))
    {
        return Err(CatalogError::ReservedName {
            name: style.name.clone(),
        });
    }

    if style.template.is_empty() {
        return Err(CatalogError::EmptyTemplate {
            name: style.name.clone(),
        });
    }

    if style.template.chars().any(char::is_whitespace) {
        return Err(CatalogError::InvalidTemplate {
            name: style.name.clone(),
            template: style.template.clone(),
        });
    }

    if style.input.default_secondary().is_some_and(str::is_empty) {
        return Err(CatalogError::EmptyDefault {
            name: style.name.clone(),
        });
    }

    Ok(())
}
