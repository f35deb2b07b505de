//! Structural validation and conversion into the core model.
//!
//! Validation walks the whole document and reports every problem it finds,
//! not only the first one. Distribution parameters are checked by building
//! the core [`Distribution`] values, so the rules live in one place.

use std::collections::HashSet;
use std::fmt;

use tanzo_core::{
    Archetype, Attribute, ConfigurationError, Distribution, DistributionError, Profile,
    SimulationConfig, Typology, ValueDomain, ValueSpec,
};
use tracing::debug;

use crate::document::{
    ArchetypeDocument, AttributeDocument, DistributionDocument, ProfileDocument,
    SimulationSettings, TypologyDocument, ValueDocument,
};

/// Fields each well-known typology system must carry. Other systems are
/// free-form.
const REQUIRED_TYPOLOGY_FIELDS: &[(&str, &[&str])] = &[
    ("zodiac", &["sun"]),
    ("kabbalah", &["primary_sefira"]),
    (
        "purpose_quadrant",
        &["passion", "expertise", "contribution", "sustainability"],
    ),
];

/// A single structural problem in a profile document.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("version '{0}' is not of the form MAJOR.MINOR.PATCH")]
    InvalidVersion(String),

    #[error("profile name must not be empty")]
    EmptyProfileName,

    #[error("profile must define at least one archetype")]
    NoArchetypes,

    #[error("archetype #{index} has neither a name nor a type")]
    UnnamedArchetype { index: usize },

    #[error("archetype '{0}' is defined more than once")]
    DuplicateArchetype(String),

    #[error("archetype '{archetype}' weight must lie in [0, 1], got {weight}")]
    WeightOutOfRange { archetype: String, weight: f64 },

    #[error("archetype '{0}' must define at least one attribute")]
    NoAttributes(String),

    #[error("archetype '{archetype}' attribute #{index} has an empty name")]
    UnnamedAttribute { archetype: String, index: usize },

    #[error("archetype '{archetype}' defines attribute '{attribute}' more than once")]
    DuplicateAttribute { archetype: String, attribute: String },

    #[error("attribute '{archetype}.{attribute}': {source}")]
    Distribution {
        archetype: String,
        attribute: String,
        #[source]
        source: DistributionError,
    },

    #[error("typology system names must not be empty")]
    UnnamedTypology,

    #[error("typology '{system}' is missing required field '{field}'")]
    MissingTypologyField { system: String, field: String },

    #[error("simulation parameters: {0}")]
    Simulation(#[from] ConfigurationError),
}

/// Every problem found in one document.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile is invalid ({} problem(s))", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ProfileDocument {
    /// Checks the document without converting it.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.convert().map(|_| ())
    }

    /// Validates and converts into a core profile.
    pub fn into_profile(self) -> Result<Profile, ValidationErrors> {
        self.convert()
    }

    /// Simulation defaults declared by the document, applied over
    /// [`SimulationConfig::default`].
    pub fn simulation_defaults(&self) -> SimulationConfig {
        self.settings().apply(SimulationConfig::default())
    }

    /// The document's `simulation` block, or empty settings.
    pub fn settings(&self) -> SimulationSettings {
        self.profile.simulation.clone().unwrap_or_default()
    }

    fn convert(&self) -> Result<Profile, ValidationErrors> {
        let mut errors = Vec::new();

        if !is_semver(&self.version) {
            errors.push(ValidationError::InvalidVersion(self.version.clone()));
        }
        if self.profile.name.trim().is_empty() {
            errors.push(ValidationError::EmptyProfileName);
        }
        if self.profile.archetypes.is_empty() {
            errors.push(ValidationError::NoArchetypes);
        }
        if let Some(settings) = &self.profile.simulation {
            validate_settings(settings, &mut errors);
        }

        let defaults = self.simulation_defaults();
        let mut profile = Profile::new(self.profile.name.clone(), self.version.clone());
        for (system, doc) in &self.profile.typologies {
            if let Some(fields) = convert_typology(system, doc, &mut errors) {
                profile.typologies.insert(system.clone(), fields);
            }
        }

        let mut seen = HashSet::new();
        for (index, doc) in self.profile.archetypes.iter().enumerate() {
            let Some(name) = doc.display_name() else {
                errors.push(ValidationError::UnnamedArchetype { index });
                continue;
            };
            if !seen.insert(name.to_string()) {
                errors.push(ValidationError::DuplicateArchetype(name.to_string()));
            }
            if let Some(archetype) = convert_archetype(doc, name, &defaults, &mut errors) {
                profile.archetypes.push(archetype);
            }
        }

        if errors.is_empty() {
            debug!(
                target: "tanzo::content",
                profile = %profile.name,
                archetypes = profile.archetypes.len(),
                attributes = profile.attribute_count(),
                typologies = profile.typologies.len(),
                "profile validated"
            );
            Ok(profile)
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

fn convert_typology(
    system: &str,
    doc: &TypologyDocument,
    errors: &mut Vec<ValidationError>,
) -> Option<Typology> {
    if system.trim().is_empty() {
        errors.push(ValidationError::UnnamedTypology);
        return None;
    }

    let fields: Typology = doc
        .iter()
        .filter_map(|(key, value)| Some((key.clone(), value.clone()?)))
        .collect();

    let before = errors.len();
    let required = REQUIRED_TYPOLOGY_FIELDS
        .iter()
        .find(|(name, _)| *name == system)
        .map_or(&[][..], |(_, fields)| *fields);
    for field in required.iter().filter(|f| !fields.contains_key(**f)) {
        errors.push(ValidationError::MissingTypologyField {
            system: system.to_string(),
            field: field.to_string(),
        });
    }

    (errors.len() == before).then_some(fields)
}

fn convert_archetype(
    doc: &ArchetypeDocument,
    name: &str,
    defaults: &SimulationConfig,
    errors: &mut Vec<ValidationError>,
) -> Option<Archetype> {
    let before = errors.len();

    if let Some(weight) = doc.weight.filter(|w| !(0.0..=1.0).contains(w)) {
        errors.push(ValidationError::WeightOutOfRange {
            archetype: name.to_string(),
            weight,
        });
    }
    if doc.attributes.is_empty() {
        errors.push(ValidationError::NoAttributes(name.to_string()));
    }

    let mut archetype = Archetype::new(doc.kind.clone().unwrap_or_else(|| name.to_string()));
    archetype.name = doc.name.clone();
    archetype.weight = doc.weight;
    archetype.environments = doc.environments.clone();

    let mut seen = HashSet::new();
    for (index, attr) in doc.attributes.iter().enumerate() {
        if attr.name.trim().is_empty() {
            errors.push(ValidationError::UnnamedAttribute {
                archetype: name.to_string(),
                index,
            });
            continue;
        }
        if !seen.insert(attr.name.as_str()) {
            errors.push(ValidationError::DuplicateAttribute {
                archetype: name.to_string(),
                attribute: attr.name.clone(),
            });
            continue;
        }
        match convert_attribute(attr, defaults) {
            Ok(attribute) => archetype.attributes.push(attribute),
            Err(source) => errors.push(ValidationError::Distribution {
                archetype: name.to_string(),
                attribute: attr.name.clone(),
                source,
            }),
        }
    }

    (errors.len() == before).then_some(archetype)
}

/// Score forms are resolved against the document's own domain and variation
/// factor, the same way the engine resolves them before sampling.
fn convert_attribute(
    doc: &AttributeDocument,
    defaults: &SimulationConfig,
) -> Result<Attribute, DistributionError> {
    let value = match &doc.value {
        ValueDocument::Fixed(value) => ValueSpec::Fixed(value.clone()),
        ValueDocument::Score(score) => {
            score.resolve(defaults.domain, defaults.variation_factor)?;
            ValueSpec::Score(score.clone())
        }
        ValueDocument::Distribution(dist) => ValueSpec::Distribution(build_distribution(dist)?),
    };

    Ok(Attribute {
        name: doc.name.clone(),
        value,
        unit: doc.unit.clone(),
        description: doc.description.clone(),
    })
}

/// Builds (and thereby validates) a core distribution.
pub fn build_distribution(doc: &DistributionDocument) -> Result<Distribution, DistributionError> {
    match doc {
        DistributionDocument::Normal {
            mean,
            std_dev,
            bounds: None,
        } => Distribution::normal(*mean, *std_dev),
        DistributionDocument::Normal {
            mean,
            std_dev,
            bounds: Some((min, max)),
        } => Distribution::bounded_normal(*mean, *std_dev, ValueDomain::new(*min, *max)?),
        DistributionDocument::Uniform { min, max } => Distribution::uniform(*min, *max),
        DistributionDocument::Discrete { values, weights } => {
            Distribution::discrete(values.clone(), weights.clone())
        }
        DistributionDocument::Exponential { min, max } => Distribution::exponential(*min, *max),
        DistributionDocument::Triangular { min, max, mode } => {
            Distribution::triangular(*min, *max, *mode)
        }
    }
}

fn validate_settings(settings: &SimulationSettings, errors: &mut Vec<ValidationError>) {
    if settings.iterations == Some(0) {
        errors.push(ConfigurationError::ZeroIterations.into());
    }
    if let Some(factor) = settings.variation_factor.filter(|f| !(0.0..=1.0).contains(f)) {
        errors.push(ConfigurationError::InvalidVariationFactor(factor).into());
    }
}

fn is_semver(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}
