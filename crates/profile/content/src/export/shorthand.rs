//! Compact one-line profile notation.
//!
//! `Kai:{Maker@60%[power:N(5,1),label:X];explorer@100%[energy:~6±1.5]}`

use tanzo_core::{Archetype, Attribute, Distribution, DistributionKind, Profile, TraitScore, ValueSpec};

const MAX_ATTRIBUTES: usize = 3;

/// Renders a profile as `name:{archetype@W%[attr:value,...];...}`.
pub fn profile_shorthand(profile: &Profile) -> String {
    let archetypes: Vec<String> = profile.archetypes.iter().map(archetype_shorthand).collect();
    format!("{}:{{{}}}", profile.name, archetypes.join(";"))
}

fn archetype_shorthand(archetype: &Archetype) -> String {
    let weight = (archetype.weight.unwrap_or(1.0) * 100.0).round() as i64;
    let attributes: Vec<String> = ranked(&archetype.attributes)
        .into_iter()
        .take(MAX_ATTRIBUTES)
        .map(|attr| format!("{}:{}", attr.name, value_shorthand(&attr.value)))
        .collect();

    format!(
        "{}@{}%[{}]",
        archetype.display_name(),
        weight,
        attributes.join(",")
    )
}

/// Fixed numbers first, highest value first; everything else after them in
/// declaration order.
fn ranked(attributes: &[Attribute]) -> Vec<&Attribute> {
    let fixed_number = |attr: &Attribute| match &attr.value {
        ValueSpec::Fixed(value) => value.as_number(),
        _ => None,
    };

    let mut numbers: Vec<(&Attribute, f64)> = attributes
        .iter()
        .filter_map(|attr| fixed_number(attr).map(|n| (attr, n)))
        .collect();
    // Stable sort keeps declaration order among equal values.
    numbers.sort_by(|a, b| b.1.total_cmp(&a.1));

    numbers
        .into_iter()
        .map(|(attr, _)| attr)
        .chain(attributes.iter().filter(|attr| fixed_number(*attr).is_none()))
        .collect()
}

fn value_shorthand(value: &ValueSpec) -> String {
    match value {
        ValueSpec::Fixed(value) => value.to_string(),
        ValueSpec::Distribution(dist) => distribution_shorthand(dist),
        ValueSpec::Score(score) => score_shorthand(score),
    }
}

/// Compact form of a distribution: `N(5,1)`, `U(0,10)`, `T(2,8,5)`,
/// `E(0,9)`, `D(a|b)` or `~6±1.5`.
pub fn distribution_shorthand(dist: &Distribution) -> String {
    match dist {
        Distribution::Normal(spec) => format!("N({},{})", spec.mean(), spec.std_dev()),
        Distribution::Uniform(spec) => format!("U({},{})", spec.min(), spec.max()),
        Distribution::Triangular(spec) => {
            format!("T({},{},{})", spec.min(), spec.max(), spec.mode())
        }
        Distribution::Exponential(spec) => format!("E({},{})", spec.min(), spec.max()),
        Distribution::Discrete(spec) => {
            let values: Vec<String> = spec.values().iter().map(ToString::to_string).collect();
            format!("D({})", values.join("|"))
        }
        Distribution::VarianceScalar(spec) => spread(spec.base(), spec.variance()),
    }
}

fn score_shorthand(score: &TraitScore) -> String {
    let Some((min, max)) = score.range else {
        return spread(score.base, score.variance);
    };

    match score.distribution {
        Some(DistributionKind::Normal) => format!("N({},{})", score.base, (max - min) / 4.0),
        Some(DistributionKind::Uniform) => format!("U({},{})", min, max),
        Some(DistributionKind::Exponential) => format!("E({},{})", min, max),
        _ => format!("T({},{},{})", min, max, score.base),
    }
}

fn spread(base: f64, variance: Option<f64>) -> String {
    match variance {
        Some(variance) if variance > 0.0 => format!("~{}±{}", base, variance),
        _ => format!("~{}", base),
    }
}
