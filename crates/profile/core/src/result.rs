//! Simulation result: the contract handed to exporters and the CLI.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::profile::{Scalar, Typologies};

/// Descriptive statistics over a numeric attribute.
///
/// `std_dev` is the population standard deviation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NumericStat {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

/// Reduced view of one attribute across all iterations.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregateStat {
    Numeric(NumericStat),
    /// Observed fraction per value, keyed by the value's display string.
    /// Values never drawn have no entry.
    Categorical { frequencies: BTreeMap<String, f64> },
    Fixed { value: Scalar },
}

impl AggregateStat {
    pub fn as_numeric(&self) -> Option<&NumericStat> {
        match self {
            Self::Numeric(stat) => Some(stat),
            _ => None,
        }
    }

    pub fn frequency(&self, value: &str) -> Option<f64> {
        match self {
            Self::Categorical { frequencies } => frequencies.get(value).copied(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributeStats {
    pub name: String,
    pub stat: AggregateStat,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArchetypeStats {
    pub name: String,
    pub attributes: Vec<AttributeStats>,
}

impl ArchetypeStats {
    pub fn attribute(&self, name: &str) -> Option<&AggregateStat> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.stat)
    }
}

/// Aggregated statistics plus run metadata.
///
/// Archetypes keep profile order and attributes keep declaration order, so
/// serialized output and the text summary are stable for a given run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    pub profile_name: String,
    pub profile_version: String,
    pub iterations: u64,
    /// Effective base seed; pass it back to replay the run.
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub archetypes: Vec<ArchetypeStats>,
    /// Typology systems of the profile, passed through unchanged.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub typologies: Typologies,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl SimulationResult {
    pub fn archetype(&self, name: &str) -> Option<&ArchetypeStats> {
        self.archetypes.iter().find(|a| a.name == name)
    }

    /// Looks up the statistic for `archetype.attribute`.
    pub fn stat(&self, archetype: &str, attribute: &str) -> Option<&AggregateStat> {
        self.archetype(archetype)?.attribute(attribute)
    }

    #[must_use]
    pub fn with_typologies(mut self, typologies: Typologies) -> Self {
        self.typologies = typologies;
        self
    }

    /// Stores the rendered text summary in `summary`.
    #[must_use]
    pub fn with_summary(mut self) -> Self {
        self.summary = Some(self.render_summary());
        self
    }

    /// Plain-text report, one line per attribute.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_summary(&mut out);
        out
    }

    fn write_summary(&self, out: &mut String) -> fmt::Result {
        writeln!(
            out,
            "Profile '{}' v{}: {} iterations (seed {})",
            self.profile_name, self.profile_version, self.iterations, self.seed
        )?;
        if let Some(env) = &self.environment {
            writeln!(out, "Environment: {}", env)?;
        }

        for archetype in &self.archetypes {
            writeln!(out, "[{}]", archetype.name)?;
            for attribute in &archetype.attributes {
                write!(out, "  {}: ", attribute.name)?;
                match &attribute.stat {
                    AggregateStat::Numeric(s) => writeln!(
                        out,
                        "mean {:.3}, median {:.3}, std {:.3}, range [{:.3}, {:.3}]",
                        s.mean, s.median, s.std_dev, s.min, s.max
                    )?,
                    AggregateStat::Categorical { frequencies } => {
                        let mut entries: Vec<_> = frequencies.iter().collect();
                        // Most frequent first; ties by label.
                        entries.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
                        let parts: Vec<String> = entries
                            .into_iter()
                            .map(|(value, freq)| format!("{} {:.1}%", value, freq * 100.0))
                            .collect();
                        writeln!(out, "{}", parts.join(", "))?;
                    }
                    AggregateStat::Fixed { value } => writeln!(out, "{} (fixed)", value)?,
                }
            }
        }

        if !self.typologies.is_empty() {
            writeln!(out, "Typologies:")?;
            for (system, fields) in &self.typologies {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, value))
                    .collect();
                writeln!(out, "  {}: {}", system, parts.join(", "))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.summary {
            Some(summary) => f.write_str(summary),
            None => f.write_str(&self.render_summary()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulationResult {
        SimulationResult {
            profile_name: "Kai".into(),
            profile_version: "1.0.0".into(),
            iterations: 4,
            seed: 42,
            environment: Some("work".into()),
            archetypes: vec![ArchetypeStats {
                name: "Maker".into(),
                attributes: vec![
                    AttributeStats {
                        name: "power".into(),
                        stat: AggregateStat::Numeric(NumericStat {
                            mean: 5.0,
                            median: 5.0,
                            min: 4.0,
                            max: 6.0,
                            std_dev: 0.5,
                        }),
                    },
                    AttributeStats {
                        name: "mood".into(),
                        stat: AggregateStat::Categorical {
                            frequencies: BTreeMap::from([
                                ("high".to_string(), 0.25),
                                ("low".to_string(), 0.75),
                            ]),
                        },
                    },
                    AttributeStats {
                        name: "label".into(),
                        stat: AggregateStat::Fixed { value: "X".into() },
                    },
                ],
            }],
            typologies: Typologies::new(),
            summary: None,
        }
    }

    #[test]
    fn summary_is_ordered_and_stable() {
        let expected = "\
Profile 'Kai' v1.0.0: 4 iterations (seed 42)
Environment: work
[Maker]
  power: mean 5.000, median 5.000, std 0.500, range [4.000, 6.000]
  mood: low 75.0%, high 25.0%
  label: X (fixed)
";
        let result = sample();
        assert_eq!(result.render_summary(), expected);
        assert_eq!(result.clone().with_summary().to_string(), expected);
    }

    #[test]
    fn typologies_follow_the_archetypes() {
        let mut result = sample();
        result.environment = None;
        result.archetypes.clear();
        result = result.with_typologies(Typologies::from([
            (
                "zodiac".to_string(),
                [("sun", "Virgo"), ("moon", "Capricorn")]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), Scalar::from(v)))
                    .collect(),
            ),
            (
                "kabbalah".to_string(),
                [("primary_sefira".to_string(), Scalar::from("Binah"))].into(),
            ),
        ]));

        assert_eq!(
            result.render_summary(),
            "\
Profile 'Kai' v1.0.0: 4 iterations (seed 42)
Typologies:
  kabbalah: primary_sefira=Binah
  zodiac: moon=Capricorn, sun=Virgo
"
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["typologies"]["zodiac"]["sun"], "Virgo");
    }

    #[test]
    fn lookups_by_path() {
        let result = sample();
        assert_eq!(result.stat("Maker", "mood").and_then(|s| s.frequency("low")), Some(0.75));
        assert_eq!(
            result.stat("Maker", "power").and_then(|s| s.as_numeric()).map(|s| s.max),
            Some(6.0)
        );
        assert!(result.stat("Maker", "missing").is_none());
        assert!(result.stat("Other", "power").is_none());
    }

    #[test]
    fn serializes_with_kind_tags() {
        let json = serde_json::to_value(sample()).unwrap();
        let attrs = &json["archetypes"][0]["attributes"];

        assert_eq!(attrs[0]["stat"]["kind"], "numeric");
        assert_eq!(attrs[0]["stat"]["mean"], 5.0);
        assert_eq!(attrs[1]["stat"]["kind"], "categorical");
        assert_eq!(attrs[1]["stat"]["frequencies"]["low"], 0.75);
        assert_eq!(attrs[2]["stat"]["kind"], "fixed");
        assert_eq!(attrs[2]["stat"]["value"], "X");
        assert!(json.get("summary").is_none());
        assert!(json.get("typologies").is_none());
    }
}
