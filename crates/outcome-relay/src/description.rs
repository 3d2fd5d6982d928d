//! Notification targets and the collaborator that builds them.
//!
//! A [`Description`] identifies the scenario or step a sink call applies to.
//! Descriptions are built by a [`DescriptionProvider`]; [`ScenarioDescriber`]
//! is the stock provider driven by scenario metadata.

use std::fmt;

/// Opaque, comparable handle naming the scenario or step being reported.
///
/// # Examples
/// ```
/// use outcome_relay::Description;
///
/// let step = Description::test("Login", "the user signs in", "auth.feature:7");
/// assert_eq!(step.display_name(), "the user signs in(Login)");
/// assert_eq!(step.unique_id(), "auth.feature:7");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Description {
    display_name: String,
    unique_id: String,
}

impl Description {
    /// Describe a scenario.
    #[must_use]
    pub fn suite(name: impl Into<String>, unique_id: impl Into<String>) -> Self {
        Self {
            display_name: name.into(),
            unique_id: unique_id.into(),
        }
    }

    /// Describe a step belonging to the scenario named `class_name`.
    #[must_use]
    pub fn test(
        class_name: impl AsRef<str>,
        name: impl AsRef<str>,
        unique_id: impl Into<String>,
    ) -> Self {
        Self {
            display_name: format!("{}({})", name.as_ref(), class_name.as_ref()),
            unique_id: unique_id.into(),
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Identifier that stays stable for the lifetime of a run.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Raw identifier of a scenario step as emitted by the execution engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScenarioStep {
    text: String,
    line: u32,
}

impl ScenarioStep {
    /// Create a step identifier from its text and one-based line number.
    #[must_use]
    pub fn new(text: impl Into<String>, line: u32) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }

    /// Step text without the keyword.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// One-based line number in the feature file.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

/// Builds notification targets for one execution unit.
///
/// Implementations must be deterministic: the same step always yields an
/// equal description for the lifetime of the unit.
pub trait DescriptionProvider {
    /// Target for the test case as a whole.
    fn description(&self) -> Description;

    /// Target for one step of the test case.
    fn describe_child(&self, step: &ScenarioStep) -> Description;
}

/// Metadata describing the scenario executed by one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioMetadata {
    /// Path to the feature file containing the scenario.
    pub feature_path: String,
    /// Human-readable scenario name.
    pub scenario_name: String,
    /// Line number where the scenario is declared.
    pub line: u32,
}

impl ScenarioMetadata {
    /// Create metadata for one scenario.
    ///
    /// # Examples
    /// ```
    /// use outcome_relay::ScenarioMetadata;
    ///
    /// let metadata = ScenarioMetadata::new("features/example.feature", "example scenario", 3);
    /// assert_eq!(metadata.line, 3);
    /// ```
    #[must_use]
    pub fn new(
        feature_path: impl Into<String>,
        scenario_name: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            feature_path: feature_path.into(),
            scenario_name: scenario_name.into(),
            line,
        }
    }
}

/// Stock [`DescriptionProvider`] built from [`ScenarioMetadata`].
///
/// Unique ids take the form `<feature path>:<line>`. With filename-compatible
/// names enabled, every character outside `[A-Za-z0-9_]` in scenario names
/// and step texts becomes `_`.
///
/// # Examples
/// ```
/// use outcome_relay::{DescriptionProvider, ScenarioDescriber, ScenarioMetadata, ScenarioStep};
///
/// let describer = ScenarioDescriber::new(
///     ScenarioMetadata::new("auth.feature", "User logs in", 4),
///     true,
/// );
/// assert_eq!(describer.description().display_name(), "User_logs_in");
///
/// let step = describer.describe_child(&ScenarioStep::new("a user \"bob\"", 5));
/// assert_eq!(step.display_name(), "a_user__bob_(User_logs_in)");
/// assert_eq!(step.unique_id(), "auth.feature:5");
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioDescriber {
    metadata: ScenarioMetadata,
    filename_compatible_names: bool,
}

impl ScenarioDescriber {
    /// Create a describer for one scenario.
    #[must_use]
    pub fn new(metadata: ScenarioMetadata, filename_compatible_names: bool) -> Self {
        Self {
            metadata,
            filename_compatible_names,
        }
    }

    /// The scenario being described.
    #[must_use]
    pub fn metadata(&self) -> &ScenarioMetadata {
        &self.metadata
    }

    fn name(&self, raw: &str) -> String {
        if self.filename_compatible_names {
            filename_compatible(raw)
        } else {
            raw.to_string()
        }
    }

    fn unique_id(&self, line: u32) -> String {
        format!("{}:{line}", self.metadata.feature_path)
    }
}

impl DescriptionProvider for ScenarioDescriber {
    fn description(&self) -> Description {
        Description::suite(
            self.name(&self.metadata.scenario_name),
            self.unique_id(self.metadata.line),
        )
    }

    fn describe_child(&self, step: &ScenarioStep) -> Description {
        Description::test(
            self.name(&self.metadata.scenario_name),
            self.name(step.text()),
            self.unique_id(step.line()),
        )
    }
}

fn filename_compatible(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
