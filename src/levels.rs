//! Confusion levels: quorums of constraints arranged in an inheritance DAG.

use std::collections::HashMap;

use crate::classify::Classifier;
use crate::constraints::Constraint;
use crate::error::{IdunnoError, Result};

pub const MINIMUM: &str = "minimum";
pub const SATISFACTORY: &str = "satisfactory";
pub const DELIGHTFUL: &str = "delightful";

/// A named tier of confusion.
///
/// A candidate satisfies the level if it satisfies every inherited level and
/// at least `required` of the level's own constraints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionLevel {
    name: String,
    required: usize,
    constraints: Vec<Constraint>,
    inherit: Vec<String>,
}

impl ConfusionLevel {
    pub fn new(
        name: impl Into<String>,
        required: usize,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        Self {
            name: name.into(),
            required,
            constraints: constraints.into_iter().collect(),
            inherit: Vec::new(),
        }
    }

    /// Adds a level this one inherits from.
    pub fn inherit(mut self, parent: impl Into<String>) -> Self {
        self.inherit.push(parent.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn parents(&self) -> &[String] {
        &self.inherit
    }
}

#[derive(Clone, Debug)]
struct Entry {
    level: ConfusionLevel,
    // indices into `LevelSet::entries`, always smaller than this entry's own
    parents: Vec<usize>,
}

/// A registry of confusion levels.
///
/// Levels can only inherit from levels registered before them, which keeps
/// the inheritance graph acyclic.
#[derive(Clone, Debug, Default)]
pub struct LevelSet {
    entries: Vec<Entry>,
}

impl LevelSet {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The RFC 8771 levels: `minimum`, `satisfactory` and `delightful`.
    pub fn standard() -> Self {
        let minimum =
            ConfusionLevel::new(MINIMUM, 2, [Constraint::MultiOctet, Constraint::Disallowed]);
        let satisfactory = ConfusionLevel::new(
            SATISFACTORY,
            2,
            [
                Constraint::NonPrintable,
                Constraint::MultipleScripts,
                Constraint::CategorySymbol,
            ],
        )
        .inherit(MINIMUM);
        let delightful = ConfusionLevel::new(
            DELIGHTFUL,
            2,
            [
                Constraint::MultipleDirectionalities,
                Constraint::Confusables,
                Constraint::Emoji,
            ],
        )
        .inherit(SATISFACTORY);

        Self {
            entries: vec![
                Entry {
                    level: minimum,
                    parents: vec![],
                },
                Entry {
                    level: satisfactory,
                    parents: vec![0],
                },
                Entry {
                    level: delightful,
                    parents: vec![1],
                },
            ],
        }
    }

    /// Registers a level.
    ///
    /// Fails with `DuplicateLevel` if the name is taken and with
    /// `UnknownLevel` if a parent is not registered yet.
    pub fn insert(&mut self, level: ConfusionLevel) -> Result<()> {
        if self.position(level.name()).is_some() {
            return Err(IdunnoError::DuplicateLevel(level.name.clone()));
        }
        let parents = level
            .inherit
            .iter()
            .map(|parent| {
                self.position(parent)
                    .ok_or_else(|| IdunnoError::UnknownLevel(parent.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        if level.required > level.constraints.len() {
            tracing::warn!(
                level = level.name(),
                required = level.required,
                constraints = level.constraints.len(),
                "confusion level can never be satisfied"
            );
        }

        self.entries.push(Entry { level, parents });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ConfusionLevel> {
        self.position(name).map(|idx| &self.entries[idx].level)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Level names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.level.name())
    }

    /// Checks whether `text` satisfies the named level.
    ///
    /// Every constraint and every level is evaluated at most once per call,
    /// however many paths of the inheritance graph reach it.
    pub fn satisfies<C: Classifier + ?Sized>(
        &self,
        text: &str,
        level: &str,
        classifier: &C,
    ) -> Result<bool> {
        let idx = self
            .position(level)
            .ok_or_else(|| IdunnoError::UnknownLevel(level.to_owned()))?;
        let mut evaluation = Evaluation {
            levels: self,
            text,
            classifier,
            constraints: [None; Constraint::ALL.len()],
            resolved: HashMap::new(),
        };
        Ok(evaluation.level(idx))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.level.name() == name)
    }
}

struct Evaluation<'a, C: ?Sized> {
    levels: &'a LevelSet,
    text: &'a str,
    classifier: &'a C,
    constraints: [Option<bool>; Constraint::ALL.len()],
    resolved: HashMap<usize, bool>,
}

impl<C: Classifier + ?Sized> Evaluation<'_, C> {
    fn level(&mut self, idx: usize) -> bool {
        if let Some(&satisfied) = self.resolved.get(&idx) {
            return satisfied;
        }
        let levels = self.levels;
        let entry = &levels.entries[idx];
        let satisfied = entry.parents.iter().all(|&parent| self.level(parent)) && {
            let met = entry
                .level
                .constraints
                .iter()
                .filter(|&&constraint| self.constraint(constraint))
                .count();
            met >= entry.level.required
        };
        self.resolved.insert(idx, satisfied);
        satisfied
    }

    fn constraint(&mut self, constraint: Constraint) -> bool {
        let slot = &mut self.constraints[constraint.index()];
        *slot.get_or_insert_with(|| constraint.holds(self.text, self.classifier))
    }
}
