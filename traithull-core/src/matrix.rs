//! Trait-space data model: species trait vectors, species sets, and plots.
//!
//! A [`TraitMatrix`] maps species ids to trait vectors of a fixed
//! dimension `D`. A [`SpeciesSet`] is a non-empty selection of species ids
//! evaluated as one output row, and a [`PlotMatrix`] maps plot ids to the
//! species observed in each plot.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{Result, Summarizable, TraitHullError};

// ── TraitMatrix ────────────────────────────────────────────────────────────

/// Species-by-trait matrix with a shared dimension.
///
/// Species keep the order in which they were inserted, which is the order
/// of the input file.
#[derive(Debug, Clone)]
pub struct TraitMatrix {
    trait_names: Vec<String>,
    species: Vec<String>,
    values: Vec<Vec<f64>>,
    index: HashMap<String, usize>,
}

impl TraitMatrix {
    /// Create an empty matrix over the given trait labels.
    ///
    /// # Errors
    ///
    /// Returns an error if `trait_names` is empty.
    pub fn new(trait_names: Vec<String>) -> Result<Self> {
        if trait_names.is_empty() {
            return Err(TraitHullError::InvalidInput(
                "trait matrix needs at least one trait".into(),
            ));
        }
        Ok(Self {
            trait_names,
            species: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Build a matrix from `(species, values)` rows.
    pub fn from_rows<I>(trait_names: Vec<String>, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut matrix = Self::new(trait_names)?;
        for (species, values) in rows {
            matrix.insert(species, values)?;
        }
        Ok(matrix)
    }

    /// Add one species.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector length differs from [`dim`](Self::dim)
    /// or the species id is already present.
    pub fn insert(&mut self, species: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let species = species.into();
        if values.len() != self.dim() {
            return Err(TraitHullError::InvalidInput(format!(
                "species '{}' has {} trait values, expected {}",
                species,
                values.len(),
                self.dim()
            )));
        }
        if self.index.contains_key(&species) {
            return Err(TraitHullError::InvalidInput(format!(
                "duplicate species '{}'",
                species
            )));
        }
        self.index.insert(species.clone(), self.species.len());
        self.species.push(species);
        self.values.push(values);
        Ok(())
    }

    /// Dimensionality `D` of trait space.
    pub fn dim(&self) -> usize {
        self.trait_names.len()
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether the matrix holds no species.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Trait labels, positionally aligned with every trait vector.
    pub fn trait_names(&self) -> &[String] {
        &self.trait_names
    }

    /// Species ids in insertion order.
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Whether `species` is a key of the matrix.
    pub fn contains(&self, species: &str) -> bool {
        self.index.contains_key(species)
    }

    /// Trait vector of one species.
    pub fn get(&self, species: &str) -> Option<&[f64]> {
        self.index.get(species).map(|&i| self.values[i].as_slice())
    }

    /// Trait vectors of every member of `set`, in set order.
    pub fn points(&self, set: &SpeciesSet) -> Result<Vec<&[f64]>> {
        set.iter()
            .map(|id| {
                self.get(id)
                    .ok_or_else(|| TraitHullError::UnknownSpecies(id.to_string()))
            })
            .collect()
    }

    /// Values of trait `trait_idx` across `set`, in set order.
    pub fn trait_column(&self, set: &SpeciesSet, trait_idx: usize) -> Result<Vec<f64>> {
        if trait_idx >= self.dim() {
            return Err(TraitHullError::InvalidInput(format!(
                "trait index {} out of range for dimension {}",
                trait_idx,
                self.dim()
            )));
        }
        Ok(self.points(set)?.iter().map(|p| p[trait_idx]).collect())
    }

    /// The full species pool as a set.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty.
    pub fn pool(&self) -> Result<SpeciesSet> {
        SpeciesSet::new(self.species.clone())
    }
}

impl Summarizable for TraitMatrix {
    fn summary(&self) -> String {
        format!("{} species x {} traits", self.len(), self.dim())
    }
}

// ── SpeciesSet ─────────────────────────────────────────────────────────────

/// A non-empty set of distinct species ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesSet(Vec<String>);

impl SpeciesSet {
    /// Create a set from ids.
    ///
    /// # Errors
    ///
    /// Returns an error if `ids` is empty or contains a duplicate.
    pub fn new(ids: Vec<String>) -> Result<Self> {
        if ids.is_empty() {
            return Err(TraitHullError::InvalidInput(
                "species set must not be empty".into(),
            ));
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(TraitHullError::InvalidInput(format!(
                    "species '{}' listed twice",
                    id
                )));
            }
        }
        Ok(Self(ids))
    }

    /// Richness: number of species.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `species` is a member.
    pub fn contains(&self, species: &str) -> bool {
        self.0.iter().any(|s| s == species)
    }

    /// Iterate over member ids.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Member ids as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn push_unique(&mut self, species: String) {
        if !self.contains(&species) {
            self.0.push(species);
        }
    }
}

// ── PlotMatrix ─────────────────────────────────────────────────────────────

/// Mapping from plot id to the species present in it.
///
/// Plots with no present species are not stored.
#[derive(Debug, Clone, Default)]
pub struct PlotMatrix {
    plots: BTreeMap<String, SpeciesSet>,
}

impl PlotMatrix {
    /// Create an empty plot matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `species` as present in `plot`.
    pub fn add_occurrence(&mut self, plot: &str, species: &str) {
        match self.plots.get_mut(plot) {
            Some(set) => set.push_unique(species.to_string()),
            None => {
                self.plots
                    .insert(plot.to_string(), SpeciesSet(vec![species.to_string()]));
            }
        }
    }

    /// Species present in `plot`.
    pub fn get(&self, plot: &str) -> Option<&SpeciesSet> {
        self.plots.get(plot)
    }

    /// Number of plots with at least one species.
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    /// Whether no plot has any species.
    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    /// Iterate over `(plot, species)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpeciesSet)> {
        self.plots.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check that every occurring species is a key of `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`TraitHullError::UnknownSpecies`] naming the first species
    /// missing from the trait matrix.
    pub fn validate_against(&self, matrix: &TraitMatrix) -> Result<()> {
        for (plot, set) in &self.plots {
            if let Some(missing) = set.iter().find(|s| !matrix.contains(s)) {
                return Err(TraitHullError::UnknownSpecies(format!(
                    "'{}' in plot '{}' has no trait values",
                    missing, plot
                )));
            }
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
