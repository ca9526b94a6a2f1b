use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    Mesh, Phase,
    field::{VolScalarField, VolVectorField},
};

/// Identifies a pair of phases, optionally with a direction.
///
/// An unordered key (`"air and water"`) compares and hashes equal regardless
/// of the order its phases were given in. An ordered key (`"air in water"`)
/// reads as "first dispersed in second": `air in water` and `water in air`
/// are distinct keys, and an ordered key never equals an unordered one.
///
/// # Example
///
/// ```
/// use phasic_core::PhasePairKey;
///
/// assert_eq!(PhasePairKey::new("air", "water"), PhasePairKey::new("water", "air"));
/// assert_ne!(
///     PhasePairKey::ordered("air", "water"),
///     PhasePairKey::ordered("water", "air"),
/// );
///
/// let key: PhasePairKey = "air in water".parse().unwrap();
/// assert!(key.is_ordered());
/// assert_eq!(key.to_string(), "air in water");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhasePairKey {
    first: String,
    second: String,
    ordered: bool,
}

impl PhasePairKey {
    /// Creates an unordered key.
    #[must_use]
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            ordered: false,
        }
    }

    /// Creates an ordered key for `dispersed` in `continuous`.
    #[must_use]
    pub fn ordered(dispersed: impl Into<String>, continuous: impl Into<String>) -> Self {
        Self {
            first: dispersed.into(),
            second: continuous.into(),
            ordered: true,
        }
    }

    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }

    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Returns `true` if `phase` is one of the two phases.
    #[must_use]
    pub fn contains(&self, phase: &str) -> bool {
        self.first == phase || self.second == phase
    }

    /// Returns the partner of `phase`, or `None` if `phase` is not in the pair.
    #[must_use]
    pub fn other(&self, phase: &str) -> Option<&str> {
        if self.first == phase {
            Some(&self.second)
        } else if self.second == phase {
            Some(&self.first)
        } else {
            None
        }
    }

    /// Returns the unordered key over the same two phases.
    #[must_use]
    pub fn unordered(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }

    fn sorted(&self) -> (&str, &str) {
        if self.first <= self.second {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }
}

impl PartialEq for PhasePairKey {
    fn eq(&self, other: &Self) -> bool {
        if self.ordered != other.ordered {
            return false;
        }
        if self.ordered {
            self.first == other.first && self.second == other.second
        } else {
            self.sorted() == other.sorted()
        }
    }
}

impl Eq for PhasePairKey {}

impl Hash for PhasePairKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered.hash(state);
        if self.ordered {
            self.first.hash(state);
            self.second.hash(state);
        } else {
            let (a, b) = self.sorted();
            a.hash(state);
            b.hash(state);
        }
    }
}

impl fmt::Display for PhasePairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.ordered { "in" } else { "and" };
        write!(f, "{} {separator} {}", self.first, self.second)
    }
}

impl FromStr for PhasePairKey {
    type Err = PairKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [first, separator, second] = tokens.as_slice() else {
            return Err(PairKeyError::Malformed(s.to_owned()));
        };
        if first == second {
            return Err(PairKeyError::SamePhase((*first).to_owned()));
        }
        match *separator {
            "and" => Ok(Self::new(*first, *second)),
            "in" => Ok(Self::ordered(*first, *second)),
            _ => Err(PairKeyError::Malformed(s.to_owned())),
        }
    }
}

impl TryFrom<String> for PhasePairKey {
    type Error = PairKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PhasePairKey> for String {
    fn from(key: PhasePairKey) -> Self {
        key.to_string()
    }
}

/// Errors that can occur when parsing a [`PhasePairKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairKeyError {
    #[error("expected `<phase> and <phase>` or `<phase> in <phase>`, got `{0}`")]
    Malformed(String),

    #[error("phase `{0}` cannot be paired with itself")]
    SamePhase(String),
}

/// A dispersed phase and the continuous phase around it, bound to a mesh.
///
/// This is the state every interfacial sub-model is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct PhasePair<'a> {
    dispersed: &'a Phase,
    continuous: &'a Phase,
    mesh: &'a Mesh,
}

impl<'a> PhasePair<'a> {
    #[must_use]
    pub fn new(dispersed: &'a Phase, continuous: &'a Phase, mesh: &'a Mesh) -> Self {
        Self {
            dispersed,
            continuous,
            mesh,
        }
    }

    #[must_use]
    pub fn dispersed(&self) -> &'a Phase {
        self.dispersed
    }

    #[must_use]
    pub fn continuous(&self) -> &'a Phase {
        self.continuous
    }

    #[must_use]
    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    /// Returns the slip velocity `U_d − U_c`.
    #[must_use]
    pub fn relative_velocity(&self) -> VolVectorField {
        self.dispersed.velocity() - self.continuous.velocity()
    }

    /// Returns `|U_d − U_c|`.
    #[must_use]
    pub fn mag_ur(&self) -> VolScalarField {
        self.relative_velocity().mag()
    }

    /// Returns the dispersed-phase Reynolds number `|U_r| d / ν_c`.
    #[must_use]
    pub fn reynolds(&self) -> VolScalarField {
        self.mag_ur() * (self.dispersed.d() / self.continuous.nu())
    }

    /// Returns `max(α_d, α_residual)`, the dispersed fraction used to scale
    /// coefficients so they stay finite as the dispersed phase vanishes.
    #[must_use]
    pub fn bounded_dispersed_alpha(&self) -> VolScalarField {
        self.dispersed
            .alpha()
            .max_with(self.dispersed.residual_alpha())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, hash_map::DefaultHasher};

    use super::*;

    fn hash_of(key: &PhasePairKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn unordered_keys_ignore_order() {
        let ab = PhasePairKey::new("gas", "liquid");
        let ba = PhasePairKey::new("liquid", "gas");

        assert_eq!(ab, ba);
        assert_eq!(hash_of(&ab), hash_of(&ba));
    }

    #[test]
    fn ordered_keys_respect_order() {
        let gas_in_liquid = PhasePairKey::ordered("gas", "liquid");
        let liquid_in_gas = PhasePairKey::ordered("liquid", "gas");

        assert_ne!(gas_in_liquid, liquid_in_gas);
        assert_ne!(gas_in_liquid, PhasePairKey::new("gas", "liquid"));
        assert_eq!(gas_in_liquid.unordered(), PhasePairKey::new("liquid", "gas"));
    }

    #[test]
    fn works_as_a_map_key() {
        let mut map = HashMap::new();
        map.insert(PhasePairKey::new("gas", "liquid"), 1);
        map.insert(PhasePairKey::ordered("gas", "liquid"), 2);

        assert_eq!(map.get(&PhasePairKey::new("liquid", "gas")), Some(&1));
        assert_eq!(map.get(&PhasePairKey::ordered("gas", "liquid")), Some(&2));
        assert_eq!(map.get(&PhasePairKey::ordered("liquid", "gas")), None);
    }

    #[test]
    fn parses_and_displays() {
        let key: PhasePairKey = "  air   and water ".parse().unwrap();
        assert_eq!(key, PhasePairKey::new("water", "air"));
        assert_eq!(key.to_string(), "air and water");

        let key: PhasePairKey = "air in water".parse().unwrap();
        assert_eq!(key.first(), "air");
        assert_eq!(key.other("air"), Some("water"));
        assert_eq!(key.other("oil"), None);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(matches!(
            "air water".parse::<PhasePairKey>(),
            Err(PairKeyError::Malformed(_))
        ));
        assert!(matches!(
            "air with water".parse::<PhasePairKey>(),
            Err(PairKeyError::Malformed(_))
        ));
        assert_eq!(
            "air in air".parse::<PhasePairKey>(),
            Err(PairKeyError::SamePhase("air".into()))
        );
    }
}
