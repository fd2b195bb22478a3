//! Family structure: individuals, roles, and pedigree validation.
//!
//! A [`Family`] holds exactly one child and up to two parents. Either
//! parent may be absent (no variant data supplied); every downstream check
//! degrades gracefully in that case rather than failing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TriageError;

/// Reported sex of an individual (PED codes 1/2/0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sex {
    /// PED code 1.
    Male,
    /// PED code 2.
    Female,
    /// PED code 0 or missing.
    #[default]
    Unknown,
}

impl Sex {
    /// PED-file representation.
    pub fn as_ped_code(&self) -> &'static str {
        match self {
            Sex::Male => "1",
            Sex::Female => "2",
            Sex::Unknown => "0",
        }
    }
}

impl FromStr for Sex {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "M" | "m" | "male" => Ok(Sex::Male),
            "2" | "F" | "f" | "female" => Ok(Sex::Female),
            "0" | "unknown" => Ok(Sex::Unknown),
            other => Err(TriageError::InvalidFamily {
                reason: format!("unrecognised sex code: {other}"),
            }),
        }
    }
}

/// Affection status of an individual (PED codes 1/2/0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AffectionStatus {
    /// PED code 1.
    Unaffected,
    /// PED code 2.
    Affected,
    /// PED code 0 or missing.
    #[default]
    Unknown,
}

impl FromStr for AffectionStatus {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(AffectionStatus::Unaffected),
            "2" => Ok(AffectionStatus::Affected),
            "0" => Ok(AffectionStatus::Unknown),
            other => Err(TriageError::InvalidFamily {
                reason: format!("unrecognised affection code: {other}"),
            }),
        }
    }
}

/// Role of an individual within the trio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The proband.
    Child,
    /// The proband's mother.
    Mother,
    /// The proband's father.
    Father,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Child => write!(f, "child"),
            Role::Mother => write!(f, "mother"),
            Role::Father => write!(f, "father"),
        }
    }
}

/// One member of a family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Sample identifier.
    pub id: String,
    /// Reported sex.
    pub sex: Sex,
    /// Affection status.
    pub affection: AffectionStatus,
    /// Role within the family.
    pub role: Role,
}

impl Individual {
    /// Create an individual with the given role.
    pub fn new(id: &str, sex: Sex, affection: AffectionStatus, role: Role) -> Self {
        Self {
            id: id.to_string(),
            sex,
            affection,
            role,
        }
    }

    /// Whether this individual is recorded as affected.
    pub fn is_affected(&self) -> bool {
        self.affection == AffectionStatus::Affected
    }
}

/// A child and up to two parents, analysed together.
///
/// Construction validates pedigree consistency: the mother must not be
/// recorded male, the father must not be recorded female, and the child
/// role is fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    /// Family identifier.
    pub id: String,
    child: Individual,
    mother: Option<Individual>,
    father: Option<Individual>,
}

impl Family {
    /// Create a family around one child; parents start absent.
    pub fn new(id: &str, mut child: Individual) -> Self {
        child.role = Role::Child;
        Self {
            id: id.to_string(),
            child,
            mother: None,
            father: None,
        }
    }

    /// Attach the mother. A mother recorded as male is an error.
    pub fn with_mother(mut self, mut mother: Individual) -> Result<Self, TriageError> {
        if mother.sex == Sex::Male {
            return Err(TriageError::InvalidFamily {
                reason: format!("mother '{}' recorded with male sex", mother.id),
            });
        }
        mother.role = Role::Mother;
        self.mother = Some(mother);
        Ok(self)
    }

    /// Attach the father. A father recorded as female is an error.
    pub fn with_father(mut self, mut father: Individual) -> Result<Self, TriageError> {
        if father.sex == Sex::Female {
            return Err(TriageError::InvalidFamily {
                reason: format!("father '{}' recorded with female sex", father.id),
            });
        }
        father.role = Role::Father;
        self.father = Some(father);
        Ok(self)
    }

    /// The proband.
    pub fn child(&self) -> &Individual {
        &self.child
    }

    /// The mother, if variant data was supplied for her.
    pub fn mother(&self) -> Option<&Individual> {
        self.mother.as_ref()
    }

    /// The father, if variant data was supplied for him.
    pub fn father(&self) -> Option<&Individual> {
        self.father.as_ref()
    }

    /// The parent with the given role; `None` for [`Role::Child`].
    pub fn parent(&self, role: Role) -> Option<&Individual> {
        match role {
            Role::Mother => self.mother(),
            Role::Father => self.father(),
            Role::Child => None,
        }
    }

    /// Whether the mother is present and recorded affected.
    pub fn mother_affected(&self) -> bool {
        self.mother.as_ref().is_some_and(Individual::is_affected)
    }

    /// Whether the father is present and recorded affected.
    pub fn father_affected(&self) -> bool {
        self.father.as_ref().is_some_and(Individual::is_affected)
    }

    /// Roles of parents with no data supplied.
    pub fn absent_parents(&self) -> Vec<Role> {
        let mut absent = Vec::new();
        if self.mother.is_none() {
            absent.push(Role::Mother);
        }
        if self.father.is_none() {
            absent.push(Role::Father);
        }
        absent
    }

    /// Whether both parents are present.
    pub fn has_both_parents(&self) -> bool {
        self.mother.is_some() && self.father.is_some()
    }
}
