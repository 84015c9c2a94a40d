use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A die: a non-empty, ordered list of integer face values.
///
/// Duplicates are allowed and order carries no ranking; it only preserves
/// how the die was declared on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    faces: Vec<i64>,
}

impl Die {
    pub fn new(faces: Vec<i64>) -> Result<Self> {
        if faces.is_empty() {
            return Err(GameError::EmptyDie);
        }
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[i64] {
        &self.faces
    }

    /// Number of faces, which is also the modulus of a fair roll.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn face(&self, index: usize) -> i64 {
        self.faces[index]
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .faces
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}", joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_face_list() {
        assert!(matches!(Die::new(vec![]), Err(GameError::EmptyDie)));
    }

    #[test]
    fn test_display_joins_faces() {
        let die = Die::new(vec![2, 2, 4, 4, 9, 9]).unwrap();
        assert_eq!(die.to_string(), "2,2,4,4,9,9");
    }

    #[test]
    fn test_preserves_declared_order_and_duplicates() {
        let die = Die::new(vec![3, 1, 1, 2]).unwrap();
        assert_eq!(die.faces(), &[3, 1, 1, 2]);
        assert_eq!(die.len(), 4);
    }
}
