//! The plugboard: letter pairs swapped on the way into and out of the rotor stack.

use crate::analyzer::AnalysisError;
use crate::types::{index_letter, letter_index, LETTER_COUNT};

/// A symmetric partial permutation of the alphabet. Unpaired letters map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    wiring: [u8; LETTER_COUNT],
}

impl Plugboard {
    /// Builds a plugboard from letter pairs. Lowercase letters are folded to uppercase.
    ///
    /// # Returns
    ///
    /// * `Ok(Plugboard)` if every pair holds two distinct letters and no letter repeats.
    /// * `Err(AnalysisError)` naming the first offending letter otherwise.
    pub fn new(pairs: &[(char, char)]) -> Result<Self, AnalysisError> {
        let mut wiring = Self::default().wiring;
        let mut used = [false; LETTER_COUNT];

        for &(a, b) in pairs {
            let a = a.to_ascii_uppercase();
            let b = b.to_ascii_uppercase();

            let ia = letter_index(a).ok_or(AnalysisError::InvalidPlug(a))?;
            let ib = letter_index(b).ok_or(AnalysisError::InvalidPlug(b))?;

            if ia == ib {
                return Err(AnalysisError::SelfPlug(a));
            }

            for (index, letter) in [(ia, a), (ib, b)] {
                if used[index] {
                    return Err(AnalysisError::PlugConflict(letter));
                }
                used[index] = true;
            }

            wiring[ia] = ib as u8;
            wiring[ib] = ia as u8;
        }

        Ok(Self { wiring })
    }

    /// Returns the partner of `index`, or `index` itself when it is not plugged.
    pub fn swap(&self, index: usize) -> usize {
        self.wiring[index] as usize
    }

    /// Returns the connected pairs in alphabetical order of their first letter.
    pub fn pairs(&self) -> Vec<(char, char)> {
        self.wiring
            .iter()
            .enumerate()
            .filter(|&(i, &partner)| i < partner as usize)
            .map(|(i, &partner)| (index_letter(i), index_letter(partner as usize)))
            .collect()
    }
}

impl Default for Plugboard {
    fn default() -> Self {
        Self {
            wiring: std::array::from_fn(|i| i as u8),
        }
    }
}
