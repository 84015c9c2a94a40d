//! Pairwise win probabilities for a set of dice.
//!
//! Exact counting over all face pairs; the dice are tiny, so the O(n²m²)
//! cost is irrelevant and exactness is what matters for the help display
//! and the non-transitivity property.

use crate::Die;

/// Probability, as a percentage rounded to two decimals, that a face drawn
/// from `a` strictly beats a face drawn from `b`. Ties count as losses for
/// `a`, matching the game's own tie rule.
pub fn win_probability(a: &Die, b: &Die) -> f64 {
    let wins = a
        .faces()
        .iter()
        .map(|&x| b.faces().iter().filter(|&&y| x > y).count())
        .sum::<usize>();
    let total = a.len() * b.len();
    round2(wins as f64 / total as f64 * 100.0)
}

/// Full pairwise matrix. `matrix[i][j]` is the chance that die `i` beats
/// die `j`; the diagonal is `None` since a die never plays itself.
pub fn win_matrix(dice: &[Die]) -> Vec<Vec<Option<f64>>> {
    dice.iter()
        .enumerate()
        .map(|(i, row_die)| {
            dice.iter()
                .enumerate()
                .map(|(j, col_die)| {
                    if i == j {
                        None
                    } else {
                        Some(win_probability(row_die, col_die))
                    }
                })
                .collect()
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn die(faces: &[i64]) -> Die {
        Die::new(faces.to_vec()).unwrap()
    }

    #[test]
    fn test_diagonal_is_undefined() {
        let dice = vec![die(&[1, 2, 3]), die(&[4, 5, 6]), die(&[7, 8, 9])];
        let matrix = win_matrix(&dice);
        for (i, row) in matrix.iter().enumerate() {
            assert!(row[i].is_none());
        }
    }

    #[test]
    fn test_classic_non_transitive_cycle() {
        let a = die(&[2, 2, 4, 4, 9, 9]);
        let b = die(&[1, 1, 6, 6, 8, 8]);
        let c = die(&[3, 3, 5, 5, 7, 7]);

        // each edge of the cycle is 5/9 = 55.56%
        assert_eq!(win_probability(&a, &b), 55.56);
        assert_eq!(win_probability(&b, &c), 55.56);
        assert_eq!(win_probability(&c, &a), 55.56);
    }

    #[test]
    fn test_complement_symmetry_without_ties() {
        // no face value shared between dice, so p(i beats j) + p(j beats i)
        // must come back to 100 up to rounding
        let dice = vec![
            die(&[2, 2, 4, 4, 9, 9]),
            die(&[1, 1, 6, 6, 8, 8]),
            die(&[3, 3, 5, 5, 7, 7]),
        ];
        let matrix = win_matrix(&dice);
        for i in 0..dice.len() {
            for j in 0..dice.len() {
                if i == j {
                    continue;
                }
                let sum = matrix[i][j].unwrap() + matrix[j][i].unwrap();
                assert!((sum - 100.0).abs() < 0.02, "sum was {sum}");
            }
        }
    }

    #[test]
    fn test_ties_count_as_losses_for_both_sides() {
        let a = die(&[1, 1]);
        let b = die(&[1, 1]);
        assert_eq!(win_probability(&a, &b), 0.0);
        assert_eq!(win_probability(&b, &a), 0.0);
    }

    #[test]
    fn test_dominant_die() {
        let high = die(&[10, 10, 10]);
        let low = die(&[1, 2, 3]);
        assert_eq!(win_probability(&high, &low), 100.0);
        assert_eq!(win_probability(&low, &high), 0.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        // 1/3 -> 33.33, not 33.333...
        let a = die(&[2]);
        let b = die(&[1, 3, 3]);
        assert_eq!(win_probability(&a, &b), 33.33);
    }
}
