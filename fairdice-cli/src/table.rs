use comfy_table::{presets::UTF8_FULL, Table};
use fairdice_core::Die;

/// Win-probability matrix as a table: rows and columns are labeled with the
/// die face lists, the diagonal is a dash.
pub fn render_matrix(dice: &[Die], matrix: &[Vec<Option<f64>>]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["User die v".to_string()];
    header.extend(dice.iter().map(|die| die.to_string()));
    table.set_header(header);

    for (i, row) in matrix.iter().enumerate() {
        let mut cells = vec![dice[i].to_string()];
        cells.extend(row.iter().map(|cell| match cell {
            Some(pct) => format!("{pct:.2}%"),
            None => "-".to_string(),
        }));
        table.add_row(cells);
    }

    table
}

pub fn print_matrix(dice: &[Die], matrix: &[Vec<Option<f64>>]) {
    println!("Probability that the row die beats the column die:");
    println!("{}", render_matrix(dice, matrix));
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairdice_core::win_matrix;

    #[test]
    fn test_render_includes_labels_and_percentages() {
        let dice = vec![
            Die::new(vec![2, 2, 4, 4, 9, 9]).unwrap(),
            Die::new(vec![1, 1, 6, 6, 8, 8]).unwrap(),
            Die::new(vec![3, 3, 5, 5, 7, 7]).unwrap(),
        ];
        let matrix = win_matrix(&dice);
        let rendered = render_matrix(&dice, &matrix).to_string();

        assert!(rendered.contains("2,2,4,4,9,9"));
        assert!(rendered.contains("55.56%"));
    }

    #[test]
    fn test_render_marks_diagonal() {
        let dice = vec![
            Die::new(vec![1]).unwrap(),
            Die::new(vec![2]).unwrap(),
            Die::new(vec![3]).unwrap(),
        ];
        let matrix = win_matrix(&dice);
        let rendered = render_matrix(&dice, &matrix).to_string();

        assert!(rendered.contains('-'));
    }
}
