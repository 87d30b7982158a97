//! Plain-text tables that stay aligned with wide (Hangul) characters

use console::{Alignment, measure_text_width, pad_str};

use crate::constants::display::CELL_WIDTH;

const COLUMN_GAP: &str = "  ";

pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Per-column width caps; columns without one use `CELL_WIDTH`
    caps: Vec<usize>,
}

impl TextTable {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            caps: Vec::new(),
        }
    }

    pub fn with_caps(mut self, caps: &[usize]) -> Self {
        self.caps = caps.to_vec();
        self
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        (0..self.headers.len())
            .map(|col| {
                let cap = self.caps.get(col).copied().unwrap_or(CELL_WIDTH);
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(col))
                    .map(|c| measure_text_width(c))
                    .chain(std::iter::once(measure_text_width(&self.headers[col])))
                    .max()
                    .unwrap_or(0);
                widest.min(cap)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let line = |cells: &[String]| {
            widths
                .iter()
                .enumerate()
                .map(|(col, width)| {
                    let cell = cells.get(col).map(String::as_str).unwrap_or("");
                    pad_str(cell, *width, Alignment::Left, Some("…")).into_owned()
                })
                .collect::<Vec<_>>()
                .join(COLUMN_GAP)
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(&self.headers)];
        out.push(
            widths
                .iter()
                .map(|w| "─".repeat(*w))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP),
        );
        out.extend(self.rows.iter().map(|r| line(r)));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_characters_align() {
        let mut table = TextTable::new(&["a", "bb"]);
        table.row(vec!["버거킹".to_string(), "x".to_string()]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "a       bb");
        assert_eq!(lines[1], "──────  ──");
        assert_eq!(lines[2], "버거킹  x");
    }

    #[test]
    fn test_cells_truncated_to_cap() {
        let mut table = TextTable::new(&["리뷰"]).with_caps(&[6]);
        table.row(vec!["와퍼가 정말 맛있어요".to_string()]);
        let rendered = table.render();
        let last = rendered.lines().last().unwrap();
        assert!(measure_text_width(last) <= 6);
        assert!(last.ends_with('…'));
    }

    #[test]
    fn test_missing_cells_render_blank() {
        let mut table = TextTable::new(&["a", "b"]);
        table.row(vec!["1".to_string()]);
        assert_eq!(table.render().lines().last().unwrap(), "1");
    }
}
