//! Terminal rendering of a computed layout.

use colored::Colorize;
use trellis::layout::geometry::Spacing;
use trellis::Layout;

/// Width of one grid cell in the text rendering: an abbreviated sha plus a
/// separating space.
const CELL_WIDTH: usize = 8;

/// Render the grid as text, one line per row.
///
/// Cells show the first seven characters of the sha; empty cells render as
/// dots. Commits on the current lineage are highlighted when `use_color`
/// is set.
pub fn render_grid(layout: &Layout, use_color: bool) -> String {
    let mut out = String::new();
    for row in layout.grid().rows() {
        let mut line = String::new();
        for cell in row {
            match cell {
                Some(id) => {
                    let node = layout.node(*id);
                    let short: String = node.sha.as_str().chars().take(CELL_WIDTH - 1).collect();
                    let cell_text = format!("{short:<width$}", width = CELL_WIDTH);
                    if use_color && layout.is_in_current_lineage(*id) {
                        line.push_str(&cell_text.yellow().bold().to_string());
                    } else {
                        line.push_str(&cell_text);
                    }
                }
                None => {
                    line.push_str(&".".repeat(CELL_WIDTH - 1));
                    line.push(' ');
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Serialize the layout's geometry as pretty-printed JSON.
pub fn geometry_json(layout: &Layout, spacing: Spacing) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&layout.geometry(spacing))
}
