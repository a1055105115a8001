use ratatui::{prelude::*, widgets::*};

use crate::maze::{Cell, GridOracle, Pos};

/// Widget drawing a maze with the agent on it, two terminal columns per cell
pub struct MazeView<'g, G: GridOracle> {
    grid: &'g G,
    agent: Pos,
    step: usize,
}

impl<'g, G: GridOracle> MazeView<'g, G> {
    pub fn new(grid: &'g G, agent: Pos, step: usize) -> Self {
        Self { grid, agent, step }
    }

    /// Columns needed to draw the maze including the border
    pub fn width(&self) -> u16 {
        (self.grid.width() * 2 + 2) as u16
    }

    fn cell(&self, pos: Pos) -> Span<'static> {
        if pos == self.agent {
            return "()".light_yellow().bold();
        }
        match self.grid.classify(pos) {
            Cell::Wall => "██".dark_gray(),
            Cell::Goal => "[]".light_green().bold(),
            Cell::Free if pos == self.grid.start() => "::".cyan(),
            Cell::Free => Span::raw("  "),
        }
    }
}

impl<G: GridOracle> Widget for MazeView<'_, G> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = (0..self.grid.height())
            .map(|y| {
                (0..self.grid.width())
                    .map(|x| self.cell((x, y)))
                    .collect::<Vec<_>>()
            })
            .map(Line::from)
            .collect::<Vec<_>>();

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(format!("Step {}", self.step)),
            )
            .render(area, buf);
    }
}
