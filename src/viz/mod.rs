use std::{io, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::LevelFilter;
use ratatui::{prelude::*, widgets::*};
use tui_logger::TuiLoggerWidget;

use crate::{
    maze::{GridOracle, Pos},
    observer::Observer,
    stop::StopSignal,
};

mod maze_view;
mod tui;

pub use maze_view::MazeView;

use self::tui::Tui;

/// Route `log` records into the terminal UI's log pane
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    tui_logger::init_logger(level)?;
    tui_logger::set_default_level(level);
    Ok(())
}

/// Renders the maze and the log in the terminal after every replay step
///
/// Pressing `q` raises the [`StopSignal`] it was built with. The terminal is restored on drop.
pub struct TerminalObserver<'g, G: GridOracle> {
    terminal: Tui,
    grid: &'g G,
    agent: Pos,
    step: usize,
    stop: StopSignal,
}

impl<'g, G: GridOracle> TerminalObserver<'g, G> {
    pub fn new(grid: &'g G, stop: StopSignal) -> io::Result<Self> {
        let mut observer = Self {
            terminal: tui::init()?,
            grid,
            agent: grid.start(),
            step: 0,
            stop,
        };
        observer.draw()?;
        Ok(observer)
    }

    /// Keep the last frame on screen until `q` is pressed
    pub fn wait_for_quit(&mut self) -> io::Result<()> {
        while !self.stop.is_stopped() {
            self.draw()?;
            self.handle_events(Duration::from_millis(100))?;
        }
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        tui_logger::move_events();
        let view = MazeView::new(self.grid, self.agent, self.step);
        self.terminal.draw(|frame| {
            let [maze_area, log_area] =
                Layout::horizontal([Constraint::Length(view.width()), Constraint::Fill(1)])
                    .areas(frame.size());
            frame.render_widget(view, maze_area);
            frame.render_widget(
                TuiLoggerWidget::default()
                    .block(
                        Block::bordered()
                            .border_type(BorderType::Rounded)
                            .title("Log (q to quit)"),
                    )
                    .style_error(Style::default().light_red())
                    .style_warn(Style::default().light_yellow())
                    .style_info(Style::default().cyan())
                    .output_separator(' '),
                log_area,
            );
        })?;
        Ok(())
    }

    fn handle_events(&mut self, timeout: Duration) -> io::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                self.stop.stop();
            }
        }
        Ok(())
    }
}

impl<G: GridOracle> Observer for TerminalObserver<'_, G> {
    fn observe(&mut self, step: usize, pos: Pos) {
        self.agent = pos;
        self.step = step;
        if let Err(err) = self.draw().and_then(|_| self.handle_events(Duration::ZERO)) {
            log::warn!("failed to draw replay step {step}: {err}");
        }
    }
}

impl<G: GridOracle> Drop for TerminalObserver<'_, G> {
    fn drop(&mut self) {
        let _ = tui::restore();
    }
}
