mod renderer;

pub use renderer::{Renderer, Tile, render_ascii};

use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::Color,
    terminal::{self, ClearType},
};

use crate::{
    config::Config,
    error::check_probability,
    generators::{
        GenerationReport, GridEvent, Outcome, generate_maze, inject_loops, run_spanning_tree,
    },
    maze::Grid,
};

/// How an animated run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Both passes ran to the end.
    Finished(Outcome),
    /// The user pressed Esc mid-animation. The grid keeps whatever was carved.
    Cancelled,
}

pub struct App {
    /// Pause between two drawn events
    step_delay: Duration,
}

impl Default for App {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(20),
        }
    }
}

impl App {
    pub fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // Ignore any errors as we are already failing
            let _ = App::restore_terminal(&mut std::io::stdout());
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Animates the spanning tree pass and then the loop pass on `grid`.
    /// Expects the terminal to be set up already.
    pub fn run(
        &self,
        stdout: &mut Stdout,
        grid: &mut Grid,
        config: &Config,
    ) -> anyhow::Result<RunStatus> {
        // Fail before anything is drawn or carved, like the headless path.
        check_probability("loop fraction", config.loops)?;
        let params = config.carve_params();
        let mut renderer = Renderer::new(grid);
        renderer.draw_grid(stdout, grid)?;

        let mut outcome = Outcome::Complete;
        for event in run_spanning_tree(grid, config.generator, &params)? {
            renderer.draw_event(stdout, &event)?;
            if let GridEvent::Done(done) = event {
                outcome = done;
            } else if self.cancelled()? {
                tracing::info!("Carving cancelled by user");
                return Ok(RunStatus::Cancelled);
            }
        }

        if config.loops > 0.0 {
            renderer.start_loops(stdout, grid)?;
            let injector = inject_loops(grid, config.loops, params.loop_seed())?;
            for removed in injector {
                renderer.draw_event(stdout, &GridEvent::WallRemoved(removed))?;
                if self.cancelled()? {
                    tracing::info!("Loop injection cancelled by user");
                    return Ok(RunStatus::Cancelled);
                }
            }
            renderer.draw_event(stdout, &GridEvent::Done(outcome))?;
        }

        renderer.draw_status(stdout, "Finished. Press Esc to exit...", Color::Blue)?;
        renderer.park_cursor(stdout)?;
        App::wait_for_esc()?;
        Ok(RunStatus::Finished(outcome))
    }

    /// Carves `grid` without a terminal.
    pub fn run_headless(grid: &mut Grid, config: &Config) -> anyhow::Result<GenerationReport> {
        let report = generate_maze(grid, config.generator, &config.carve_params(), config.loops)?;
        tracing::info!(?report, "Headless generation finished");
        Ok(report)
    }

    /// Waits out the step delay. Returns true when Esc was pressed meanwhile.
    fn cancelled(&self) -> std::io::Result<bool> {
        if !event::poll(self.step_delay)? {
            return Ok(false);
        }
        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
            if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::maze::GridShape;

    #[test]
    fn test_headless_run_with_loops() {
        let config = Config::try_parse_from([
            "mazecarve",
            "--width",
            "6",
            "--height",
            "5",
            "--seed",
            "11",
            "--loops",
            "0.5",
            "--headless",
        ])
        .unwrap();
        let mut grid = config.build_grid().unwrap();
        let report = App::run_headless(&mut grid, &config).unwrap();
        assert_eq!(report.outcome, Outcome::Complete);
        assert_eq!(report.tree_walls_removed, 29);
        // 49 interior walls, 20 left after the tree
        assert_eq!(report.loop_walls_removed, 10);
        assert_eq!(grid.passage_count(), 39);
    }

    #[test]
    fn test_headless_run_reports_disconnected_grid() {
        let config = Config::try_parse_from([
            "mazecarve",
            "--shape",
            "hex-pointy-top",
            "--generator",
            "kruskal",
            "--width",
            "3",
            "--height",
            "3",
            "--block",
            "0,1",
            "--block",
            "1,1",
            "--block",
            "2,1",
        ])
        .unwrap();
        let mut grid = config.build_grid().unwrap();
        assert_eq!(grid.shape(), GridShape::HexPointyTop);
        let report = App::run_headless(&mut grid, &config).unwrap();
        assert_eq!(
            report.outcome,
            Outcome::Disconnected {
                reached: 3,
                total: 6
            }
        );
        assert_eq!(report.tree_walls_removed, 4);
    }

    #[test]
    fn test_animated_run_rejects_bad_loop_fraction_before_carving() {
        let config = Config::try_parse_from([
            "mazecarve",
            "--loops",
            "1.5",
            "--width",
            "4",
            "--height",
            "4",
        ])
        .unwrap();
        let mut grid = config.build_grid().unwrap();
        let err = App::default()
            .run(&mut std::io::stdout(), &mut grid, &config)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::MazeError>(),
            Some(crate::error::MazeError::InvalidProbability { .. })
        ));
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn test_headless_run_rejects_bad_loop_fraction() {
        let config =
            Config::try_parse_from(["mazecarve", "--loops", "2", "--width", "3", "--height", "3"])
                .unwrap();
        let mut grid = config.build_grid().unwrap();
        assert!(App::run_headless(&mut grid, &config).is_err());
        // Rejected before anything was carved
        assert_eq!(grid.passage_count(), 0);
    }
}
