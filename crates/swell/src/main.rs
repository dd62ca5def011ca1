mod logging;
mod surface;

use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use swell_config::Config;
use swell_field::{AnimationField, CommandBuffer, Surface};

/// Drifting circles that swell under the mouse pointer.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for particle placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default config file and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", Config::default().to_toml_string()?);
        return Ok(());
    }

    let log_path = logging::init();
    let config = Config::load(cli.config.as_deref())?;
    let seed = cli.seed.unwrap_or_else(time_seed);
    tracing::info!(?log_path, seed, "starting swell");

    let terminal = ratatui::init();
    let result: color_eyre::Result<()> = execute!(stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(Into::into)
        .and_then(|()| App::new(config, seed).run(terminal));
    if let Err(err) = execute!(stdout(), DisableMouseCapture, DisableFocusChange) {
        tracing::warn!(%err, "cannot disable mouse capture");
    }
    ratatui::restore();

    if let Err(err) = &result {
        tracing::error!(%err, "swell exited with an error");
    }
    result
}

/// Seed taken from the wall clock.
fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Whether to show the key help line.
    show_help: bool,
    /// The circle field.
    field: AnimationField,
    /// Drawing calls for the current frame.
    surface: CommandBuffer,
    /// Time between frames.
    frame_interval: Duration,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            running: false,
            show_help: true,
            field: AnimationField::seeded(Default::default(), config.field, seed),
            surface: CommandBuffer::default(),
            frame_interval: Duration::from_millis(config.frame_interval_ms),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let frame_start = Instant::now();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(frame_start + self.frame_interval)?;
        }
        tracing::info!(frames = self.field.frames(), "stopped");
        Ok(())
    }

    /// Advance the field one frame and draw it.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // The field follows the buffer size on the next tick
        let dimensions = surface::dot_dimensions(area);
        if dimensions != self.surface.size() {
            self.surface.resize(dimensions);
            tracing::debug!(columns = area.width, rows = area.height, "resized");
        }

        self.field.tick(&mut self.surface);
        frame.render_widget(surface::canvas(&self.surface, dimensions), area);

        if self.show_help {
            let [_, help_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            let color = Color::Rgb(150, 150, 200);
            let help = Line::from(vec![
                "q".bold().fg(color),
                " quit  ".dark_gray(),
                "h".bold().fg(color),
                " hide help  ".dark_gray(),
                format!("{} circles", self.field.len()).dark_gray(),
            ])
            .centered();
            frame.render_widget(help, help_area);
        }
    }

    /// Reads the crossterm events until the next frame is due.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() || !event::poll(timeout)? {
                return Ok(());
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::FocusLost => self.field.pointer_left(),
                // The next render picks up the new size
                Event::Resize(_, _) => return Ok(()),
                _ => {}
            }
            if !self.running {
                return Ok(());
            }
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    /// Feeds pointer movement to the field.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.field
                    .pointer_moved(surface::cell_center(mouse.column, mouse.row));
            }
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
