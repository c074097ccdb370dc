mod content;
mod logging;

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::Line,
};
use shiver_config::Config;
use shiver_core::{Animation, AnimationMode, Direction, SkeletonOptions};
use shiver_render::SkeletonState;
use tracing::{error, info};

use crate::content::ContentBlock;

/// Size of the demo card in cells.
const CARD_WIDTH: u16 = 48;
const CARD_HEIGHT: u16 = 14;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    info!(path = %log_path.display(), "shiver starting");

    let config = Config::load()?;
    let app = App::new(config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration, updated by key presses and written on save.
    config: Config,
    /// The mounted skeleton.
    skeleton: SkeletonState,
    /// Content shown once loading finishes.
    content: Vec<ContentBlock>,
    /// Origin of the app clock.
    started: Instant,
    /// App-clock time the current simulated load began.
    load_started_ms: u64,
    /// When the last simulated load finished.
    loaded_at: Option<DateTime<Local>>,
    /// Last status message shown in the footer.
    status: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let skeleton = SkeletonState::new(skeleton_options(&config), 0)?;
        Ok(Self {
            running: false,
            config,
            skeleton,
            content: content::profile_card(),
            started: Instant::now(),
            load_started_ms: 0,
            loaded_at: None,
            status: None,
        })
    }

    /// Milliseconds since the app started.
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.tick(self.now_ms());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Finish the simulated load once it has run long enough.
    fn tick(&mut self, now_ms: u64) {
        if self.skeleton.is_loading()
            && now_ms.saturating_sub(self.load_started_ms) >= self.config.simulated_load_ms
        {
            self.finish_loading(now_ms);
        }
    }

    fn finish_loading(&mut self, now_ms: u64) {
        self.skeleton.set_loading(false, now_ms);
        self.loaded_at = Some(Local::now());
        info!("content loaded");
    }

    fn start_loading(&mut self, now_ms: u64) {
        self.load_started_ms = now_ms;
        self.skeleton.set_loading(true, now_ms);
        info!("loading started");
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let now_ms = self.now_ms();
        let area = frame.area();

        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help text
        ])
        .split(area);
        let card = centered(rows[1], CARD_WIDTH);

        if self.skeleton.is_loading() {
            self.skeleton
                .render(frame.buffer_mut(), card, &self.content, now_ms);
        } else {
            content::render(
                &self.content,
                card,
                &self.skeleton.options().container_style,
                frame.buffer_mut(),
            );
        }

        frame.render_widget(self.status_line().centered(), rows[3]);
        frame.render_widget(help_line().centered(), rows[4]);
    }

    fn status_line(&self) -> Line<'static> {
        let animation = describe(self.skeleton.animation());
        let source = if self.config.use_layout {
            "layout"
        } else {
            "content"
        };
        let state = match (self.skeleton.is_loading(), self.loaded_at) {
            (true, _) => "loading".to_string(),
            (false, Some(at)) => format!("loaded at {}", at.format("%H:%M:%S")),
            (false, None) => "loaded".to_string(),
        };
        let mut spans = vec![
            state.cyan(),
            "  ".into(),
            animation.bold(),
            format!("  bones from {source}").dark_gray(),
        ];
        if let Some(status) = &self.status {
            spans.push(format!("  {status}").yellow());
        }
        Line::from(spans)
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the configured tick so the animation keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(self.config.tick_ms.max(1)))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let now_ms = self.now_ms();
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_loading(now_ms),
            (_, KeyCode::Char('a')) => self.cycle_mode(now_ms),
            (_, KeyCode::Char('d')) => self.cycle_direction(now_ms),
            (_, KeyCode::Char('l')) => self.toggle_layout(),
            (_, KeyCode::Char('s')) => self.save_config(),
            (_, KeyCode::Char('r')) => self.reload(now_ms),
            _ => {}
        }
    }

    fn toggle_loading(&mut self, now_ms: u64) {
        if self.skeleton.is_loading() {
            self.finish_loading(now_ms);
        } else {
            self.start_loading(now_ms);
        }
    }

    /// Cycle pulse, shiver, none.
    fn cycle_mode(&mut self, now_ms: u64) {
        let mode = self.skeleton.animation().mode().next();
        let direction = self.current_direction();
        self.skeleton.set_animation(mode, direction, now_ms);
        self.sync_animation();
    }

    /// Cycle the shimmer direction, switching to shiver if needed.
    fn cycle_direction(&mut self, now_ms: u64) {
        let direction = self.current_direction().next();
        self.skeleton
            .set_animation(AnimationMode::Shiver, direction, now_ms);
        self.sync_animation();
    }

    fn current_direction(&self) -> Direction {
        Direction::from_name(&self.skeleton.options().animation_direction).unwrap_or_default()
    }

    /// Copy the skeleton's animation back into the config.
    fn sync_animation(&mut self) {
        let options = self.skeleton.options();
        self.config.skeleton.animation_type = options.animation_type.clone();
        self.config.skeleton.animation_direction = options.animation_direction.clone();
        self.status = None;
    }

    fn toggle_layout(&mut self) {
        self.config.use_layout = !self.config.use_layout;
        let layout = skeleton_options(&self.config).layout;
        self.skeleton.set_layout(layout);
    }

    fn save_config(&mut self) {
        self.status = Some(match self.config.save() {
            Ok(path) => format!("saved {}", path.display()),
            Err(err) => {
                error!(%err, "failed to save config");
                format!("save failed: {err}")
            }
        });
    }

    fn reload(&mut self, now_ms: u64) {
        let result = Config::load()
            .map_err(color_eyre::Report::from)
            .and_then(|config| self.apply_config(config, now_ms));
        self.status = Some(match result {
            Ok(()) => "reloaded config".to_string(),
            Err(err) => {
                error!(%err, "failed to reload config");
                format!("reload failed: {err}")
            }
        });
    }

    /// Remount the skeleton with `config`, keeping the current loading
    /// state. Nothing changes if the config's colors do not parse.
    fn apply_config(&mut self, config: Config, now_ms: u64) -> color_eyre::Result<()> {
        let mut options = skeleton_options(&config);
        options.is_loading = self.skeleton.is_loading();
        self.skeleton.set_options(options, now_ms)?;
        self.config = config;
        self.status = None;
        Ok(())
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Options the skeleton is mounted with; the layout is dropped when bones
/// should be inferred from the content.
fn skeleton_options(config: &Config) -> SkeletonOptions {
    let mut options = config.skeleton.clone();
    if !config.use_layout {
        options.layout.clear();
    }
    options
}

fn describe(animation: Animation) -> String {
    match animation {
        Animation::Shiver(direction) => format!("shiver {}", direction.name()),
        other => other.mode().name().to_string(),
    }
}

fn centered(area: Rect, width: u16) -> Rect {
    let [_, middle, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}

fn help_line() -> Line<'static> {
    Line::from(vec![
        "q".bold(),
        " quit  ".dark_gray(),
        "space".bold(),
        " load  ".dark_gray(),
        "a".bold(),
        " animation  ".dark_gray(),
        "d".bold(),
        " direction  ".dark_gray(),
        "l".bold(),
        " layout/content  ".dark_gray(),
        "s".bold(),
        " save  ".dark_gray(),
        "r".bold(),
        " reload".dark_gray(),
    ])
}
