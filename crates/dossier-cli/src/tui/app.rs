//! Application state and main event loop.

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use dossier_core::{Config, ResearchProvider, ResearchSession, StreamChunk, SubmitError};

use super::event::{Event, EventHandler};
use super::ui;

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Advisory loading text shown in the status bar while a stream is active.
/// Display-only; the session state machine is the source of truth.
const LOADING_MESSAGES: &[&str] = &[
    "Contacting the model...",
    "Searching the web...",
    "Reading sources...",
    "Drafting sections...",
    "Checking citations...",
    "Still researching, long topics take a while...",
];

/// How many ticks (at 100ms) each loading message stays up.
const TICKS_PER_LOADING_MESSAGE: usize = 30;

/// How long the "copied" confirmation stays visible.
const COPY_FLASH: Duration = Duration::from_millis(1500);

/// Presentation flags, kept as one explicit record.
///
/// These are independent of each other and of the research state; the
/// Idle/Researching invariant lives in [`ResearchSession`] only.
#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    /// Whether the document panel is shown.
    pub artifact_open: bool,
    /// Set when the document was copied; cleared after [`COPY_FLASH`].
    pub copied_at: Option<Instant>,
}

impl PanelState {
    pub fn copy_flash_active(&self) -> bool {
        self.copied_at
            .is_some_and(|at| at.elapsed() < COPY_FLASH)
    }

    fn expire_copy_flash(&mut self) {
        if !self.copy_flash_active() {
            self.copied_at = None;
        }
    }
}

/// Main application state.
pub struct App {
    /// The streaming-merge state machine
    pub session: ResearchSession,
    /// Current input mode
    pub input_mode: InputMode,
    /// Input buffer for user typing
    pub input_buffer: String,
    /// Presentation flags
    pub panel: PanelState,
    /// Scroll offset for chat
    pub scroll_offset: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Transient status notice
    pub status_message: Option<String>,
    /// Configuration
    pub config: Config,
    /// Ticks elapsed in the current research stream
    tick_count: usize,
    /// Generation provider shared with spawned stream tasks
    provider: Arc<dyn ResearchProvider>,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: Config, provider: Arc<dyn ResearchProvider>) -> Self {
        let mut session = ResearchSession::new();
        session.push_system(
            "Welcome to Dossier. Type a topic and press Enter to research it; \
             answers stream into the document panel with their sources.",
        );

        Self {
            session,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            panel: PanelState {
                artifact_open: config.ui.artifact_open,
                copied_at: None,
            },
            scroll_offset: 0,
            should_quit: false,
            status_message: None,
            config,
            tick_count: 0,
            provider,
        }
    }

    /// Run the main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        let mut events = EventHandler::new();

        loop {
            // Draw UI
            terminal.draw(|frame| ui::render(self, frame))?;

            // Handle events
            if let Some(event) = events.next().await {
                match event {
                    Event::Key(key) => self.handle_key_event(key, events.sender()),
                    Event::Tick => self.on_tick(),
                    Event::Chunk(chunk) => self.session.on_chunk(&chunk),
                    Event::StreamDone => {
                        self.session.on_stream_end();
                        self.status_message = None;
                    }
                    Event::StreamFailed(error) => {
                        self.session.on_stream_error(&error);
                        self.status_message = None;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance time-based display state.
    fn on_tick(&mut self) {
        if self.session.is_researching() {
            self.tick_count += 1;
        }
        self.panel.expire_copy_flash();
    }

    /// The advisory loading message for the current tick.
    pub fn loading_message(&self) -> &'static str {
        LOADING_MESSAGES[(self.tick_count / TICKS_PER_LOADING_MESSAGE) % LOADING_MESSAGES.len()]
    }

    /// Get the current model name for display.
    pub fn current_model(&self) -> String {
        self.config.provider.model_or_default()
    }

    /// Handle a key event.
    fn handle_key_event(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode_key(key),
            InputMode::Editing => self.handle_editing_mode_key(key, event_tx),
        }
    }

    /// Handle key in normal mode.
    fn handle_normal_mode_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('i') | KeyCode::Enter => {
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Char('d') => {
                self.panel.artifact_open = !self.panel.artifact_open;
            }
            KeyCode::Char('y') => {
                self.copy_artifact();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_up();
            }
            _ => {}
        }
    }

    /// Handle key in editing mode.
    fn handle_editing_mode_key(&mut self, key: KeyEvent, event_tx: mpsc::UnboundedSender<Event>) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.input_buffer.push('\n');
            }
            KeyCode::Enter => {
                self.submit_input(event_tx);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            _ => {}
        }
    }

    /// Submit the current input as a research topic.
    fn submit_input(&mut self, event_tx: mpsc::UnboundedSender<Event>) {
        let topic = self.input_buffer.clone();

        match self.session.submit(&topic) {
            Ok(request) => {
                self.input_buffer.clear();
                self.input_mode = InputMode::Normal;
                self.tick_count = 0;
                self.scroll_offset = 0;

                let provider = Arc::clone(&self.provider);

                // Stream on a separate task; chunks come back as events and
                // are folded into the session by the event loop, so all
                // artifact mutation stays on that single path.
                tokio::spawn(async move {
                    let (tx, mut rx) = mpsc::unbounded_channel::<StreamChunk>();

                    let forward_tx = event_tx.clone();
                    let forward = tokio::spawn(async move {
                        while let Some(chunk) = rx.recv().await {
                            if !chunk.is_final && forward_tx.send(Event::Chunk(chunk)).is_err() {
                                break;
                            }
                        }
                    });

                    let result = provider.stream_research(&request, tx).await;
                    // All chunks are forwarded before the terminal event.
                    let _ = forward.await;

                    match result {
                        Ok(()) => {
                            let _ = event_tx.send(Event::StreamDone);
                        }
                        Err(err) => {
                            let _ = event_tx.send(Event::StreamFailed(err.to_string()));
                        }
                    }
                });
            }
            // Empty input and submit-while-researching are silent no-ops.
            Err(SubmitError::EmptyTopic) | Err(SubmitError::Busy) => {}
        }
    }

    /// Copy the document to the system clipboard.
    fn copy_artifact(&mut self) {
        let artifact = self.session.artifact();
        if artifact.is_empty() {
            self.status_message = Some("Document is empty".to_string());
            return;
        }

        if copy_to_clipboard(artifact.as_str()) {
            self.panel.copied_at = Some(Instant::now());
            self.status_message = Some("Document copied to clipboard".to_string());
        } else {
            self.status_message = Some("No clipboard command available".to_string());
            tracing::warn!("no clipboard command found (tried pbcopy, wl-copy, xclip)");
        }
    }

    /// Scroll chat up.
    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    /// Scroll chat down.
    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

/// Pipe text into the first clipboard command that works.
fn copy_to_clipboard(text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let commands: &[(&str, &[&str])] = &[
        ("pbcopy", &[]),
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
    ];

    for (program, args) in commands {
        let spawned = Command::new(program)
            .args(*args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        if let Ok(mut child) = spawned {
            if let Some(mut stdin) = child.stdin.take() {
                if stdin.write_all(text.as_bytes()).is_err() {
                    continue;
                }
            }
            if matches!(child.wait(), Ok(status) if status.success()) {
                return true;
            }
        }
    }

    false
}
