//! Application state and main event loop.

use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use atelier_chat::{
    suggestions, ui, AssistantSignal, AssistantSubscription, ChatWidget, PendingSubmit,
    RelayOutcome, SubmitRejected,
};

use crate::event::{BackendCommand, UiEvent};

/// Main application with widget state and channel handles.
pub struct App {
    widget: ChatWidget,

    /// Trigger side of the open-assistant signal (Ctrl+O).
    signal: AssistantSignal,

    /// The widget's subscription to the signal.
    subscription: AssistantSubscription,

    /// Footer status text.
    status: String,

    /// Receiver for events from the backend.
    ui_rx: mpsc::Receiver<UiEvent>,

    /// Sender for commands to the backend.
    cmd_tx: mpsc::Sender<BackendCommand>,
}

impl App {
    /// Create a new application instance with channel handles.
    pub fn new(
        signal: AssistantSignal,
        ui_rx: mpsc::Receiver<UiEvent>,
        cmd_tx: mpsc::Sender<BackendCommand>,
    ) -> Self {
        Self {
            widget: ChatWidget::new(),
            subscription: signal.subscribe(),
            signal,
            status: "Connecting...".to_string(),
            ui_rx,
            cmd_tx,
        }
    }

    /// Run the main event loop on the current thread.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, &self.widget, &self.status))?;

            // Poll terminal events (non-blocking with short timeout)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break; // quit requested
                    }
                }
            }

            self.drain_events();
        }

        // Send quit command to backend
        let _ = self.cmd_tx.try_send(BackendCommand::Quit);

        Ok(())
    }

    /// Apply pending backend events and signal events.
    fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
        while let Some(event) = self.subscription.try_next() {
            self.widget.apply_signal(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::RelayHealth(true) => {
                self.status = "Relay ready".to_string();
            }
            UiEvent::RelayHealth(false) => {
                self.status = "Relay unreachable".to_string();
            }
            UiEvent::RelayFinished(pending, outcome) => {
                if !self.widget.finish(pending, outcome) {
                    warn!("Relay completion did not match the pending submit");
                }
            }
        }
    }

    /// Handle a key press.
    ///
    /// Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('o') if ctrl => {
                self.signal.raise_open();
            }
            _ if !self.widget.is_open() => {}

            KeyCode::Esc => self.widget.close(),
            KeyCode::Enter => {
                let text = self.widget.input().to_string();
                let submit = self.widget.begin_submit(&text);
                self.start(submit);
            }
            KeyCode::F(n @ 1..=4) => self.suggest(usize::from(n - 1)),
            KeyCode::Char(c @ '1'..='4') if alt => {
                self.suggest(c as usize - '1' as usize);
            }
            KeyCode::Backspace => self.widget.backspace(),
            KeyCode::Char(c) if !ctrl && !alt => self.widget.push_char(c),
            _ => {}
        }
        false
    }

    fn suggest(&mut self, index: usize) {
        let Some(prompt) = suggestions::suggestion(index) else {
            return;
        };
        let submit = self.widget.begin_submit(prompt);
        self.start(submit);
    }

    /// Hand an accepted submit to the backend.
    fn start(&mut self, submit: Result<PendingSubmit, SubmitRejected>) {
        let pending = match submit {
            Ok(pending) => pending,
            Err(reason) => {
                debug!(%reason, "Submit not started");
                return;
            }
        };

        if let Err(e) = self.cmd_tx.try_send(BackendCommand::Relay(pending)) {
            warn!("Backend unavailable, failing submit");
            if let BackendCommand::Relay(pending) = e.into_inner() {
                self.widget.finish(pending, RelayOutcome::Failed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use atelier_core::{notices, ChatRole};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> (App, mpsc::Sender<UiEvent>, mpsc::Receiver<BackendCommand>) {
        let (ui_tx, ui_rx) = mpsc::channel(8);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        (App::new(AssistantSignal::new(), ui_rx, cmd_tx), ui_tx, cmd_rx)
    }

    #[test]
    fn test_ctrl_o_opens_through_signal() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        assert!(!app.widget.is_open());

        app.handle_key(ctrl('o'));
        assert!(!app.widget.is_open());

        app.drain_events();
        assert!(app.widget.is_open());

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.widget.is_open());
    }

    #[test]
    fn test_typing_ignored_while_closed() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.widget.input(), "");
    }

    #[test]
    fn test_enter_dispatches_and_reply_lands() {
        let (mut app, ui_tx, mut cmd_rx) = app();
        app.widget.open();
        for c in "hello".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        let Ok(BackendCommand::Relay(pending)) = cmd_rx.try_recv() else {
            panic!("expected a relay command");
        };
        assert_eq!(pending.message(), "hello");
        assert!(app.widget.is_pending());

        ui_tx
            .try_send(UiEvent::RelayFinished(
                pending,
                RelayOutcome::Replied(Some("Hi!".into())),
            ))
            .unwrap();
        app.drain_events();

        assert!(!app.widget.is_pending());
        assert!(app
            .widget
            .transcript()
            .last()
            .unwrap()
            .same_as(ChatRole::Assistant, "Hi!"));
    }

    #[test]
    fn test_backend_gone_fails_submit() {
        let (mut app, _ui_tx, cmd_rx) = app();
        drop(cmd_rx);
        app.widget.open();

        app.handle_key(key(KeyCode::F(1)));

        assert!(!app.widget.is_pending());
        let messages = app.widget.transcript().messages();
        assert!(messages[0].same_as(ChatRole::User, "Who are the founders?"));
        assert!(messages[1].same_as(ChatRole::Assistant, notices::WIDGET_RELAY_FAILURE));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        assert!(app.handle_key(ctrl('c')));
    }
}
