//! The composition root.
//!
//! `Dashboard` owns one instance of every component and is the only place
//! where one component's outcome turns into another component's input (a
//! copy result raising a toast, a submit clearing an input). Every operation
//! returns the effects the runtime must execute; completions come back
//! through the `on_*` handlers.

use crate::clipboard::ClipboardError;
use crate::effect::{Effect, Reaction, Timer};
use crate::geolocation::{LocationError, Position};
use crate::greeting::greeting_now;
use crate::input::{EditKey, InputController, InputEdit, InputTarget, KeyOutcome, SUGGESTIONS};
use crate::layout::LayoutController;
use crate::news::{Article, NewsError, NewsWidget};
use crate::scroll::TranscriptScroll;
use crate::session::{ChatSession, SessionConfig};
use crate::state::{MessageId, ViewMode};
use crate::theme::ThemeMode;
use crate::toast::ToastNotifier;
use crate::weather::WeatherWidget;
use crate::Config;

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub session: SessionConfig,
    pub theme: ThemeMode,
    pub geolocation_supported: bool,
    pub user_name: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            theme: ThemeMode::Dark,
            geolocation_supported: true,
            user_name: "User".to_string(),
        }
    }
}

impl DashboardOptions {
    pub fn from_config(config: &Config, theme: ThemeMode, geolocation_supported: bool) -> Self {
        Self {
            session: config.session(),
            theme,
            geolocation_supported,
            user_name: config.user_name().to_string(),
        }
    }
}

pub struct Dashboard {
    session: ChatSession,
    inputs: InputController,
    layout: LayoutController,
    toasts: ToastNotifier,
    theme: ThemeMode,
    weather: WeatherWidget,
    news: NewsWidget,
    scroll: TranscriptScroll,
    user_name: String,
}

impl Dashboard {
    pub fn new(options: DashboardOptions) -> Self {
        Self {
            session: ChatSession::new(options.session),
            inputs: InputController::new(),
            layout: LayoutController::new(),
            toasts: ToastNotifier::new(),
            theme: options.theme,
            weather: WeatherWidget::new(options.geolocation_supported),
            news: NewsWidget::new(),
            scroll: TranscriptScroll::new(),
            user_name: options.user_name,
        }
    }

    // Read access for rendering

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn view_mode(&self) -> ViewMode {
        self.session.view_mode()
    }

    pub fn inputs(&self) -> &InputController {
        &self.inputs
    }

    pub fn active_input(&self) -> InputTarget {
        self.view_mode().into()
    }

    pub fn layout(&self) -> &LayoutController {
        &self.layout
    }

    pub fn toasts(&self) -> &ToastNotifier {
        &self.toasts
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn weather(&self) -> &WeatherWidget {
        &self.weather
    }

    pub fn news(&self) -> &NewsWidget {
        &self.news
    }

    pub fn scroll(&self) -> &TranscriptScroll {
        &self.scroll
    }

    pub fn greeting(&self) -> String {
        greeting_now(&self.user_name)
    }

    // Operations

    /// Page load: demo weather and the single news request.
    pub fn startup(&mut self) -> Vec<Effect> {
        tracing::info!("dashboard starting");
        let reaction = self.weather.startup();
        let mut effects = self.react(reaction);
        effects.push(Effect::FetchNews);
        effects
    }

    pub fn edit(&mut self, edit: InputEdit) {
        let mode = self.view_mode();
        self.inputs.active_mut(mode).apply(edit);
    }

    /// The activation key on the visible input.
    pub fn press_enter(&mut self, newline_modifier: bool) -> Vec<Effect> {
        let mode = self.view_mode();
        match self.inputs.active_mut(mode).key(EditKey::Enter { newline_modifier }) {
            KeyOutcome::Submit => self.submit(),
            KeyOutcome::Newline => Vec::new(),
        }
    }

    /// Send the visible input's value.
    pub fn submit(&mut self) -> Vec<Effect> {
        let origin = self.active_input();
        let text = self.inputs.widget(origin).value().to_string();

        let submitted = match self.session.submit(&text) {
            Ok(submitted) => submitted,
            Err(reason) => {
                tracing::debug!(%reason, "submit ignored");
                return Vec::new();
            }
        };

        self.inputs.widget_mut(origin).clear();
        if submitted.first_message {
            tracing::info!("entering conversation view");
        }

        vec![
            self.scroll.scroll_to_latest(),
            Effect::schedule(
                submitted.complete_after,
                Timer::CompleteResponse(submitted.placeholder),
            ),
        ]
    }

    /// Fill the visible input with a preset prompt. Returns the widget that
    /// should take focus, or `None` for an unknown index.
    pub fn select_suggestion(&mut self, index: usize) -> Option<InputTarget> {
        let text = SUGGESTIONS.get(index)?;
        let mode = self.view_mode();
        Some(self.inputs.apply_suggestion(mode, text))
    }

    pub fn toggle_sidebar(&mut self) {
        self.layout.toggle();
    }

    pub fn toggle_theme(&mut self) -> Vec<Effect> {
        self.theme = self.theme.toggled();
        tracing::info!(theme = self.theme.as_str(), "theme toggled");

        let (title, description) = self.theme.announcement();
        vec![
            Effect::PersistTheme(self.theme),
            self.toasts.show(title, description),
        ]
    }

    pub fn refresh_weather(&mut self) -> Vec<Effect> {
        let reaction = self.weather.refresh();
        self.react(reaction)
    }

    pub fn geolocate(&mut self) -> Vec<Effect> {
        let reaction = self.weather.geolocate();
        self.react(reaction)
    }

    /// The copy affordance of a completed reply.
    pub fn copy_message(&mut self, id: MessageId) -> Vec<Effect> {
        match self.session.copy_text(id) {
            Some(text) => vec![Effect::CopyToClipboard { text }],
            None => Vec::new(),
        }
    }

    /// Start over on the welcome screen.
    pub fn new_chat(&mut self) {
        tracing::info!("starting a new chat");
        self.session.reset();
        self.inputs.widget_mut(InputTarget::Welcome).clear();
        self.inputs.widget_mut(InputTarget::Chat).clear();
        self.scroll.reset();
    }

    /// Inner width of an input as laid out by the renderer.
    pub fn set_input_wrap_width(&mut self, target: InputTarget, width: usize) {
        self.inputs.widget_mut(target).set_wrap_width(width);
    }

    /// Record transcript geometry from the renderer and perform any pending
    /// jump to the newest message.
    pub fn layout_transcript(&mut self, viewport: u16, content: u16) {
        self.scroll.set_metrics(viewport, content);
        self.scroll.apply_pending();
    }

    pub fn scroll_transcript_up(&mut self, rows: u16) {
        self.scroll.scroll_up(rows);
    }

    pub fn scroll_transcript_down(&mut self, rows: u16) {
        self.scroll.scroll_down(rows);
    }

    pub fn scroll_transcript_to_top(&mut self) {
        self.scroll.scroll_to_top();
    }

    pub fn scroll_transcript_to_latest(&mut self) -> Vec<Effect> {
        vec![self.scroll.scroll_to_latest()]
    }

    // Completions

    pub fn on_timer(&mut self, timer: Timer) -> Vec<Effect> {
        match timer {
            Timer::CompleteResponse(id) => {
                // A reset in between makes the timer stale.
                if self.session.pending() != Some(id) {
                    return Vec::new();
                }
                match self.session.complete_response() {
                    Some(_) => vec![self.scroll.scroll_to_latest()],
                    None => Vec::new(),
                }
            }
            Timer::FadeToast(id) => self.toasts.fade(id).into_iter().collect(),
            Timer::RemoveToast(id) => {
                self.toasts.remove(id);
                Vec::new()
            }
            Timer::ShowDemoWeather { located } => {
                let reaction = self.weather.show_demo(located);
                self.react(reaction)
            }
            Timer::VerifyScroll => {
                self.scroll.verify();
                Vec::new()
            }
        }
    }

    pub fn on_news(&mut self, result: Result<Vec<Article>, NewsError>) -> Vec<Effect> {
        let reaction = self.news.on_result(result);
        self.react(reaction)
    }

    pub fn on_copied(&mut self, result: Result<(), ClipboardError>) -> Vec<Effect> {
        match result {
            Ok(()) => vec![self
                .toasts
                .show("Copied!", "Message content copied to clipboard")],
            Err(err) => {
                tracing::warn!("failed to copy text: {err}");
                vec![self.toasts.show("Error", "Failed to copy message content")]
            }
        }
    }

    pub fn on_position(&mut self, result: Result<Position, LocationError>) -> Vec<Effect> {
        let reaction = self.weather.on_position(result);
        self.react(reaction)
    }

    fn react(&mut self, reaction: Reaction) -> Vec<Effect> {
        let mut effects: Vec<Effect> = reaction
            .notices
            .iter()
            .map(|notice| self.toasts.raise(notice))
            .collect();
        effects.extend(reaction.effects);
        effects
    }
}
