#![forbid(unsafe_code)]

//! Dialog shell: composition, pointer routing, and host embedding.
//!
//! # Role
//! The shell owns one `Session` while the host keeps the dialog open and
//! nothing while it is closed. A session bundles every per-open entity
//! (window, call, panels, splitter override, transcript, gesture slot);
//! dropping it after [`CallController::teardown`] is how "state discarded at
//! close" is realized.
//!
//! # Pointer routing
//! A primary pointer-down is classified once, by hit location, into a
//! [`GestureKind`] and stored in the session's [`GestureSlot`]. Every move
//! until pointer-up goes to that owner only:
//!
//! | Hit | Owner |
//! |---|---|
//! | window corner handle | [`WindowController`] resize |
//! | title bar | [`WindowController`] drag |
//! | transcript/insight splitter | [`SplitterState`] |
//! | panel bottom edge | [`PanelCollection::resize_panel`] for that id |
//!
//! A pointer-down while a gesture is active is ignored, so two owners can
//! never run at once. In `Minimized` mode the card restores on click and its
//! close button requests close.
//!
//! # Time
//! The host calls [`DialogShell::tick`] with its clock. Actions that depend
//! on call state process due timers first so they act on the current state.

use calldeck_core::event::{PointerButton, PointerEvent, PointerEventKind};
use calldeck_core::geometry::{Point, Rect, Size};
use calldeck_core::gesture::GestureSlot;
use calldeck_layout::{LayoutArrangement, RegionHit, RegionMap, SplitterState, resolve_regions};
use tracing::{debug, info, info_span, trace};
use web_time::Instant;

use crate::call::{CallController, CallEvent, CallState};
use crate::config::DialogConfig;
use crate::error::CloseOutcome;
use crate::insight::PanelKind;
use crate::mock::{CannedData, MockData, duration_label};
use crate::panels::{PanelCollection, PanelId};
use crate::transcript::Transcript;
use crate::view::{BodyView, DialogView, QuickStats, title_for};
use crate::window::{WindowController, WindowMode};

/// Host embedding properties.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostProps {
    pub open: bool,
    /// Top-left at open; the configured default when `None`.
    pub initial_position: Option<Point>,
}

/// Gesture owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    WindowDrag,
    WindowResize,
    Splitter,
    PanelResize(PanelId),
}

/// Button and menu actions reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogAction {
    StartCall,
    EndCall,
    ToggleMute,
    ToggleVideo,
    Minimize,
    ToggleMaximize,
    Restore,
    Close,
    AddPanel(PanelKind),
    RemovePanel(PanelId),
    ToggleCollapse(PanelId),
    ResizePanel(PanelId, f32),
    ResetSplitter,
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    Ignored,
    GestureStarted(GestureKind),
    Moved(GestureKind),
    GestureEnded(GestureKind),
    Restored,
    CloseRequested(CloseOutcome),
}

struct Session {
    window: WindowController,
    call: CallController,
    panels: PanelCollection,
    splitter: SplitterState,
    transcript: Transcript,
    gestures: GestureSlot<GestureKind>,
}

impl Session {
    fn new(config: &DialogConfig, props: &HostProps, data: &dyn MockData) -> Self {
        Self {
            window: WindowController::new(&config.window, props.initial_position),
            call: CallController::new(&config.call),
            panels: PanelCollection::new(&config.panels),
            splitter: SplitterState::new(),
            transcript: Transcript::with_entries(data.initial_transcript()),
            gestures: GestureSlot::new(),
        }
    }

    fn layout(
        &self,
        config: &DialogConfig,
    ) -> Option<(LayoutArrangement<PanelId>, RegionMap<PanelId>)> {
        let body = self.window.body()?;
        let arrangement = self.panels.arrangement();
        let share = self
            .splitter
            .effective_share(arrangement.transcript_share, arrangement.panel_count());
        let share = if arrangement.panel_count() == 0 || body.width <= 0.0 {
            share
        } else {
            let width = config
                .splitter_bounds()
                .clamp_transcript_width(body.width * share, body.width);
            width / body.width
        };
        let columns = self.panels.column_boxes(&arrangement);
        let regions = resolve_regions(body, share, &columns, &config.region_config());
        Some((arrangement, regions))
    }
}

/// The dialog as embedded by a host page.
pub struct DialogShell<D = CannedData> {
    config: DialogConfig,
    props: HostProps,
    data: D,
    session: Option<Session>,
    on_close: Box<dyn FnMut()>,
}

impl DialogShell<CannedData> {
    /// Shell backed by the canned mock data, seeded from `config.call.feed_seed`.
    #[must_use]
    pub fn new(config: DialogConfig, props: HostProps, on_close: impl FnMut() + 'static) -> Self {
        let data = CannedData::new(config.call.feed_seed);
        Self::with_data(config, props, data, on_close)
    }
}

impl<D: MockData> DialogShell<D> {
    /// Shell backed by a custom data collaborator.
    #[must_use]
    pub fn with_data(
        config: DialogConfig,
        props: HostProps,
        data: D,
        on_close: impl FnMut() + 'static,
    ) -> Self {
        let mut shell = Self {
            config,
            props: HostProps {
                open: false,
                ..props
            },
            data,
            session: None,
            on_close: Box::new(on_close),
        };
        shell.set_open(props.open);
        shell
    }

    #[must_use]
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Mount or unmount. Unmounting cancels every pending timer and drops
    /// all per-open state; mounting again starts from defaults.
    pub fn set_open(&mut self, open: bool) {
        self.props.open = open;
        match (open, self.session.is_some()) {
            (true, false) => {
                let _span = info_span!("calldeck.open").entered();
                self.session = Some(Session::new(&self.config, &self.props, &self.data));
                info!(target: "calldeck.shell", "dialog opened");
            }
            (false, true) => {
                if let Some(mut session) = self.session.take() {
                    let cancelled = session.call.teardown();
                    info!(target: "calldeck.shell", cancelled_timers = cancelled, "dialog closed");
                }
            }
            _ => {}
        }
    }

    /// Report the host viewport size.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.config.window.viewport = viewport;
        if let Some(s) = &mut self.session {
            s.window.set_viewport(viewport);
        }
    }

    #[must_use]
    pub fn window(&self) -> Option<&WindowController> {
        self.session.as_ref().map(|s| &s.window)
    }

    #[must_use]
    pub fn call(&self) -> Option<&CallController> {
        self.session.as_ref().map(|s| &s.call)
    }

    #[must_use]
    pub fn panels(&self) -> Option<&PanelCollection> {
        self.session.as_ref().map(|s| &s.panels)
    }

    #[must_use]
    pub fn transcript(&self) -> Option<&Transcript> {
        self.session.as_ref().map(|s| &s.transcript)
    }

    #[must_use]
    pub fn splitter(&self) -> Option<&SplitterState> {
        self.session.as_ref().map(|s| &s.splitter)
    }

    /// Kind of the gesture in progress.
    #[must_use]
    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.session
            .as_ref()
            .and_then(|s| s.gestures.active().map(|g| g.kind))
    }

    /// Process timers due at `now`. Returns how many transcript entries
    /// were appended.
    pub fn tick(&mut self, now: Instant) -> usize {
        let Some(session) = &mut self.session else {
            return 0;
        };
        let mut appended = 0;
        for event in session.call.advance(now) {
            match event {
                CallEvent::FeedTick { elapsed } => {
                    let id = session.transcript.append(self.data.next_entry(elapsed));
                    trace!(target: "calldeck.shell", entry_id = id.get(), "feed entry appended");
                    appended += 1;
                }
                CallEvent::StateChanged { from, to } => {
                    debug!(target: "calldeck.shell", %from, %to, "call advanced");
                }
            }
        }
        appended
    }

    /// Ask to close. On success the host's close callback runs; the host is
    /// expected to follow with `set_open(false)`.
    pub fn request_close(&mut self, now: Instant) -> CloseOutcome {
        self.tick(now);
        let Some(session) = &self.session else {
            return CloseOutcome::Closed;
        };
        let outcome = session.window.request_close(session.call.state());
        if outcome.is_closed() {
            (self.on_close)();
        }
        outcome
    }

    /// Apply a renderer action. Returns whether anything changed.
    pub fn dispatch(&mut self, action: DialogAction, now: Instant) -> bool {
        if action == DialogAction::Close {
            return self.request_close(now).is_closed();
        }
        self.tick(now);
        let Some(s) = &mut self.session else {
            return false;
        };
        trace!(target: "calldeck.shell", ?action, "dispatch");
        match action {
            DialogAction::StartCall => s.call.start(now),
            DialogAction::EndCall => s.call.end(now),
            DialogAction::ToggleMute => s.call.toggle_mute(),
            DialogAction::ToggleVideo => s.call.toggle_video(),
            DialogAction::Minimize | DialogAction::ToggleMaximize | DialogAction::Restore => {
                let before = s.window.mode();
                s.gestures.end();
                match action {
                    DialogAction::Minimize => s.window.minimize(),
                    DialogAction::ToggleMaximize => s.window.maximize(),
                    _ => s.window.restore(),
                }
                s.window.mode() != before
            }
            DialogAction::AddPanel(kind) => s.panels.add_panel(kind).is_some(),
            DialogAction::RemovePanel(id) => s.panels.remove_panel(id),
            DialogAction::ToggleCollapse(id) => s.panels.toggle_collapse(id),
            DialogAction::ResizePanel(id, h) => s.panels.resize_panel(id, h),
            DialogAction::ResetSplitter => {
                let had = s.splitter.override_share().is_some();
                s.splitter.reset();
                had
            }
            DialogAction::Close => false,
        }
    }

    /// Route one pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> PointerOutcome {
        if self.session.is_none() {
            return PointerOutcome::Ignored;
        }
        match event.kind {
            PointerEventKind::Down(_) if event.is_primary_down() => {
                self.pointer_down(event.pos, now)
            }
            PointerEventKind::Move => self.pointer_move(event.pos),
            PointerEventKind::Up(PointerButton::Primary) | PointerEventKind::Cancel => {
                self.pointer_up()
            }
            PointerEventKind::Down(_) | PointerEventKind::Up(_) => PointerOutcome::Ignored,
        }
    }

    fn pointer_down(&mut self, p: Point, now: Instant) -> PointerOutcome {
        let layout = match &self.session {
            Some(s) if !s.gestures.is_active() => s.layout(&self.config),
            _ => return PointerOutcome::Ignored,
        };
        let Some(s) = &mut self.session else {
            return PointerOutcome::Ignored;
        };

        if s.window.mode() == WindowMode::Minimized {
            if s.window.minimized_close_button().is_some_and(|r| r.contains(p)) {
                return PointerOutcome::CloseRequested(self.request_close(now));
            }
            if s.window.bounds().contains(p) {
                s.window.restore();
                return PointerOutcome::Restored;
            }
            return PointerOutcome::Ignored;
        }

        let target = if s.window.resize_handle().is_some_and(|r| r.contains(p)) {
            Some((GestureKind::WindowResize, s.window.bounds()))
        } else if s.window.title_bar().is_some_and(|r| r.contains(p)) {
            Some((GestureKind::WindowDrag, s.window.bounds()))
        } else {
            layout.and_then(|(_, regions)| match regions.hit_test(p)? {
                RegionHit::Splitter => Some((GestureKind::Splitter, regions.transcript)),
                RegionHit::PanelResize(id) => regions
                    .panel(id)
                    .map(|r| (GestureKind::PanelResize(id), r.rect)),
                RegionHit::Panel(_) | RegionHit::Transcript | RegionHit::Insight => None,
            })
        };
        let Some((kind, origin)) = target else {
            return PointerOutcome::Ignored;
        };

        let accepted = match kind {
            GestureKind::WindowDrag => s.window.begin_drag(p),
            GestureKind::WindowResize => s.window.begin_resize(p),
            GestureKind::Splitter | GestureKind::PanelResize(_) => true,
        };
        if accepted && s.gestures.begin(kind, p, origin) {
            debug!(target: "calldeck.shell", ?kind, "gesture owner selected");
            PointerOutcome::GestureStarted(kind)
        } else {
            s.window.end_gesture();
            PointerOutcome::Ignored
        }
    }

    fn pointer_move(&mut self, p: Point) -> PointerOutcome {
        let bounds = self.config.splitter_bounds();
        let Some(s) = &mut self.session else {
            return PointerOutcome::Ignored;
        };
        let Some((gesture, delta)) = s.gestures.displacement(p) else {
            return PointerOutcome::Ignored;
        };
        match gesture.kind {
            GestureKind::WindowDrag | GestureKind::WindowResize => {
                s.window.on_pointer_move(p);
            }
            GestureKind::Splitter => {
                if let Some(body) = s.window.body() {
                    s.splitter.drag_to(
                        gesture.origin_geometry.width,
                        delta.x,
                        body.width,
                        bounds,
                    );
                }
            }
            GestureKind::PanelResize(id) => {
                s.panels
                    .resize_panel(id, gesture.origin_geometry.height + delta.y);
            }
        }
        PointerOutcome::Moved(gesture.kind)
    }

    fn pointer_up(&mut self) -> PointerOutcome {
        let Some(s) = &mut self.session else {
            return PointerOutcome::Ignored;
        };
        let Some(ended) = s.gestures.end() else {
            return PointerOutcome::Ignored;
        };
        if matches!(ended.kind, GestureKind::WindowDrag | GestureKind::WindowResize) {
            s.window.end_gesture();
        }
        PointerOutcome::GestureEnded(ended.kind)
    }

    /// Snapshot for rendering. `None` while closed.
    #[must_use]
    pub fn view(&self, now: Instant) -> Option<DialogView<'_>> {
        let s = self.session.as_ref()?;
        let call_state = s.call.state();
        let mode = s.window.mode();
        let insights = self.data.insights();
        let body = s.layout(&self.config).map(|(arrangement, regions)| BodyView {
            arrangement,
            regions,
            transcript: s.transcript.entries(),
            panels: s.panels.panels(),
            available_kinds: s.panels.available_kinds(),
            insights,
            quick_stats: QuickStats {
                duration: duration_label(s.call.elapsed(now)),
                participants: insights.participant_count(),
            },
        });
        Some(DialogView {
            mode,
            bounds: s.window.bounds(),
            title: title_for(mode, call_state),
            call_state,
            live: call_state == CallState::Active,
            status: s.call.status_label(now),
            controls: s.call.controls(),
            body,
        })
    }

    /// Body rectangle of the open window, if it has one.
    #[must_use]
    pub fn body_rect(&self) -> Option<Rect> {
        self.session.as_ref().and_then(|s| s.window.body())
    }
}

impl<D> std::fmt::Debug for DialogShell<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogShell")
            .field("open", &self.props.open)
            .field("mode", &self.session.as_ref().map(|s| s.window.mode()))
            .field("call", &self.session.as_ref().map(|s| s.call.state()))
            .finish_non_exhaustive()
    }
}
