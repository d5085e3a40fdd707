//! Live queue board (`turnos board`)
//!
//! Shows the "now serving" display: waiting tickets on the left, tickets
//! being served on the right, a clock in the header. Fed by a fixed
//! 5-second poll and, when the backend supports it, a row-level change
//! stream that also drives the spoken call-outs.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use iocraft::prelude::*;
use tokio::sync::broadcast;

use crate::announce::{Announcer, Speaker, SpeechSynthesizer, announce};
use crate::config::Config;
use crate::store::{MemoryStore, TicketSource};
use crate::tui::components::{Footer, Header, QueueColumn, board_shortcuts};
use crate::tui::model::{BoardState, FetchGuard, compute_view_model};
use crate::tui::theme::theme;
use crate::tui::timers::TimerRegistry;
use crate::types::TicketStatus;

/// Props for the QueueBoard component
#[derive(Default, Props)]
pub struct QueueBoardProps {
    /// Ticket backend. Falls back to an empty in-memory store when unset.
    pub source: Option<Arc<dyn TicketSource>>,

    /// Application configuration (refresh period, hide delay, speech).
    pub config: Config,
}

/// Fetch a snapshot under the in-flight guard and write the projection
/// into the display state. A failed fetch keeps the last good data; a
/// trigger that arrives mid-fetch coalesces into one follow-up fetch.
async fn guarded_refresh(
    source: &dyn TicketSource,
    guard: &Mutex<FetchGuard>,
    mut board: State<BoardState>,
) {
    let acquired = guard
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .begin();
    if !acquired {
        return;
    }
    loop {
        match source.fetch_snapshot().await {
            Ok(snapshot) => {
                let mut state = board.read().clone();
                state.apply_snapshot(&snapshot);
                board.set(state);
            }
            Err(e) => {
                tracing::debug!(error = %e, "snapshot fetch failed, keeping last good display");
            }
        }
        let rerun = guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .finish();
        if !rerun {
            break;
        }
    }
}

/// Main queue board component
///
/// Layout:
/// ```text
/// +------------------------------------------+
/// | Business name          en vivo  14:02:11 |
/// +---------------------+--------------------+
/// |     EN ESPERA       |     ATENDIENDO     |
/// |         3           |          2         |
/// +---------------------+--------------------+
/// | T-041  Ana          | T-039  Luis Caja 2 |
/// | T-042  Sofía        | T-038  Eva  Caja 1 |
/// +---------------------+--------------------+
/// | [q] Salir                                |
/// +------------------------------------------+
/// ```
#[component]
pub fn QueueBoard<'a>(props: &QueueBoardProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let board: State<BoardState> = hooks.use_state(BoardState::default);
    let mut should_exit = hooks.use_state(|| false);

    // Resolved once; later renders reuse the same backend and guard
    let source_state: State<Arc<dyn TicketSource>> = hooks.use_state(|| {
        props
            .source
            .clone()
            .unwrap_or_else(|| Arc::new(MemoryStore::new()))
    });
    let guard_state: State<Arc<Mutex<FetchGuard>>> =
        hooks.use_state(|| Arc::new(Mutex::new(FetchGuard::default())));

    let source: Arc<dyn TicketSource> = source_state.read().clone();
    let guard: Arc<Mutex<FetchGuard>> = guard_state.read().clone();

    let refresh_period = Duration::from_secs(props.config.display.refresh_secs.max(1));
    let hide_delay = Duration::from_secs(props.config.display.hide_delay_secs);
    let speech_config = props.config.speech.clone();

    // Periodic refresh loop: clock tick plus snapshot re-fetch. The first
    // tick is immediate, which doubles as the initial load.
    hooks.use_future({
        let source = Arc::clone(&source);
        let guard = Arc::clone(&guard);
        let mut board = board;
        async move {
            let mut interval = tokio::time::interval(refresh_period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let mut state = board.read().clone();
                state.tick_clock();
                board.set(state);
                guarded_refresh(source.as_ref(), &guard, board).await;
            }
        }
    });

    // Change-stream loop: re-fetch on every event and run the announcer.
    // Backends without a push channel make this a no-op and the board
    // degrades to poll-only with no user-visible error.
    hooks.use_future({
        let source = Arc::clone(&source);
        let guard = Arc::clone(&guard);
        let mut board = board;
        async move {
            let mut rx = match source.subscribe() {
                Ok(rx) => rx,
                Err(e) => {
                    tracing::debug!(error = %e, "change stream unavailable, polling only");
                    return;
                }
            };

            {
                let mut state = board.read().clone();
                state.stream_live = true;
                board.set(state);
            }

            let speaker: Arc<dyn Speaker> = Arc::new(SpeechSynthesizer::new(speech_config));
            // Owned by this task: dropping the future on unmount aborts
            // every pending removal timer.
            let timers = TimerRegistry::new();
            let mut announcer = Announcer::new();

            loop {
                let event = match rx.recv().await {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        // Missed events are recovered by the snapshot fetch
                        guarded_refresh(source.as_ref(), &guard, board).await;
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };

                let announcement = announcer.on_change(&event);

                if let Some(announcement) = &announcement {
                    // Re-arrival: restart its hide window and show it again
                    timers.cancel(&announcement.ticket_id);
                    let mut state = board.read().clone();
                    state.unhide(&announcement.ticket_id);
                    board.set(state);
                }

                // Stay consistent with the projection before the call-out
                guarded_refresh(source.as_ref(), &guard, board).await;

                if let Some(announcement) = announcement {
                    announce(speaker.as_ref(), &announcement).await;

                    let id = announcement.ticket_id.clone();
                    let timer_board = board;
                    timers.schedule(id.clone(), hide_delay, move || {
                        let mut board = timer_board;
                        let mut state = board.read().clone();
                        if state.hide_accepted(&id) {
                            board.set(state);
                        }
                    });
                }
            }
        }
    });

    hooks.use_terminal_events({
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let mut should_exit = should_exit;
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => should_exit.set(true),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        should_exit.set(true)
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let state = board.read().clone();
    let vm = compute_view_model(&state);
    let theme = theme();

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            Header(
                business_name: props.config.display.business_name.clone(),
                clock: vm.clock.clone(),
                stream_live: vm.stream_live,
            )

            View(
                flex_grow: 1.0,
                width: 100pct,
                flex_direction: FlexDirection::Row,
                overflow: Overflow::Hidden,
            ) {
                QueueColumn(
                    title: "EN ESPERA".to_string(),
                    rows: vm.pending_rows.clone(),
                    accent: Some(theme.status_color(TicketStatus::Queued)),
                )
                QueueColumn(
                    title: "ATENDIENDO".to_string(),
                    rows: vm.serving_rows.clone(),
                    accent: Some(theme.status_color(TicketStatus::Accepted)),
                )
            }

            Footer(shortcuts: board_shortcuts())
        }
    }
}
