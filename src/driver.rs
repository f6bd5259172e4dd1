#![cfg(feature = "std")]
//! Async plumbing between the rules engine and the outside world.
//!
//! A [`Sensor`] yields input events and is told which handlers to arm; a
//! [`Presenter`] receives view commands one at a time, in order.

use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

use crate::{
    common::PlayerId,
    event::{Command, Control, ControlSet, Event},
    rules::Outcome,
    session::Session,
};

#[async_trait::async_trait]
pub trait Sensor: Send {
    /// Next input event, or `None` once input is exhausted.
    async fn next_event(&mut self) -> Option<Event>;

    /// Arm or disarm handlers.
    fn apply_controls(&mut self, controls: &[Control]);
}

#[async_trait::async_trait]
pub trait Presenter: Send {
    async fn present(&mut self, command: &Command) -> anyhow::Result<()>;
}

/// Drive `session` until the game ends or input runs out. Returns the winner.
pub async fn run<S, P>(
    session: &mut Session,
    sensor: &mut S,
    presenter: &mut P,
) -> anyhow::Result<Option<PlayerId>>
where
    S: Sensor + ?Sized,
    P: Presenter + ?Sized,
{
    let outcome = session.start();
    deliver(outcome, sensor, presenter).await?;
    while !session.is_over() {
        let Some(event) = sensor.next_event().await else {
            debug!("input exhausted before the game ended");
            break;
        };
        let outcome = session.apply(event);
        deliver(outcome, sensor, presenter).await?;
    }
    if let Some(winner) = session.winner() {
        info!("game over, {} won", winner);
    }
    Ok(session.winner())
}

async fn deliver<S, P>(outcome: Outcome, sensor: &mut S, presenter: &mut P) -> anyhow::Result<()>
where
    S: Sensor + ?Sized,
    P: Presenter + ?Sized,
{
    for command in &outcome.commands {
        presenter.present(command).await?;
    }
    if !outcome.controls.is_empty() {
        sensor.apply_controls(&outcome.controls);
    }
    Ok(())
}

/// Drops events whose handler is disarmed and repeated identical moves.
#[derive(Debug, Default)]
struct Gate {
    armed: ControlSet,
    last_move: Option<Event>,
}

impl Gate {
    fn admit(&mut self, event: Event) -> bool {
        if !self.armed.accepts(&event) {
            debug!("dropping {} (handler disarmed)", event);
            return false;
        }
        if matches!(event, Event::Move { .. }) {
            if self.last_move == Some(event) {
                return false;
            }
            self.last_move = Some(event);
        } else {
            self.last_move = None;
        }
        true
    }

    fn apply(&mut self, controls: &[Control]) {
        for &control in controls {
            self.armed.apply(control);
        }
    }
}

/// Sensor fed through an in-process channel.
pub struct ChannelSensor {
    events: mpsc::UnboundedReceiver<Event>,
    gate: Gate,
}

impl ChannelSensor {
    /// A sensor and the sender that feeds it. Dropping every sender ends input.
    pub fn pair() -> (mpsc::UnboundedSender<Event>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                events: rx,
                gate: Gate::default(),
            },
        )
    }

    pub fn armed(&self) -> ControlSet {
        self.gate.armed
    }
}

#[async_trait::async_trait]
impl Sensor for ChannelSensor {
    async fn next_event(&mut self) -> Option<Event> {
        loop {
            let event = self.events.recv().await?;
            if self.gate.admit(event) {
                return Some(event);
            }
        }
    }

    fn apply_controls(&mut self, controls: &[Control]) {
        self.gate.apply(controls);
    }
}

/// Sensor reading one event per line in the text syntax of [`Event`].
/// Blank lines and lines starting with `#` are skipped; unparsable lines are
/// reported and skipped.
pub struct LineSensor<R> {
    lines: Lines<R>,
    gate: Gate,
}

impl<R: AsyncBufRead + Unpin + Send> LineSensor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            gate: Gate::default(),
        }
    }
}

#[async_trait::async_trait]
impl<R: AsyncBufRead + Unpin + Send> Sensor for LineSensor<R> {
    async fn next_event(&mut self) -> Option<Event> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    log::error!("reading input failed: {}", e);
                    return None;
                }
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.parse::<Event>() {
                Ok(event) if self.gate.admit(event) => return Some(event),
                Ok(_) => {}
                Err(e) => log::warn!("{}", e),
            }
        }
    }

    fn apply_controls(&mut self, controls: &[Control]) {
        info!("controls: {:?}", controls);
        self.gate.apply(controls);
    }
}

/// Presenter that keeps every command it was handed.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub commands: Vec<Command>,
}

#[async_trait::async_trait]
impl Presenter for RecordingPresenter {
    async fn present(&mut self, command: &Command) -> anyhow::Result<()> {
        self.commands.push(command.clone());
        Ok(())
    }
}
