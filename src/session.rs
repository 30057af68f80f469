//! Per-instrument analysis session.
//!
//! One task owns the pipeline and serializes all candle appends through an
//! mpsc channel. Queued appends are drained before each pass, so a burst of
//! ticks triggers one recompute instead of one per tick, and the resulting
//! report is published last-writer-wins on a watch channel.

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::model::candle::Candle;
use crate::pipeline::{AnalysisPipeline, AnalysisReport};

pub const COMMAND_BUFFER: usize = 256;

#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Feed a candle and schedule a pass.
    Append(Candle),
    /// Re-run the pass on the current window, e.g. after a filter change.
    Refresh,
}

/// Handle held by feed and UI collaborators.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    reports: watch::Receiver<AnalysisReport>,
}

impl SessionHandle {
    pub async fn append(&self, candle: Candle) {
        let _ = self.commands.send(SessionCommand::Append(candle)).await;
    }

    pub async fn refresh(&self) {
        let _ = self.commands.send(SessionCommand::Refresh).await;
    }

    /// Latest published report.
    pub fn report(&self) -> AnalysisReport {
        self.reports.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalysisReport> {
        self.reports.clone()
    }
}

/// Spawn the session task and return its handle. The task exits when every
/// handle is dropped.
pub fn spawn(config: AnalysisConfig) -> SessionHandle {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (report_tx, report_rx) = watch::channel(AnalysisReport::empty());
    let pipeline = AnalysisPipeline::new(config);
    tokio::spawn(run(pipeline, command_rx, report_tx));
    SessionHandle {
        commands: command_tx,
        reports: report_rx,
    }
}

async fn run(
    mut pipeline: AnalysisPipeline,
    mut commands: mpsc::Receiver<SessionCommand>,
    reports: watch::Sender<AnalysisReport>,
) {
    while let Some(first) = commands.recv().await {
        apply(&mut pipeline, first);
        // Coalesce whatever queued behind the first command into this pass.
        while let Ok(next) = commands.try_recv() {
            apply(&mut pipeline, next);
        }
        let report = pipeline.analyze();
        let _ = reports.send(report);
    }
    debug!("session channel closed, task exiting");
}

fn apply(pipeline: &mut AnalysisPipeline, command: SessionCommand) {
    match command {
        SessionCommand::Append(candle) => {
            if let Err(err) = pipeline.append(candle) {
                warn!(%err, "candle rejected");
            }
        }
        SessionCommand::Refresh => {}
    }
}
