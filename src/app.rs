use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::actors::{ActorHandle, InputActor};
use crate::clipboard::ClipboardSink;
use crate::config::Config;
use crate::generate::DescriptionGenerator;
use crate::render::RenderState;
use crate::store::CommandStore;
use crate::tea::{update, Command, Message, Model};
use crate::{mlog_debug, mlog_error, Result};

const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

/// Collaborators the runtime hands commands to.
pub struct Effects {
    pub store: CommandStore,
    pub generator: Arc<DescriptionGenerator>,
    pub clipboard: Arc<ClipboardSink>,
    pub msg_tx: mpsc::UnboundedSender<Message>,
}

impl Effects {
    pub fn from_config(
        config: &Config,
        msg_tx: mpsc::UnboundedSender<Message>,
    ) -> Result<Self> {
        Ok(Self {
            store: CommandStore::new(config.storage_path()?),
            generator: Arc::new(DescriptionGenerator::from_config(config)),
            clipboard: Arc::new(ClipboardSink::from_config(config)),
            msg_tx,
        })
    }
}

pub struct LogicThread;

impl LogicThread {
    pub fn run(
        config: Config,
        state_tx: Sender<RenderState>,
        state_drain: Receiver<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, state_tx, state_drain, shutdown))
    }

    async fn run_async(
        config: Config,
        state_tx: Sender<RenderState>,
        state_drain: Receiver<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();
        let effects = Effects::from_config(&config, msg_tx.clone())?;
        mlog_debug!(
            "LogicThread::run_async store={} model={} clipboard={}",
            effects.store.path().display(),
            effects.generator.model(),
            effects.clipboard.describe()
        );

        let mut model = Model::load(&effects.store);
        let actors = vec![InputActor::new(msg_tx).spawn()];

        send_state(&state_tx, &state_drain, &model);
        model.dirty = false;

        let mut shutdown_tick = tokio::time::interval(SHUTDOWN_POLL);

        loop {
            tokio::select! {
                msg = msg_rx.recv() => {
                    let Some(msg) = msg else { break };
                    if dispatch(&mut model, msg, &effects) {
                        shutdown.store(true, Ordering::Relaxed);
                        break;
                    }
                    if model.dirty {
                        send_state(&state_tx, &state_drain, &model);
                        model.dirty = false;
                    }
                }
                _ = shutdown_tick.tick() => {
                    if shutdown.load(Ordering::Relaxed) {
                        break;
                    }
                }
            }
        }

        shutdown_actors(&actors);
        Ok(())
    }
}

/// Run one message through `update` and execute the resulting commands in
/// order. Returns true when the session should end.
pub fn dispatch(model: &mut Model, msg: Message, effects: &Effects) -> bool {
    for cmd in update(model, msg) {
        if execute_command(model, cmd, effects) {
            return true;
        }
    }
    false
}

fn execute_command(model: &mut Model, cmd: Command, effects: &Effects) -> bool {
    match cmd {
        Command::GenerateDescription { command } => {
            mlog_debug!("Command::GenerateDescription command={}", command);
            let generator = effects.generator.clone();
            let tx = effects.msg_tx.clone();
            tokio::spawn(async move {
                let msg = match generator.generate(&command).await {
                    Ok(description) => Message::DescriptionGenerated {
                        command,
                        description,
                    },
                    Err(e) => {
                        mlog_error!("Description generation failed: {}", e);
                        Message::DescriptionFailed {
                            command,
                            error: e.to_string(),
                        }
                    }
                };
                let _ = tx.send(msg);
            });
        }

        Command::CopyToClipboard { text } => {
            mlog_debug!("Command::CopyToClipboard len={}", text.len());
            let clipboard = effects.clipboard.clone();
            let tx = effects.msg_tx.clone();
            tokio::spawn(async move {
                let msg = match clipboard.copy(&text).await {
                    Ok(()) => Message::Copied,
                    Err(e) => {
                        mlog_error!("Clipboard copy failed: {}", e);
                        Message::CopyFailed(e.to_string())
                    }
                };
                let _ = tx.send(msg);
            });
        }

        // Synchronous so the file is current before the next message.
        Command::Persist => {
            mlog_debug!("Command::Persist commands={}", model.storage.len());
            if let Err(e) = effects.store.save(&model.storage) {
                mlog_error!("Persist failed: {}", e);
                return dispatch(model, Message::PersistFailed(e.to_string()), effects);
            }
        }

        Command::Quit => {
            mlog_debug!("Command::Quit");
            return true;
        }
    }

    false
}

/// Latest wins: drop any snapshot the render thread has not picked up yet.
fn send_state(state_tx: &Sender<RenderState>, state_drain: &Receiver<RenderState>, model: &Model) {
    while state_drain.try_recv().is_ok() {}
    let _ = state_tx.try_send(model.snapshot());
}

fn shutdown_actors(actors: &[ActorHandle]) {
    mlog_debug!("Shutting down {} actors", actors.len());
    for actor in actors {
        actor.shutdown();
    }
}
