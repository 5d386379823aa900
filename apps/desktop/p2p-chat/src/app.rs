//! Wiring of the console application.
//!
//! One transport connection serves both the dispatcher and the command
//! gateway. A render task prints every published display model; the input
//! loop turns prompt lines into gateway calls.

use crate::alert::ConsoleNotifier;
use crate::commands::{HELP, ShellCommand};
use crate::error::ChatAppError;
use crate::render::render;

use client_core::config::ClientConfig;
use client_core::dispatcher::Dispatcher;
use client_core::gateway::{CommandGateway, ComposeForm, NodeBackend};
use client_core::notify::SharedNotifier;
use client_core::state::SyncState;
use client_core::transport::WsBackend;
use common::ErrorLocation;

use std::io::Write;
use std::panic::Location;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;

/// Connect to the backend and run until `/quit` or end of input.
///
/// # Errors
///
/// * [`ChatAppError::Core`] - Backend could not be reached
/// * [`ChatAppError::App`] - Input could not be read
pub async fn run<R>(config: &ClientConfig, input: R) -> Result<(), ChatAppError>
where
    R: AsyncBufRead + Unpin,
{
    let backend = WsBackend::connect(&config.backend.url, config.dispatcher.channel_capacity).await?;
    let notifier: SharedNotifier = Arc::new(ConsoleNotifier::stderr());

    let session = Session::new(backend, config, notifier);
    let handle = session.dispatcher.start(session.gateway.backend()).await;
    let renderer = spawn_renderer(&session.state);

    let result = session.read_commands(input).await;

    handle.abort();
    renderer.abort();
    info!("Console session ended");
    result
}

/// Everything one console session drives.
pub struct Session<B> {
    pub state: SyncState,
    pub dispatcher: Dispatcher,
    pub gateway: CommandGateway<B>,
    form: ComposeForm,
}

impl<B: NodeBackend> Session<B> {
    pub fn new(backend: B, config: &ClientConfig, notifier: SharedNotifier) -> Self {
        let state = SyncState::with_capacity(config.state.command_capacity);
        Self {
            dispatcher: Dispatcher::new(state.clone(), Arc::clone(&notifier)),
            gateway: CommandGateway::new(backend, state.clone(), notifier),
            state,
            form: ComposeForm::new(),
        }
    }

    pub fn form(&self) -> &ComposeForm {
        &self.form
    }

    /// Read prompt lines until `/quit` or end of input.
    pub async fn read_commands<R>(mut self, input: R) -> Result<(), ChatAppError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        loop {
            let line = lines.next_line().await.map_err(|e| ChatAppError::App {
                message: format!("Failed to read input: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let Some(line) = line else {
                debug!("Input closed");
                return Ok(());
            };

            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => return Ok(()),
                Ok(command) => self.execute(command).await,
                Err(e) => {
                    debug!("{e}");
                    eprintln!("{}", input_message(&e));
                }
            }
        }
    }

    /// Run one command.
    ///
    /// Gateway failures have already been logged and alerted by the time
    /// they come back here, so they are only traced.
    pub async fn execute(&mut self, command: ShellCommand) {
        match command {
            ShellCommand::Init => {
                if let Err(e) = self.gateway.initialize().await {
                    debug!("/init failed: {e}");
                }
            }
            ShellCommand::Peer(peer_id) => self.form.set_peer_id(peer_id),
            ShellCommand::Send(content) => {
                self.form.set_content(content);
                if let Err(e) = self.gateway.send_message(&mut self.form).await {
                    debug!("/send failed: {e}");
                }
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => {}
        }
    }
}

fn input_message(error: &ChatAppError) -> String {
    match error {
        ChatAppError::Input { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Print the current display, then every update after it.
fn spawn_renderer(state: &SyncState) -> JoinHandle<()> {
    let mut display = state.subscribe_display();

    tokio::spawn(async move {
        loop {
            let screen = render(&display.borrow_and_update());
            {
                let mut out = std::io::stdout().lock();
                if let Err(e) = write!(out, "\n{screen}").and_then(|()| out.flush()) {
                    warn!("Failed to render display: {e}");
                }
            }

            if display.changed().await.is_err() {
                debug!("Display publisher dropped, renderer stopping");
                return;
            }
        }
    })
}
