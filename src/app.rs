use crate::api::Api;
use crate::config::Config;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{log_buffer, CustomLogger};
use crate::state::{State, View};
use crate::ui::Theme;
use crate::error::AppError;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    api: Api,
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let buffer = log_buffer();
        CustomLogger::new(config.level_filter(), Arc::clone(&buffer))
            .install()
            .map_err(|e| AppError::Logger(e.to_string()))?;

        info!("Starting application...");
        let api = Api::new(config.require_access_token()?, config.effective_base_url())?;
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default.", config.theme_name);
            Theme::default()
        });
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let state = State::new(tx.clone(), &config, theme, buffer);
        let mut app = App {
            api,
            state: Arc::new(Mutex::new(state)),
            config,
        };
        app.start_network(rx)?;
        app.start_ui(tx).await?;

        // Keep the last chosen sizes for the next session
        {
            let state = app.state.lock().await;
            app.config.page_size = state.departments().pages().page_size();
            app.config.keyset_limit = state.purchase_quotes().state().limit;
            if let Err(e) = app.config.save() {
                error!("Failed to save config on exit: {}", e);
            }
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations. Every event
    /// runs on its own task so a slow request never holds up the others.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let handler = NetworkEventHandler::new(Arc::clone(&self.state), self.api.clone());
        std::thread::spawn(move || {
            runtime.block_on(async {
                while let Ok(network_event) = net_receiver.recv() {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handler.handle(network_event).await {
                            error!("Failed to handle network event: {}", e);
                        }
                    });
                }
            })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&mut self, net_sender: NetworkEventSender) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        net_sender.send(NetworkEvent::Me)?;
        self.state.lock().await.select_view(View::Departments);

        let terminal_event_handler = TerminalEventHandler::new();
        let result = loop {
            let mut state = self.state.lock().await;
            if let Err(e) = terminal.draw(|frame| crate::ui::render(frame, &mut state)) {
                break Err(e.into());
            }
            match terminal_event_handler.handle_next(&mut state) {
                Ok(true) => (),
                Ok(false) => {
                    debug!("Received application exit request.");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}
