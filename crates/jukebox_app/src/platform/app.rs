use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::ArgMatches;
use jukebox_core::{Msg, PanelView, StatusKind, StatusLine, SubmitError};
use jukebox_engine::{
    DirectApi, FileProfileStore, ProfileStore, RelayApi, RelayHandle, ReqwestTransport,
    ResilientTransport, SessionOrchestrator, SettingsPanel, ShortcutHandler, TransportSettings,
};
use jukebox_logging::{jukebox_info, Diagnostics, LogDiagnostics};

use super::logging;
use super::notify::TerminalNotifier;
use super::page::ArgPageSource;

const STORE_FILENAME: &str = "profile.ron";

/// Everything a trigger surface needs, built once per process.
struct AppContext {
    store: Arc<dyn ProfileStore>,
    diagnostics: Arc<dyn Diagnostics>,
    direct: DirectApi,
}

impl AppContext {
    fn new(store: Arc<dyn ProfileStore>) -> anyhow::Result<Self> {
        let diagnostics: Arc<dyn Diagnostics> = Arc::new(LogDiagnostics);
        let transport = ReqwestTransport::new(&TransportSettings::default())
            .context("building HTTP client")?;
        let direct = DirectApi::new(ResilientTransport::new(
            Arc::new(transport),
            diagnostics.clone(),
        ));
        Ok(Self {
            store,
            diagnostics,
            direct,
        })
    }

    /// Orchestrator for the restricted context: all calls cross the relay.
    fn relayed_orchestrator(&self) -> anyhow::Result<SessionOrchestrator> {
        let relay = RelayHandle::spawn(self.direct.clone(), self.diagnostics.clone())
            .context("starting relay endpoint")?;
        Ok(SessionOrchestrator::new(
            Arc::new(RelayApi::new(relay)),
            self.store.clone(),
            self.diagnostics.clone(),
        ))
    }

    /// Orchestrator for the privileged context.
    fn direct_orchestrator(&self) -> SessionOrchestrator {
        SessionOrchestrator::new(
            Arc::new(self.direct.clone()),
            self.store.clone(),
            self.diagnostics.clone(),
        )
    }
}

pub async fn run_app(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let Some((name, sub)) = matches.subcommand() else {
        anyhow::bail!("no subcommand given");
    };
    logging::initialize(sub);

    let store_path = store_path(sub);
    jukebox_info!("Using settings file {:?}", store_path);
    let context = AppContext::new(Arc::new(FileProfileStore::new(store_path)))?;

    let view = match name {
        "save" => save_settings(&context, sub).await?,
        "add" => add_from_panel(&context, sub).await?,
        "shortcut" => return run_shortcut(&context, sub).await,
        other => anyhow::bail!("unknown subcommand {other}"),
    };
    Ok(report(&view))
}

fn store_path(matches: &ArgMatches) -> PathBuf {
    if let Some(path) = matches.get_one::<String>("store") {
        return PathBuf::from(path);
    }
    match dirs::config_dir() {
        Some(dir) => dir.join("lan_jukebox").join(STORE_FILENAME),
        None => PathBuf::from(".").join(STORE_FILENAME),
    }
}

async fn save_settings(context: &AppContext, matches: &ArgMatches) -> anyhow::Result<PanelView> {
    let mut panel = SettingsPanel::open(
        context.store.clone(),
        context.direct_orchestrator(),
        &ArgPageSource::none(),
    )
    .await;

    if let Some(address) = matches.get_one::<String>("address") {
        panel.dispatch(Msg::AddressEdited(address.clone())).await;
    }
    if let Some(username) = matches.get_one::<String>("username") {
        panel.dispatch(Msg::UsernameEdited(username.clone())).await;
    }
    if let Some(password) = matches.get_one::<String>("password") {
        panel.dispatch(Msg::PasswordEdited(password.clone())).await;
    }
    let changed = panel.dispatch(Msg::SaveClicked).await;
    Ok(changed.unwrap_or_else(|| panel.view()))
}

async fn add_from_panel(context: &AppContext, matches: &ArgMatches) -> anyhow::Result<PanelView> {
    let mut panel = SettingsPanel::open(
        context.store.clone(),
        context.relayed_orchestrator()?,
        &ArgPageSource::from_matches(matches),
    )
    .await;

    let view = panel.view();
    if view.not_supported {
        return Ok(PanelView {
            status: Some(StatusLine::new(
                SubmitError::UnsupportedPage.to_string(),
                StatusKind::Error,
            )),
            ..view
        });
    }
    let changed = panel.dispatch(Msg::AddClicked).await;
    Ok(changed.unwrap_or_else(|| panel.view()))
}

async fn run_shortcut(context: &AppContext, matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let command = matches
        .get_one::<String>("command")
        .map(String::as_str)
        .unwrap_or(jukebox_engine::ADD_TO_JUKEBOX_COMMAND);
    let handler = ShortcutHandler::new(
        Arc::new(ArgPageSource::from_matches(matches)),
        Arc::new(TerminalNotifier),
        context.store.clone(),
        context.direct_orchestrator(),
    );
    Ok(match handler.handle_command(command).await {
        Some(Ok(_)) | None => ExitCode::SUCCESS,
        Some(Err(_)) => ExitCode::FAILURE,
    })
}

fn report(view: &PanelView) -> ExitCode {
    match &view.status {
        Some(status) if status.kind == StatusKind::Error => {
            eprintln!("{}", status.text);
            ExitCode::FAILURE
        }
        Some(status) => {
            println!("{}", status.text);
            ExitCode::SUCCESS
        }
        None => ExitCode::SUCCESS,
    }
}
