//! Subcommand implementations.
//!
//! Each command prints its own user-facing output and returns the process
//! exit code; `Err` is reserved for local setup failures (config, client).

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use gamebox_library::presentation::platforms_line;
use gamebox_library::{
    ActionOutcome, CatalogService, HttpTransport, LibraryActionController, LibraryError,
    LibraryIndex, LibraryPage, LibraryQueryService, PresentationAdapter, SkipReason, Transport,
    auth,
};
use gamebox_notify::{SharedToasts, ToastKind};
use gamebox_protocol::{GameId, LibraryStatus, LoginRequest};

use crate::config::CliConfig;

/// What a write command should do once its controller is seeded.
#[derive(Debug, Clone, Copy)]
pub enum WriteAction {
    Add(LibraryStatus),
    Remove,
    ChangeStatus(LibraryStatus),
}

fn transport(config: &CliConfig) -> anyhow::Result<Arc<dyn Transport>> {
    let transport = HttpTransport::new(config.session(), config.timeout())
        .context("failed to set up HTTP client")?;
    Ok(Arc::new(transport))
}

fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub async fn login(
    mut config: CliConfig,
    config_path: &Path,
    email: String,
    password: String,
) -> anyhow::Result<ExitCode> {
    let http = HttpTransport::new(config.session(), config.timeout())
        .context("failed to set up HTTP client")?;
    let credentials = LoginRequest {
        email,
        senha: password,
    };

    let (session, user) = match auth::login(&http, http.session(), &credentials).await {
        Ok(logged_in) => logged_in,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    config.session_cookie = session.cookie().unwrap_or_default().to_owned();
    config.save(config_path)?;
    println!("Logged in as {} <{}>", user.username, user.email);
    Ok(ExitCode::SUCCESS)
}

pub async fn logout(mut config: CliConfig, config_path: &Path) -> anyhow::Result<ExitCode> {
    if !config.session().has_cookie() {
        println!("Not logged in.");
        return Ok(ExitCode::SUCCESS);
    }

    let result = auth::logout(transport(&config)?.as_ref()).await;

    // The local cookie goes regardless; an expired session is already logged out.
    config.session_cookie.clear();
    config.save(config_path)?;

    match result {
        Ok(()) | Err(LibraryError::Unauthenticated) => println!("Logged out."),
        Err(e) => {
            tracing::warn!(error = %e, "server-side logout failed");
            println!("Logged out locally; the server could not be told.");
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn whoami(config: &CliConfig) -> anyhow::Result<ExitCode> {
    match auth::profile(transport(config)?.as_ref()).await {
        Ok(profile) => {
            let name = profile.display_name().unwrap_or("unknown user");
            match profile.email.as_deref() {
                Some(email) => println!("{name} <{email}>"),
                None => println!("{name}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(LibraryError::Unauthenticated) => {
            eprintln!("Not logged in.");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            tracing::warn!(error = %e, "profile fetch failed");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Whether a rendered library page counts as a successful `list`.
fn page_succeeded(page: &LibraryPage) -> bool {
    matches!(page, LibraryPage::Loaded(_) | LibraryPage::Empty)
}

pub async fn list(config: &CliConfig) -> anyhow::Result<ExitCode> {
    let query = LibraryQueryService::new(transport(config)?);
    let fetched = query.fetch_all().await;
    let page = PresentationAdapter::new(config.presentation()).page(&fetched);

    match &page {
        LibraryPage::Loaded(cards) => {
            for card in cards {
                println!(
                    "{:>8}  {:<32}  {:<10}  {:>4}  {}{}",
                    card.game_id,
                    card.title,
                    card.status_label,
                    card.release,
                    platforms_line(&card.platforms),
                    card.added_on
                        .as_deref()
                        .map(|d| format!("  (added {d})"))
                        .unwrap_or_default(),
                );
            }
        }
        LibraryPage::Empty => println!("{}", page.notice().unwrap_or_default()),
        LibraryPage::LoginRequired | LibraryPage::Failed(_) => {
            if let Err(e) = &fetched {
                tracing::debug!(error = %e, "library fetch failed");
            }
            eprintln!("{}", page.notice().unwrap_or_default());
        }
    }

    Ok(exit_code(page_succeeded(&page)))
}

/// Lists the catalog, or the games matching `search`, marking the ones
/// already in the library when the session is logged in.
pub async fn catalog(config: &CliConfig, search: Option<String>) -> anyhow::Result<ExitCode> {
    let transport = transport(config)?;
    let catalog = CatalogService::new(transport.clone());
    let fetched = match search.as_deref() {
        Some(term) => catalog.search(term).await,
        None => catalog.list().await,
    };
    let games = match fetched {
        Ok(games) => games,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    if games.is_empty() {
        println!("No games found.");
        return Ok(ExitCode::SUCCESS);
    }

    // Membership marks are best effort; the catalog itself needs no login.
    let index = match LibraryQueryService::new(transport).fetch_index().await {
        Ok(index) => index,
        Err(LibraryError::Unauthenticated) => LibraryIndex::default(),
        Err(e) => {
            tracing::warn!(error = %e, "library fetch failed; catalog shown without marks");
            LibraryIndex::default()
        }
    };

    let adapter = PresentationAdapter::new(config.presentation());
    for game in &games {
        let card = adapter.catalog_card(game, index.status_of(&game.game_id));
        println!(
            "{:>8}  {:<32}  {:>4}  {:>4}  {}{}",
            card.game_id,
            card.title,
            card.release,
            card.rating,
            platforms_line(&card.platforms),
            card.library_status
                .map(|s| format!("  [{}]", s.label()))
                .unwrap_or_default(),
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Whether a settled write counts as a successful command.
fn write_succeeded(result: &Result<ActionOutcome, LibraryError>) -> bool {
    match result {
        Ok(ActionOutcome::Confirmed(_)) => true,
        Ok(ActionOutcome::Skipped(SkipReason::NotInLibrary)) => true,
        Ok(ActionOutcome::Skipped(_) | ActionOutcome::Discarded) => false,
        Err(_) => false,
    }
}

/// Seeds a controller from the fetched library and runs one write.
///
/// Failures are reported through the controller's toasts only.
pub async fn write(
    config: &CliConfig,
    game_id: GameId,
    action: WriteAction,
) -> anyhow::Result<ExitCode> {
    let transport = transport(config)?;
    let toasts = SharedToasts::new();

    let index = match LibraryQueryService::new(transport.clone()).fetch_index().await {
        Ok(index) => index,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };
    let controller: LibraryActionController =
        index.controller_for(game_id, transport, Arc::new(toasts.clone()));

    let result = match action {
        WriteAction::Add(status) => {
            if controller.state().in_library {
                println!(
                    "{} is already in your library ({}).",
                    controller.game_id(),
                    controller.state().status.label()
                );
                return Ok(ExitCode::SUCCESS);
            }
            controller.add(status).await
        }
        WriteAction::Remove => controller.remove().await,
        WriteAction::ChangeStatus(status) => controller.change_status(status).await,
    };

    print_toasts(&toasts);

    match &result {
        Ok(ActionOutcome::Skipped(SkipReason::NotInLibrary)) => {
            println!("{} is not in your library.", controller.game_id());
        }
        Ok(_) => {
            let view = controller.view();
            tracing::debug!(
                member = view.is_member,
                status = %view.selected_status,
                "controller settled"
            );
        }
        Err(e) => tracing::debug!(error = %e, "write failed"),
    }
    Ok(exit_code(write_succeeded(&result)))
}

fn print_toasts(toasts: &SharedToasts) {
    for toast in toasts.lock().drain() {
        match toast.kind {
            ToastKind::Success => println!("{}", toast.message),
            ToastKind::Failure => eprintln!("{}", toast.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rendered_libraries_succeed() {
        assert!(page_succeeded(&LibraryPage::Loaded(vec![])));
        assert!(page_succeeded(&LibraryPage::Empty));
        assert!(!page_succeeded(&LibraryPage::LoginRequired));
        assert!(!page_succeeded(&LibraryPage::Failed("offline".into())));
    }

    #[test]
    fn failed_writes_exit_non_zero() {
        assert!(write_succeeded(&Ok(ActionOutcome::Confirmed("ok".into()))));
        assert!(write_succeeded(&Ok(ActionOutcome::Skipped(
            SkipReason::NotInLibrary
        ))));
        assert!(!write_succeeded(&Ok(ActionOutcome::Discarded)));
        assert!(!write_succeeded(&Err(LibraryError::Unauthenticated)));
        assert!(!write_succeeded(&Err(LibraryError::ValidationRejected {
            status: 400,
            message: "Status inválido".into(),
        })));
    }
}
