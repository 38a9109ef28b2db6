mod domain;
mod gateway;
mod handlers;
mod relocation;
mod repo;
mod notice;
mod help;
mod metrics;
mod config;
mod commands;

use std::net::SocketAddr;
use futures::future::join_all;
use rust_i18n::i18n;
use teloxide::prelude::*;
use teloxide::dptree::deps;
use teloxide::update_listeners::webhooks::{axum_to_router, Options};
use teloxide::update_listeners::UpdateListener;
use crate::gateway::TelegramGateway;
use crate::handlers::{checks, HelpCommands, NoticeCommands};
use crate::relocation::RelocationEngine;
use crate::repo::InMemoryPinnedRecords;

i18n!(fallback = "en");    // load localizations with default parameters

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    pretty_env_logger::init();

    let app_config = config::AppConfig::from_env();
    let webhook_url = config::webhook_url_from_env()?;

    let handler = dptree::entry()
        .branch(Update::filter_message().filter(checks::is_private_chat).filter_command::<HelpCommands>().endpoint(handlers::help_cmd_handler))
        .branch(Update::filter_message().filter_command::<NoticeCommands>().endpoint(handlers::notice_cmd_handler))
        .branch(Update::filter_message().filter(checks::is_group_chat).endpoint(handlers::message_posted_handler));

    let bot = Bot::from_env();
    bot.delete_webhook().await?;

    let set_my_commands_requests = _rust_i18n_available_locales()
        .into_iter()
        .map(|locale| commands::set_my_commands(&bot, locale));
    let set_my_commands_failed = join_all(set_my_commands_requests)
        .await
        .into_iter()
        .any(|res| res.is_err());
    if set_my_commands_failed {
        Err("couldn't set the bot's commands")?
    }

    let me = bot.get_me().await?;
    let help_context = config::build_context_for_help_messages(&me);
    let help_container = help::render_help_messages(help_context)?;

    let gateway = TelegramGateway::new(bot.clone(), app_config.features.silent_notices);
    let engine = RelocationEngine::new(gateway, InMemoryPinnedRecords::default(), app_config.notice_style.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.http_port));
    let metrics_router = metrics::init();

    let ignore_unknown_updates = |_| Box::pin(async {});
    let deps = deps![
        engine,
        app_config,
        help_container
    ];

    match webhook_url {
        Some(url) => {
            log::info!("Setting a webhook: {url}");

            let (mut listener, stop_flag, bot_router) = axum_to_router(bot.clone(), Options::new(addr, url)).await?;
            let stop_token = listener.stop_token();

            let error_handler = LoggingErrorHandler::with_custom_text("An error from the update listener");
            let mut dispatcher = Dispatcher::builder(bot, handler)
                .default_handler(ignore_unknown_updates)
                .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
                .dependencies(deps)
                .build();
            let bot_fut = dispatcher.dispatch_with_listener(listener, error_handler);

            let srv = tokio::spawn(async move {
                let tcp_listener = tokio::net::TcpListener::bind(addr)
                    .await
                    .inspect_err(|_| stop_token.stop())?;
                let app = axum::Router::new()
                    .merge(metrics_router)
                    .merge(bot_router);
                axum::serve(tcp_listener, app)
                    .with_graceful_shutdown(stop_flag)
                    .await
            });

            let (res, _) = futures::join!(srv, bot_fut);
            res
        }
        None => {
            log::info!("The polling dispatcher is activating...");

            let bot_fut = tokio::spawn(async move {
                Dispatcher::builder(bot, handler)
                    .default_handler(ignore_unknown_updates)
                    .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
                    .dependencies(deps)
                    .enable_ctrlc_handler()
                    .build()
                    .dispatch()
                    .await
            });

            let srv = tokio::spawn(async move {
                let tcp_listener = tokio::net::TcpListener::bind(addr).await?;
                axum::serve(tcp_listener, metrics_router)
                    .with_graceful_shutdown(async {
                        if let Err(e) = tokio::signal::ctrl_c().await {
                            log::error!("failed to listen for the CTRL+C signal: {e}");
                        }
                        log::info!("Shutdown of the metrics server")
                    })
                    .await
            });

            let (res, _) = futures::join!(srv, bot_fut);
            res
        }
    }?.map_err(Into::into)
}
