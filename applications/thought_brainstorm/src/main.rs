// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::{anyhow, bail, Context};
use tari_shutdown::Shutdown;
use thought_wallet_client::ThoughtWalletClient;
use tokio::fs;

use crate::{
    cli::{Cli, Commands},
    config::{get_base_config, Config},
    helpers::read_config_file,
    logger::init_logger,
    scheduler::Scheduler,
    shutdown::exit_signal,
};

mod cli;
mod config;
mod constants;
mod error;
mod guard;
mod helpers;
mod logger;
mod reserved;
mod scheduler;
mod shutdown;
mod strategy;
#[cfg(test)]
mod test_utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::init();
    let config_path = cli.get_config_path();

    init_logger(cli.common.log_level)?;

    match cli.command {
        Commands::Init(ref args) => {
            if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }

            let mut config = get_base_config();
            args.apply(&mut config);

            let file = fs::File::create(&config_path)
                .await
                .with_context(|| anyhow!("Failed to open config path {}", config_path.display()))?;
            config.write(file).await.context("Writing config failed")?;

            let config_path = config_path
                .canonicalize()
                .context("Failed to canonicalize config path")?;

            log::info!("Config file created at {}", config_path.display());
        },
        Commands::Start(ref args) => {
            let mut config = match read_config_file(&config_path).await? {
                Some(config) => config,
                None => {
                    log::info!("No config file at {}, using defaults", config_path.display());
                    get_base_config()
                },
            };
            // command line values win over the file
            args.apply(&mut config);
            if let Some(missing) = config.missing_conf() {
                bail!("Missing configuration values: {:?}", missing);
            }
            config.validate().context("Invalid configuration")?;

            start(config).await?;
        },
    }

    Ok(())
}

async fn start(config: Config) -> anyhow::Result<()> {
    let mut shutdown = Shutdown::new();
    let stop_request = exit_signal()?;

    let wallet = ThoughtWalletClient::connect_host(
        &config.wallet.host,
        config.wallet.port,
        config.wallet.user.clone(),
        config.wallet.password.clone(),
        config.wallet.rpc_timeout,
    )
    .context("Failed to create wallet client")?;
    log::info!("Using Thought wallet at {}", wallet.endpoint());

    let mut scheduler = Scheduler::new(&config, wallet, shutdown.to_signal())?;
    let mut task_handle = tokio::spawn(async move { scheduler.run().await });

    tokio::select! {
        request = stop_request => {
            log::info!("Received {} request, stopping after the current cycle", request);
        },
        result = &mut task_handle => {
            result?;
            log::info!("Scheduler exited");
            return Ok(());
        },
    }

    shutdown.trigger();
    // let an in-flight cycle finish
    task_handle.await?;

    Ok(())
}
