//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause
use std::{fmt, future::Future, pin::Pin};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// The OS request that stopped the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRequest {
    Interrupt,
    #[cfg(unix)]
    Terminate,
    // No configuration reload, the config is fixed for the lifetime of the process
    #[cfg(unix)]
    Hangup,
    #[cfg(windows)]
    Break,
    #[cfg(windows)]
    SystemShutdown,
}

impl fmt::Display for StopRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interrupt => "interrupt",
            #[cfg(unix)]
            Self::Terminate => "terminate",
            #[cfg(unix)]
            Self::Hangup => "hangup",
            #[cfg(windows)]
            Self::Break => "break",
            #[cfg(windows)]
            Self::SystemShutdown => "system shutdown",
        };
        f.write_str(name)
    }
}

/// Resolves with the first stop request the process receives.
pub fn exit_signal() -> anyhow::Result<BoxFuture<StopRequest>> {
    #[cfg(unix)]
    let fut = unix_exit_signal()?;
    #[cfg(windows)]
    let fut = windows_exit_signal()?;

    Ok(fut)
}

#[cfg(unix)]
fn unix_exit_signal() -> anyhow::Result<BoxFuture<StopRequest>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    Ok(Box::pin(async move {
        tokio::select! {
            biased;
            _ = sigint.recv() => StopRequest::Interrupt,
            _ = sigterm.recv() => StopRequest::Terminate,
            _ = sighup.recv() => StopRequest::Hangup,
        }
    }))
}

#[cfg(windows)]
fn windows_exit_signal() -> anyhow::Result<BoxFuture<StopRequest>> {
    use tokio::signal::windows::{ctrl_break, ctrl_c, ctrl_shutdown};

    let mut sigint = ctrl_c()?;
    let mut sigbreak = ctrl_break()?;
    let mut sigshutdown = ctrl_shutdown()?;

    Ok(Box::pin(async move {
        tokio::select! {
            biased;
            _ = sigint.recv() => StopRequest::Interrupt,
            _ = sigbreak.recv() => StopRequest::Break,
            _ = sigshutdown.recv() => StopRequest::SystemShutdown,
        }
    }))
}
