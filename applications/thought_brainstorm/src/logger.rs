//    Copyright 2024 The Tari Project
//    SPDX-License-Identifier: BSD-3-Clause

use log::LevelFilter;

const LOG_TARGETS: [&str; 2] = ["thought_brainstorm", "thought_wallet_client"];

pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let colors = fern::colors::ColoredLevelConfig::new()
        .info(fern::colors::Color::Green)
        .warn(fern::colors::Color::Magenta)
        .debug(fern::colors::Color::Yellow)
        .error(fern::colors::Color::Red);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.metadata().target(),
                colors.color(record.level()),
                message
            ))
        })
        // skip hyper/reqwest frame prints
        .filter(|record_metadata| is_own_target(record_metadata.target()))
        .level(level)
        .chain(std::io::stdout())
        .apply()
}

fn is_own_target(target: &str) -> bool {
    LOG_TARGETS.iter().any(|t| target.starts_with(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_workspace_targets_pass() {
        assert!(is_own_target("thought_brainstorm::scheduler"));
        assert!(is_own_target("thought_wallet_client"));
        assert!(!is_own_target("hyper::proto::h1"));
        assert!(!is_own_target("reqwest::connect"));
    }
}
