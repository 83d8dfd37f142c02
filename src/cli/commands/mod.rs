mod backend;
mod identity;
mod logging;
mod session;

pub use self::{
    backend::{ARG_API_URL, ARG_BACKEND_TIMEOUT_SECONDS},
    identity::{ARG_AUTH0_CLIENT_ID, ARG_AUTH0_DOMAIN},
    logging::{ARG_VERBOSITY, verbosity_level},
    session::{ARG_ENVIRONMENT, ARG_PUBLIC_URL, ARG_SESSION_TTL_SECONDS},
};

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_PORT: &str = "port";
pub const ARG_STATIC_DIR: &str = "static-dir";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("orqa")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("3000")
                .env("ORQA_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_STATIC_DIR)
                .long("static-dir")
                .help("Directory holding the built dashboard bundle")
                .env("ORQA_STATIC_DIR")
                .default_value("public"),
        );

    let command = backend::with_args(command);
    let command = session::with_args(command);
    let command = identity::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_VARS: [&str; 10] = [
        "ORQA_PORT",
        "ORQA_STATIC_DIR",
        "API_URL",
        "ORQA_BACKEND_TIMEOUT_SECONDS",
        "NODE_ENV",
        "ORQA_PUBLIC_URL",
        "ORQA_SESSION_TTL_SECONDS",
        "NEXT_PUBLIC_AUTH0_DOMAIN",
        "NEXT_PUBLIC_AUTH0_CLIENT_ID",
        "ORQA_LOG_LEVEL",
    ];

    fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
        ENV_VARS.iter().map(|name| (*name, None)).collect()
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "orqa");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(cleared(), || {
            let matches = new().get_matches_from(vec!["orqa"]);

            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(3000));
            assert_eq!(
                matches.get_one::<String>(ARG_API_URL).cloned(),
                Some("http://localhost:9000".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_ENVIRONMENT).cloned(),
                Some("development".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_PUBLIC_URL).cloned(),
                Some("http://localhost:3000".to_string())
            );
            assert_eq!(
                matches.get_one::<i64>(ARG_SESSION_TTL_SECONDS).copied(),
                Some(604_800)
            );
            assert_eq!(
                matches.get_one::<u64>(ARG_BACKEND_TIMEOUT_SECONDS).copied(),
                Some(30)
            );
            assert_eq!(
                matches.get_one::<String>(ARG_STATIC_DIR).cloned(),
                Some("public".to_string())
            );
            assert!(matches.get_one::<String>(ARG_AUTH0_DOMAIN).is_none());
            assert!(matches.get_one::<String>(ARG_AUTH0_CLIENT_ID).is_none());
            assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(0));
        });
    }

    #[test]
    fn test_check_args() {
        temp_env::with_vars(cleared(), || {
            let matches = new().get_matches_from(vec![
                "orqa",
                "--port",
                "8080",
                "--api-url",
                "https://api.orqa.dev",
                "--environment",
                "production",
                "--auth0-domain",
                "orqa.eu.auth0.com",
                "--auth0-client-id",
                "client-123",
            ]);

            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
            assert_eq!(
                matches.get_one::<String>(ARG_API_URL).cloned(),
                Some("https://api.orqa.dev".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_ENVIRONMENT).cloned(),
                Some("production".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_AUTH0_DOMAIN).cloned(),
                Some("orqa.eu.auth0.com".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_AUTH0_CLIENT_ID).cloned(),
                Some("client-123".to_string())
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("ORQA_PORT", Some("443")),
                ("API_URL", Some("http://identity:9000")),
                ("NODE_ENV", Some("production")),
                ("ORQA_SESSION_TTL_SECONDS", Some("3600")),
                ("NEXT_PUBLIC_AUTH0_DOMAIN", Some("orqa.eu.auth0.com")),
                ("ORQA_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["orqa"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).cloned(),
                    Some("http://identity:9000".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_ENVIRONMENT).cloned(),
                    Some("production".to_string())
                );
                assert_eq!(
                    matches.get_one::<i64>(ARG_SESSION_TTL_SECONDS).copied(),
                    Some(3600)
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_AUTH0_DOMAIN).cloned(),
                    Some("orqa.eu.auth0.com".to_string())
                );
                assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("ORQA_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["orqa"]);
                assert_eq!(
                    matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5 {
            temp_env::with_vars([("ORQA_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["orqa".to_string()];

                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_rejects_zero_timeout() {
        temp_env::with_vars(cleared(), || {
            let result = new().try_get_matches_from(vec!["orqa", "--backend-timeout-seconds", "0"]);
            assert_eq!(
                result.map_err(|e| e.kind()),
                Err(clap::error::ErrorKind::ValueValidation)
            );
        });
    }
}
