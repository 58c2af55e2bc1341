use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{PortalSettings, Role, SessionContext};
use services::{Clock, PortalServices};
use thiserror::Error;
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "warn,app=info,services=info,ui=info";

#[derive(Debug, Error)]
#[non_exhaustive]
enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("invalid --role value: {raw}")]
    InvalidRole { raw: String },
    #[error("--email and --password must be given together")]
    PartialCredentials,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--role <student|admin>] [--email <email>] [--password <pw>] [--log <filter>]");
    eprintln!();
    eprintln!("Without credentials the portal opens on the login page.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PORTAL_ROLE, PORTAL_EMAIL, PORTAL_PASSWORD, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Credentials {
    email: String,
    password: String,
    role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    credentials: Option<Credentials>,
    log_filter: String,
    help: bool,
}

impl Args {
    fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut role = env("PORTAL_ROLE");
        let mut email = env("PORTAL_EMAIL");
        let mut password = env("PORTAL_PASSWORD");
        let mut log_filter = env("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());
        let mut help = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--role" => role = Some(require_value(&mut args, "--role")?),
                "--email" => email = Some(require_value(&mut args, "--email")?),
                "--password" => password = Some(require_value(&mut args, "--password")?),
                "--log" => log_filter = require_value(&mut args, "--log")?,
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let role = match role {
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|_| ArgsError::InvalidRole { raw })?,
            None => Role::Student,
        };
        let credentials = match (email, password) {
            (Some(email), Some(password)) => Some(Credentials {
                email,
                password,
                role,
            }),
            (None, None) => None,
            _ => return Err(ArgsError::PartialCredentials),
        };

        Ok(Self {
            credentials,
            log_filter,
            help,
        })
    }
}

struct DesktopApp {
    services: PortalServices,
    initial_session: Option<SessionContext>,
}

impl UiApp for DesktopApp {
    fn services(&self) -> PortalServices {
        self.services.clone()
    }

    fn initial_session(&self) -> Option<SessionContext> {
        self.initial_session.clone()
    }
}

async fn sign_in_on_launch(
    services: &PortalServices,
    credentials: Option<&Credentials>,
) -> Option<SessionContext> {
    let credentials = credentials?;
    match services
        .auth()
        .login(&credentials.email, &credentials.password, credentials.role)
        .await
    {
        Ok(ctx) => Some(ctx),
        Err(err) => {
            tracing::warn!(error = %err, "launch credentials rejected; opening login page");
            None
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;
    if args.help {
        print_usage();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.as_str())
        .init();

    let services = PortalServices::demo(Clock::system(), PortalSettings::default())?;
    let initial_session = sign_in_on_launch(&services, args.credentials.as_ref()).await;
    tracing::info!(
        signed_in = initial_session.is_some(),
        "launching quiz portal"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        initial_session,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz Portal")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_open_login_page() {
        let parsed = Args::parse(Vec::new(), no_env).unwrap();
        assert_eq!(parsed.credentials, None);
        assert_eq!(parsed.log_filter, DEFAULT_LOG_FILTER);
        assert!(!parsed.help);
    }

    #[test]
    fn flags_override_environment() {
        let env = |key: &str| match key {
            "PORTAL_ROLE" => Some("student".to_owned()),
            "PORTAL_EMAIL" => Some("demo@student.edu".to_owned()),
            "PORTAL_PASSWORD" => Some("student123".to_owned()),
            "RUST_LOG" => Some("debug".to_owned()),
            _ => None,
        };
        let parsed = Args::parse(
            args(&["--role", "Admin", "--email", "admin@riverside.edu", "--password", "admin123"]),
            env,
        )
        .unwrap();
        let credentials = parsed.credentials.unwrap();
        assert_eq!(credentials.role, Role::Admin);
        assert_eq!(credentials.email, "admin@riverside.edu");
        assert_eq!(credentials.password, "admin123");
        assert_eq!(parsed.log_filter, "debug");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Args::parse(args(&["--role", "teacher"]), no_env),
            Err(ArgsError::InvalidRole { .. })
        ));
        assert!(matches!(
            Args::parse(args(&["--email"]), no_env),
            Err(ArgsError::MissingValue { flag: "--email" })
        ));
        assert!(matches!(
            Args::parse(args(&["--email", "demo@student.edu"]), no_env),
            Err(ArgsError::PartialCredentials)
        ));
        assert!(matches!(
            Args::parse(args(&["--db"]), no_env),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[tokio::test]
    async fn launch_credentials_sign_in() {
        let services = PortalServices::demo(Clock::system(), PortalSettings::default()).unwrap();
        let good = Credentials {
            email: "demo@student.edu".into(),
            password: "student123".into(),
            role: Role::Student,
        };
        let ctx = sign_in_on_launch(&services, Some(&good)).await.unwrap();
        assert_eq!(ctx.role(), Role::Student);

        let bad = Credentials {
            password: "nope".into(),
            ..good
        };
        assert!(sign_in_on_launch(&services, Some(&bad)).await.is_none());
        assert!(sign_in_on_launch(&services, None).await.is_none());
    }
}
