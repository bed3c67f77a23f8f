#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;

use std::env;
use std::process;
use std::rc::Rc;

use anyhow::Error;
use anyhow::Result;
use quickedit::domain::models::EditProps;
use quickedit::infrastructure::transports::StdoutTransport;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::application::cli;
use crate::application::harness;
use crate::application::harness::HarnessInput;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! quickedit has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            env!("VERGEN_GIT_DESCRIBE"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

async fn run(props: EditProps) -> Result<()> {
    let document = Rc::new(harness::load_page(&Config::get(ConfigKey::Page)).await?);
    let transport = Rc::new(StdoutTransport::new(&Config::get(ConfigKey::Origin)));

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<HarnessInput>();
    let reader = tokio::spawn(async move {
        return harness::read_stdin(input_tx).await;
    });

    harness::start(
        props,
        transport,
        document,
        Config::quick_edit_options(),
        &mut input_rx,
    )
    .await?;

    reader.abort();
    return Ok(());
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("QUICKEDIT_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("quickedit")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("quickedit")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let props = match cli::parse().await {
        Ok(Some(props)) => props,
        Ok(None) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    if let Err(err) = run(props).await {
        handle_error(err);
    }

    drop(_guard);
    process::exit(0);
}
