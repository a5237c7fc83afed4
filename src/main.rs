use anyhow::Result;
use clap::{crate_version, App as Cli, Arg};
use hr_console::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("hr-console")
        .version(crate_version!())
        .about("A terminal administrative console for HR and operations data")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Overrides the backend base URL for this session")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(base_url) = matches.value_of("base-url") {
        config.override_base_url(base_url);
    }

    App::start(config).await
}
