// SPDX-License-Identifier: MPL-2.0
use iced_tube::app::{self, Flags};
use iced_tube::config::paths;

const HELP: &str = "\
Usage: iced_tube [OPTIONS] [URL]

Plays a video with basic playback controls.

Arguments:
  [URL]                 Media source to play (overrides settings.toml)

Options:
  --lang <LOCALE>       UI language (e.g. en-US, fr, pt-BR)
  --config-dir <DIR>    Directory holding settings.toml
  -h, --help            Print this help
";

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        log::warn!("Ignoring --lang: {}", err);
        None
    });
    let config_dir: Option<String> = args
        .opt_value_from_str("--config-dir")
        .unwrap_or_else(|err| {
            log::warn!("Ignoring --config-dir: {}", err);
            None
        });
    paths::init_cli_override(config_dir);

    let source_url = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    app::run(Flags { lang, source_url })
}
