use clap::{Arg, ArgAction, Command};

pub const LOG_TERMINAL: &str = "terminal";
pub const LOG_FILE: &str = "file";
pub const LOG_BOTH: &str = "both";

fn url_arg() -> Arg {
    Arg::new("url")
        .value_name("URL")
        .required(true)
        .help("Address of the page to submit, as the browser reports it")
}

fn title_arg() -> Arg {
    Arg::new("title")
        .short('t')
        .long("title")
        .value_name("TITLE")
        .help("Title of the page, if known")
}

pub fn save_subcommand() -> Command {
    Command::new("save")
        .about("Saves the queue server address and optional credentials")
        .arg(
            Arg::new("address")
                .short('a')
                .long("address")
                .value_name("ADDRESS")
                .required(true)
                .help("Server address, e.g. `jukebox.lan:5000`; `http://` is added when missing"),
        )
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .value_name("USERNAME")
                .help("Login name, when the server requires authentication"),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .value_name("PASSWORD")
                .help("Login password, when the server requires authentication"),
        )
}

pub fn add_subcommand() -> Command {
    Command::new("add")
        .about("Submits a page from the settings panel")
        .long_about(
            "Runs the settings panel submission. Network calls go through the relay \
endpoint, exactly as a restricted UI context would issue them.",
        )
        .arg(url_arg())
        .arg(title_arg())
}

pub fn shortcut_subcommand() -> Command {
    Command::new("shortcut")
        .about("Delivers a keyboard-shortcut command for the given active page")
        .arg(url_arg())
        .arg(title_arg())
        .arg(
            Arg::new("command")
                .short('c')
                .long("command")
                .value_name("COMMAND")
                .default_value(jukebox_engine::ADD_TO_JUKEBOX_COMMAND)
                .help("Name of the shortcut command to deliver"),
        )
}

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sends the page you are watching to a LAN jukebox queue")
        .subcommand_required(true)
        .arg(
            Arg::new("store")
                .long("store")
                .value_name("PATH")
                .global(true)
                .help("Settings file; defaults to the user config directory"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("DESTINATION")
                .value_parser([LOG_TERMINAL, LOG_FILE, LOG_BOTH])
                .default_value(LOG_TERMINAL)
                .global(true)
                .help("Where log output goes"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .default_value("jukebox.log")
                .global(true)
                .help("Log file used by the `file` and `both` destinations"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log debug output"),
        )
        .subcommand(save_subcommand())
        .subcommand(add_subcommand())
        .subcommand(shortcut_subcommand())
}
