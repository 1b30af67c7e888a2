use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::{
    get_prompt, get_styles, print_empty_list, print_error, print_goodbye, print_help, print_info,
    print_key_value, print_key_value_highlight, print_list_item, print_section_footer,
    print_section_header, print_success, print_warning, print_welcome, CommandHelp, TableBuilder,
};
use vinyl_catalog::baseline::{create_baseline_source, BaselineSource};
use vinyl_catalog::collection::{
    create_id_generator, CollectionStore, Confirm, DeleteOutcome, GenreFilter, IdScheme,
};
use vinyl_catalog::config::{AppConfig, CliConfig, FileConfig};
use vinyl_catalog::export::export_to_file;
use vinyl_catalog::override_store::{create_override_store, OverrideBackend};
use vinyl_catalog::record::{Condition, Record, RecordFields};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, DefaultEditor, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Year given on the command line. Empty clears the year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct YearArg(Option<i32>);

fn parse_year_arg(s: &str) -> Result<YearArg, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(YearArg(None));
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("'{}' is not a year", s));
    }
    s.parse::<i32>()
        .map(|year| YearArg(Some(year)))
        .map_err(|e| format!("'{}' is not a year: {}", s, e))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles(), version, about = "Browse and edit a vinyl record collection")]
struct CliArgs {
    /// Baseline document to start from: a JSON file path or an http(s) URL.
    #[clap(long, default_value = vinyl_catalog::config::DEFAULT_DATA_SOURCE)]
    pub data_source: String,

    /// Path to a TOML config file. Its values take precedence over flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Where local changes are kept.
    #[clap(long, value_enum, default_value_t = OverrideBackend::File)]
    pub override_backend: OverrideBackend,

    /// Location of the local override (file or SQLite database).
    #[clap(long, value_parser = parse_path)]
    pub override_path: Option<PathBuf>,

    /// Key the collection is stored under.
    #[clap(long, default_value = vinyl_catalog::override_store::DEFAULT_OVERRIDE_KEY)]
    pub override_key: String,

    /// Default destination of the `export` command.
    #[clap(long, default_value = vinyl_catalog::config::DEFAULT_EXPORT_PATH)]
    pub export_path: PathBuf,

    /// How ids of new records are generated.
    #[clap(long, value_enum, default_value_t = IdScheme::Timestamp)]
    pub id_scheme: IdScheme,

    /// Sort token applied at startup, e.g. `artist` or `year-desc`.
    #[clap(long)]
    pub default_sort: Option<String>,

    /// Timeout in seconds for fetching an HTTP baseline.
    #[clap(long, default_value_t = vinyl_catalog::config::DEFAULT_HTTP_TIMEOUT_SEC)]
    pub http_timeout_sec: u64,

    /// Delete without asking for confirmation.
    #[clap(short = 'y', long)]
    pub assume_yes: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            data_source: self.data_source.clone(),
            http_timeout_sec: self.http_timeout_sec,
            override_backend: self.override_backend,
            override_path: self.override_path.clone(),
            override_key: self.override_key.clone(),
            export_path: self.export_path.clone(),
            id_scheme: self.id_scheme,
            default_sort: self.default_sort.clone(),
            assume_yes: self.assume_yes,
        }
    }
}

#[derive(Parser)]
#[command(styles=get_styles(), name = "", disable_help_subcommand = true)]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

/// Values for the add and edit commands. On edit, omitted flags keep the
/// current value and an empty value clears an optional field.
#[derive(Args, Debug)]
struct FieldArgs {
    #[arg(long)]
    artist: Option<String>,
    #[arg(long)]
    album: Option<String>,
    /// Digits only; an empty value clears the year.
    #[arg(long, value_parser = parse_year_arg)]
    year: Option<YearArg>,
    #[arg(long)]
    genre: Option<String>,
    /// mint, near-mint, very-good-plus, very-good, good-plus, good, fair, poor
    #[arg(long)]
    condition: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// Album cover image URL.
    #[arg(long)]
    cover: Option<String>,
}

impl FieldArgs {
    fn apply_to(self, fields: &mut RecordFields) {
        if let Some(artist) = self.artist {
            fields.artist = artist;
        }
        if let Some(album) = self.album {
            fields.album = album;
        }
        if let Some(YearArg(year)) = self.year {
            fields.year = year;
        }
        if let Some(genre) = self.genre {
            fields.genre = Some(genre);
        }
        if let Some(condition) = self.condition {
            fields.condition = Condition::from(condition);
        }
        if let Some(notes) = self.notes {
            fields.notes = Some(notes);
        }
        if let Some(cover) = self.cover {
            fields.album_cover = Some(cover);
        }
    }
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Shows the records matching the current search, genre and sort.
    List,

    /// Sets the search term; without a term the search is cleared.
    Search { term: Vec<String> },

    /// Shows only records of the given genre, or every genre with `all`.
    Genre {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Sets the sort token, e.g. `artist`, `year-desc`; without a token
    /// records are shown in insertion order.
    Sort { token: Option<String> },

    /// Shows the distinct genres in the collection.
    Genres,

    /// Shows the record count line.
    Stats,

    /// Shows every field of a record.
    Show { id: String },

    /// Adds a record at the top of the collection.
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Changes fields of an existing record.
    Edit {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Deletes a record after confirmation.
    Delete { id: String },

    /// Writes the whole collection as pretty-printed JSON.
    Export { path: Option<PathBuf> },

    /// Forgets local changes and reloads the baseline.
    Reset,

    /// Shows where the collection is loaded from and saved to.
    Where,

    /// Shows the available commands.
    Help,

    /// Close this program.
    Exit,
}

const COMMANDS_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "list",
        args: "",
        description: "Show the current view",
    },
    CommandHelp {
        name: "search",
        args: "[term]",
        description: "Filter by artist or album",
    },
    CommandHelp {
        name: "genre",
        args: "<name|all>",
        description: "Filter by genre",
    },
    CommandHelp {
        name: "sort",
        args: "[token]",
        description: "Sort by a field, add -desc to reverse",
    },
    CommandHelp {
        name: "genres",
        args: "",
        description: "List genres",
    },
    CommandHelp {
        name: "stats",
        args: "",
        description: "Count records",
    },
    CommandHelp {
        name: "show",
        args: "<id>",
        description: "Show one record",
    },
    CommandHelp {
        name: "add",
        args: "--artist <a> --album <b> [...]",
        description: "Add a record",
    },
    CommandHelp {
        name: "edit",
        args: "<id> [--field <value>...]",
        description: "Edit a record",
    },
    CommandHelp {
        name: "delete",
        args: "<id>",
        description: "Delete a record",
    },
    CommandHelp {
        name: "export",
        args: "[path]",
        description: "Export the collection as JSON",
    },
    CommandHelp {
        name: "reset",
        args: "",
        description: "Drop local changes",
    },
    CommandHelp {
        name: "where",
        args: "",
        description: "Show data locations",
    },
    CommandHelp {
        name: "help",
        args: "",
        description: "Show this help",
    },
    CommandHelp {
        name: "exit",
        args: "",
        description: "Quit",
    },
];

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

/// Asks on the terminal before a record is deleted.
struct PromptConfirm {
    assume_yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                print_error(&format!("Cannot read confirmation: {}", err));
                return false;
            }
        };
        match editor.readline(&format!("{} [y/N] ", prompt)) {
            Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

struct Session {
    store: CollectionStore,
    source: Box<dyn BaselineSource>,
    config: AppConfig,
}

fn print_records(records: &[&Record]) {
    if records.is_empty() {
        print_empty_list("No records found");
        return;
    }
    let mut table = TableBuilder::new(vec!["Id", "Artist", "Album", "Year", "Genre", "Condition"]);
    for record in records {
        let year = record.year.map(|y| y.to_string()).unwrap_or_default();
        table.add_row(vec![
            record.id.as_str(),
            record.artist.as_str(),
            record.album.as_str(),
            year.as_str(),
            record.genre.as_deref().unwrap_or(""),
            record.condition.as_str(),
        ]);
    }
    table.print();
}

fn print_record(record: &Record) {
    print_section_header(&format!("{} - {}", record.artist, record.album));
    print_key_value_highlight("Id", &record.id);
    print_key_value("Artist", &record.artist);
    print_key_value("Album", &record.album);
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();
    print_key_value(
        "Year",
        &record.year.map(|y| y.to_string()).unwrap_or("-".to_string()),
    );
    print_key_value("Genre", &or_dash(record.genre.as_deref()));
    let condition = record.condition.as_str();
    print_key_value(
        "Condition",
        if condition.is_empty() { "-" } else { condition },
    );
    print_key_value("Notes", &or_dash(record.notes.as_deref()));
    print_key_value("Cover", &or_dash(record.album_cover.as_deref()));
    print_key_value("Added", &record.date_added);
    print_section_footer();
}

async fn execute_command(line: String, session: &mut Session) -> CommandExecutionResult {
    if line.trim().is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    let cli = match cli {
        Ok(cli) => cli,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return CommandExecutionResult::Ok;
        }
    };

    let store = &mut session.store;
    match cli.command {
        InnerCommand::List => {
            print_records(&store.visible());
            print_info(&store.stats_text());
        }
        InnerCommand::Search { term } => {
            store.set_search_term(&term.join(" "));
            print_records(&store.visible());
            print_info(&store.stats_text());
        }
        InnerCommand::Genre { name } => {
            store.set_genre_filter(GenreFilter::parse(&name.join(" ")));
            print_records(&store.visible());
            print_info(&store.stats_text());
        }
        InnerCommand::Sort { token } => {
            if let Err(err) = store.set_sort_token(token.as_deref().unwrap_or("")) {
                return CommandExecutionResult::Error(err.to_string());
            }
            print_records(&store.visible());
        }
        InnerCommand::Genres => {
            let genres = store.genres();
            if genres.is_empty() {
                print_empty_list("No genres");
            }
            for genre in genres {
                print_list_item(&genre);
            }
        }
        InnerCommand::Stats => print_info(&store.stats_text()),
        InnerCommand::Show { id } => match store.get(&id) {
            Some(record) => print_record(record),
            None => return CommandExecutionResult::Error(format!("Record {} not found", id)),
        },
        InnerCommand::Add { fields } => {
            let mut values = RecordFields::default();
            fields.apply_to(&mut values);
            match store.add(values) {
                Ok(record) => print_success(&format!(
                    "Added \"{}\" by {} ({})",
                    record.album, record.artist, record.id
                )),
                Err(err) => return CommandExecutionResult::Error(err.to_string()),
            }
        }
        InnerCommand::Edit { id, fields } => {
            let Some(record) = store.get(&id) else {
                print_warning(&format!("Record {} not found, nothing changed", id));
                return CommandExecutionResult::Ok;
            };
            let mut values = record.fields();
            fields.apply_to(&mut values);
            match store.edit(&id, values) {
                Ok(_) => print_success(&format!("Updated record {}", id)),
                Err(err) => return CommandExecutionResult::Error(err.to_string()),
            }
        }
        InnerCommand::Delete { id } => {
            let confirm = PromptConfirm {
                assume_yes: session.config.assume_yes,
            };
            match store.delete(&id, &confirm) {
                Ok(DeleteOutcome::Deleted) => print_success(&format!("Deleted record {}", id)),
                Ok(DeleteOutcome::Declined) => print_info("Nothing deleted"),
                Ok(DeleteOutcome::NotFound) => {
                    return CommandExecutionResult::Error(format!("Record {} not found", id))
                }
                Err(err) => return CommandExecutionResult::Error(err.to_string()),
            }
        }
        InnerCommand::Export { path } => {
            let path = path.unwrap_or_else(|| session.config.export_path.clone());
            match export_to_file(store.records(), &path) {
                Ok(()) => print_success(&format!(
                    "Exported {} records to {}",
                    store.len(),
                    path.display()
                )),
                Err(err) => return CommandExecutionResult::Error(err.to_string()),
            }
        }
        InnerCommand::Reset => match store.reset(session.source.as_ref()).await {
            Ok(origin) => print_success(&format!(
                "Local changes dropped, {} records loaded from {}",
                store.len(),
                origin
            )),
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::Where => {
            print_key_value("Baseline", &session.source.describe());
            print_key_value(
                "Local changes",
                &format!(
                    "{} ({})",
                    store.override_location(),
                    session.config.override_backend
                ),
            );
            print_key_value("Export", &session.config.export_path.display().to_string());
        }
        InnerCommand::Help => print_help(COMMANDS_HELP),
        InnerCommand::Exit => return CommandExecutionResult::Exit,
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    let source = create_baseline_source(&config.data_source, config.http_timeout_sec)?;
    let overrides = create_override_store(
        config.override_backend,
        &config.override_path,
        &config.override_key,
    )?;
    let mut store = CollectionStore::new(overrides, create_id_generator(config.id_scheme));
    let origin = store.load(source.as_ref()).await;
    store.set_sort(config.default_sort);

    print_welcome(&[
        ("Baseline", source.describe()),
        ("Loaded", format!("{} records ({})", store.len(), origin)),
        ("Local changes", store.override_location()),
    ]);

    let mut session = Session {
        store,
        source,
        config,
    };

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(rl_config)?;
    rl.set_helper(Some(MyHelper::new()));

    let prompt = get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &mut session).await {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    print_goodbye();
    Ok(())
}
