use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use keyword_maestro::config::Config;
use keyword_maestro::gateway::{GeminiClient, GenerationError, KeywordGateway};
use keyword_maestro::record::{ContentIdeas, KeywordRecord};
use keyword_maestro::session::Session;
use keyword_maestro::sort::{SortDirection, SortField, SortSpec};
use keyword_maestro::{countries, export, filter};
use log::LevelFilter;
use std::io::{BufRead, Write};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let matches = Command::new("keyword-maestro")
        .version(env!("CARGO_PKG_VERSION"))
        .about("AI-powered keyword research: generate, filter, sort and export keyword ideas")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("keyword-maestro.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("topic")
                .short('t')
                .long("topic")
                .value_name("TEXT")
                .help("Topic to generate keyword ideas for")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("country")
                .long("country")
                .value_name("NAME")
                .help("Target country for the generated metrics")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("contains-topic")
                .long("contains-topic")
                .help("Keep only keywords that contain the topic text")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("min-volume")
                .long("min-volume")
                .value_name("N")
                .help("Minimum estimated monthly search volume")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("max-competition")
                .long("max-competition")
                .value_name("N")
                .help("Maximum competition score, 1-100")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("min-words")
                .long("min-words")
                .value_name("N")
                .help("Minimum word count per keyword")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("max-words")
                .long("max-words")
                .value_name("N")
                .help("Maximum word count per keyword")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .value_name("TERMS")
                .help("Comma-separated terms every keyword must contain")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("TERMS")
                .help("Comma-separated terms no keyword may contain")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .value_name("FIELD")
                .help("Sort column: keyword, volume or competition")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("ascending")
                .long("ascending")
                .help("Sort ascending instead of descending")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .help("Write <topic>_keywords.csv with the filtered result set")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Interactive mode: edit filters, sort, page and export live")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Run against canned sample data, no API key required")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-countries")
                .long("list-countries")
                .help("List the supported target countries and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        if let Err(e) = Config::default().to_file(generate_path) {
            eprintln!("Error generating configuration: {e:#}");
            process::exit(1);
        }
        println!("Default configuration written to: {generate_path}");
        return;
    }

    if matches.get_flag("list-countries") {
        for country in countries::COUNTRIES {
            println!("{country}");
        }
        return;
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    let country = match matches.get_one::<String>("country") {
        Some(name) => match countries::resolve(name) {
            Some(canonical) => canonical.to_string(),
            None => {
                eprintln!("Unknown country: {name} (see --list-countries)");
                process::exit(1);
            }
        },
        None => config.default_country.clone(),
    };

    if matches.get_flag("demo") {
        println!("🎬 Demo mode: canned sample data, nothing leaves this machine.");
        let session = Session::new(DemoGateway, country);
        run_app(session, &matches).await;
        return;
    }

    let client = match GeminiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating Gemini client: {e:#}");
            process::exit(1);
        }
    };
    let session = Session::new(client, country);
    run_app(session, &matches).await;
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if Path::new(path).exists() {
        log::debug!("loading configuration from {path}");
        Config::from_file(path)
    } else {
        log::debug!("no configuration file at {path}, using defaults");
        Ok(Config::default())
    }
}

async fn run_app<G: KeywordGateway>(mut session: Session<G>, matches: &ArgMatches) {
    apply_filter_args(&mut session, matches);

    if let Some(topic) = matches.get_one::<String>("topic") {
        session.submit(topic).await;
        print_results(&session);

        if matches.get_flag("export") {
            export_results(&session, None);
        }
        if !matches.get_flag("interactive") {
            return;
        }
    } else if !matches.get_flag("interactive") && !matches.get_flag("demo") {
        println!("Nothing to do: pass --topic, --interactive or --demo (see --help).");
        return;
    }

    repl(&mut session).await;
}

fn apply_filter_args<G: KeywordGateway>(session: &mut Session<G>, matches: &ArgMatches) {
    let criteria = session.criteria_mut();
    if matches.get_flag("contains-topic") {
        criteria.mode = filter::FilterMode::ContainingTopic;
    }
    for (arg, slot) in [
        ("min-volume", &mut criteria.min_volume),
        ("max-competition", &mut criteria.max_competition),
        ("min-words", &mut criteria.min_words),
        ("max-words", &mut criteria.max_words),
        ("include", &mut criteria.include_terms),
        ("exclude", &mut criteria.exclude_terms),
    ] {
        if let Some(value) = matches.get_one::<String>(arg) {
            *slot = value.clone();
        }
    }

    if let Some(name) = matches.get_one::<String>("sort") {
        match SortField::parse(name) {
            Some(field) => {
                let direction = if matches.get_flag("ascending") {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                };
                session.set_sort(SortSpec { field, direction });
            }
            None => {
                eprintln!("Unknown sort field: {name} (keyword, volume or competition)");
                process::exit(1);
            }
        }
    }
}

async fn repl<G: KeywordGateway>(session: &mut Session<G>) {
    println!();
    println!("Interactive mode. Type 'help' for commands, 'quit' to leave.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "search" | "s" => {
                session.submit(rest).await;
                print_results(session);
            }
            "country" => match countries::resolve(rest) {
                Some(canonical) => {
                    session.set_country(canonical).await;
                    print_results(session);
                }
                None => println!("Unknown country: {rest} (try 'countries')"),
            },
            "mode" => {
                match rest {
                    "all" => session.criteria_mut().mode = filter::FilterMode::All,
                    "containing" => {
                        session.criteria_mut().mode = filter::FilterMode::ContainingTopic
                    }
                    _ => {
                        println!("Usage: mode all|containing");
                        continue;
                    }
                }
                print_results(session);
            }
            "minvol" => {
                session.criteria_mut().min_volume = rest.to_string();
                print_results(session);
            }
            "maxcomp" => {
                session.criteria_mut().max_competition =
                    if rest.is_empty() { "100".to_string() } else { rest.to_string() };
                print_results(session);
            }
            "minwords" => {
                session.criteria_mut().min_words = rest.to_string();
                print_results(session);
            }
            "maxwords" => {
                session.criteria_mut().max_words = rest.to_string();
                print_results(session);
            }
            "include" => {
                session.criteria_mut().include_terms = rest.to_string();
                print_results(session);
            }
            "exclude" => {
                session.criteria_mut().exclude_terms = rest.to_string();
                print_results(session);
            }
            "sort" => match SortField::parse(rest) {
                Some(field) => {
                    session.toggle_sort(field);
                    print_results(session);
                }
                None => println!("Usage: sort keyword|volume|competition"),
            },
            "next" | "n" => {
                session.next_page();
                print_results(session);
            }
            "prev" | "p" => {
                session.prev_page();
                print_results(session);
            }
            "page" => match rest.parse::<usize>() {
                Ok(page) => {
                    session.set_page(page);
                    print_results(session);
                }
                Err(_) => println!("Usage: page <number>"),
            },
            "show" => print_results(session),
            "export" => {
                let path = if rest.is_empty() { None } else { Some(rest) };
                export_results(session, path);
            }
            "ideas" => {
                ideas_for_row(session, rest).await;
            }
            "countries" => {
                for country in countries::COUNTRIES {
                    println!("{country}");
                }
            }
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,
            _ => println!("Unknown command: {command} (try 'help')"),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  search <topic>        generate keyword ideas for a topic");
    println!("  country <name>        change the target country (refetches)");
    println!("  mode all|containing   keep all keywords, or only ones containing the topic");
    println!("  minvol <n>            minimum search volume (blank to clear)");
    println!("  maxcomp <n>           maximum competition 1-100 (blank to clear)");
    println!("  minwords/maxwords <n> word-count bounds (blank to clear)");
    println!("  include <a,b>         comma-separated required terms");
    println!("  exclude <a,b>         comma-separated forbidden terms");
    println!("  sort <field>          toggle sort on keyword|volume|competition");
    println!("  next / prev / page n  navigate pages");
    println!("  show                  reprint the current page");
    println!("  export [file]         write the filtered set as CSV");
    println!("  ideas <row>           content ideas for a row on this page");
    println!("  countries             list supported countries");
    println!("  quit                  leave");
}

fn print_results<G: KeywordGateway>(session: &Session<G>) {
    if let Some(error) = session.error() {
        println!("⚠️  {error}");
        return;
    }
    if session.record_count() == 0 {
        println!("Enter a topic to generate keyword ideas (try: search sourdough baking).");
        return;
    }

    let page = session.view();
    if page.total_filtered == 0 {
        println!("No results match your current filters.");
        return;
    }

    let sort = session.sort();
    let arrow = match sort.direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    };
    println!();
    println!(
        "{} of {} keywords for \"{}\" in {}, sorted by {} {arrow}",
        page.total_filtered,
        session.record_count(),
        session.topic(),
        session.country(),
        sort.field,
    );
    println!("{:<5} {:<52} {:>12} {:>12}", "#", "Keyword", "Volume", "Competition");
    for (i, record) in page.rows.iter().enumerate() {
        println!(
            "{:<5} {:<52} {:>12} {:>12}",
            i + 1,
            record.keyword,
            record.search_volume,
            record.competition
        );
    }
    if page.total_pages > 1 {
        println!("Page {} of {} (next/prev to navigate)", page.current_page, page.total_pages);
    }
}

fn export_results<G: KeywordGateway>(session: &Session<G>, path: Option<&str>) {
    let records = session.processed();
    let result = match path {
        Some(path) => std::fs::write(path, export::csv_string(&records))
            .map(|_| Path::new(path).to_path_buf())
            .map_err(anyhow::Error::from),
        None => export::write_file(Path::new("."), session.topic(), &records),
    };
    match result {
        Ok(path) => println!("✅ Exported {} keywords to {}", records.len(), path.display()),
        Err(e) => println!("⚠️  Export failed: {e:#}"),
    }
}

async fn ideas_for_row<G: KeywordGateway>(session: &Session<G>, rest: &str) {
    let row: usize = match rest.parse() {
        Ok(row) => row,
        Err(_) => {
            println!("Usage: ideas <row number on the current page>");
            return;
        }
    };
    let page = session.view();
    let Some(record) = row.checked_sub(1).and_then(|i| page.rows.get(i)) else {
        println!("No row {row} on this page.");
        return;
    };

    println!("Generating content ideas for \"{}\"...", record.keyword);
    match session.content_ideas(&record.keyword).await {
        Ok(ideas) => {
            println!();
            println!("💡 Titles:");
            for (i, title) in ideas.titles.iter().enumerate() {
                println!("  {}. {title}", i + 1);
            }
            println!();
            println!("Description:");
            println!("{}", ideas.description);
        }
        Err(e) => println!("⚠️  {e}"),
    }
}

/// Canned gateway for `--demo`: a deterministic sample set shaped like a
/// real response (enough rows to paginate), no network involved.
struct DemoGateway;

const DEMO_TEMPLATES: &[(&str, u64, u8)] = &[
    ("how to start {}", 74000, 62),
    ("{} for beginners", 51000, 38),
    ("easy {} tips", 44000, 45),
    ("best {} tools 2024", 38000, 71),
    ("{} mistakes to avoid", 33000, 29),
    ("{} step by step", 29500, 41),
    ("{} on a budget", 27000, 33),
    ("advanced {} techniques", 21000, 55),
    ("{} vs the alternatives", 18500, 48),
    ("10 minute {}", 17000, 36),
    ("{} for kids", 15500, 27),
    ("{} equipment guide", 14000, 52),
    ("weekly {} routine", 12500, 31),
    ("{} science explained", 11000, 44),
    ("{} challenge", 9800, 58),
    ("{} before and after", 8600, 35),
    ("is {} worth it", 7400, 26),
    ("{} q&a", 6300, 22),
    ("{} gone wrong", 5200, 49),
    ("{} secrets nobody tells you", 4400, 63),
    ("my {} setup tour", 3600, 30),
    ("{} myths busted", 2900, 40),
    ("{} history in 5 minutes", 2100, 24),
    ("beginner {} quiz", 1400, 18),
    ("{} community highlights", 800, 12),
];

#[async_trait]
impl KeywordGateway for DemoGateway {
    async fn generate_keywords(
        &self,
        topic: &str,
        country: &str,
    ) -> Result<Vec<KeywordRecord>, GenerationError> {
        log::info!("demo gateway serving canned keywords for {topic:?} in {country}");
        Ok(DEMO_TEMPLATES
            .iter()
            .map(|(template, volume, competition)| {
                KeywordRecord::new(template.replace("{}", topic), *volume, *competition)
            })
            .collect())
    }

    async fn generate_content_ideas(
        &self,
        keyword: &str,
        topic: &str,
    ) -> Result<ContentIdeas, GenerationError> {
        Ok(ContentIdeas {
            titles: vec![
                format!("{keyword}: the complete walkthrough"),
                format!("I tried {keyword} for 30 days"),
                format!("{keyword}: what nobody tells you"),
            ],
            description: format!(
                "In this video we dig into {keyword} and what it means for anyone \
                 getting into {topic}. You'll see the exact steps, the common traps, \
                 and the results you can expect in your first month. If this helps, \
                 subscribe and leave a comment with your own experience."
            ),
        })
    }
}
