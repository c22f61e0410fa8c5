use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use qdf_lib::grapheme::{LETTERS, MARKS};
use qdf_lib::output::{render, to_json, Digitized, Plain, Translated};
use qdf_lib::{append_clause, encode, encode_with_trackers, format_clause, resolve, Corpus, QdfError};

#[derive(Parser)]
#[command(name = "qdf", about = "Arabic letter digitizer and verse filter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode Arabic text as letter/diacritic codes. If TEXT is omitted, reads stdin.
    Encode {
        text: Option<String>,

        /// Append S/T/M tracker flags to each word.
        #[arg(long)]
        trackers: bool,
    },

    /// Resolve a filter such as "1,3;2:5;4:1:2-3" against a corpus.
    Search {
        filter: String,

        /// Corpus XML document (<sura index><aya index text/></sura>).
        #[arg(long, env = "QDF_CORPUS")]
        corpus: PathBuf,

        /// Translation XML document in the same shape, for --format translated.
        #[arg(long, env = "QDF_TRANSLATION")]
        translation: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,

        /// Append S/T/M tracker flags in digitized output.
        #[arg(long)]
        trackers: bool,

        /// Pretty-print JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Build a filter clause from separate book, verse and word inputs.
    Clause {
        #[arg(long)]
        book: Option<String>,

        #[arg(long)]
        verse: Option<String>,

        #[arg(long)]
        word: Option<String>,

        /// Existing filter to append the clause to.
        #[arg(long)]
        append: Option<String>,
    },

    /// Print the letter and diacritic code tables.
    Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Plain,
    Digitized,
    Translated,
    Json,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), QdfError> {
    match cli.command {
        Command::Encode { text, trackers } => {
            let convert: fn(&str) -> String = if trackers { encode_with_trackers } else { encode };
            match text {
                Some(ref text) => println!("{}", convert(text)),
                None => {
                    let stdin = io::stdin();
                    for line in stdin.lock().lines() {
                        println!("{}", convert(&line?));
                    }
                }
            }
        }
        Command::Search {
            filter,
            corpus,
            translation,
            format,
            trackers,
            pretty,
        } => {
            let corpus = Corpus::load(&corpus)?;
            let results = resolve(&corpus, &filter)?;
            log::info!("filter {filter:?} produced {} result(s)", results.len());
            let text = match format {
                Format::Json => to_json(&results, pretty)?,
                Format::Plain => render(&results, &Plain),
                Format::Digitized => render(&results, &Digitized { trackers }),
                Format::Translated => {
                    let path = translation.ok_or(QdfError::MissingTranslation)?;
                    let lookup = Corpus::load(&path)?;
                    render(&results, &Translated { lookup: &lookup })
                }
            };
            println!("{text}");
        }
        Command::Clause {
            book,
            verse,
            word,
            append,
        } => {
            let clause = format_clause(book.as_deref(), verse.as_deref(), word.as_deref())?;
            match append {
                Some(filter) => println!("{}", append_clause(&filter, &clause)),
                None => println!("{clause}"),
            }
        }
        Command::Legend => print!("{}", legend()),
    }
    Ok(())
}

fn legend() -> String {
    let letters = LETTERS
        .iter()
        .map(|(c, code)| format!("{c}={code}"))
        .collect::<Vec<_>>()
        .join(" ");
    let marks = MARKS
        .iter()
        .map(|m| format!("({})={}", m.code, m.name))
        .collect::<Vec<_>>()
        .join(" ");
    let example = "\u{0628}\u{0650}\u{0633}\u{0652}\u{0645}\u{0650}";
    format!(
        "Letters: {letters}\n\
         Diacritics: {marks}\n\
         Letters in a word are separated by \" - \"; words are enclosed in [].\n\
         Trackers: S=shadda, T=tanween, M=ta marbuta.\n\
         Example: {example} = {}\n",
        encode(example)
    )
}
