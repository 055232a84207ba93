//! Terminal viewer and batch driver for the docket search core.
//!
//! # Responsibility
//! - Drive ingestion and expose the core query surface from a terminal.
//! - Own boundary policy: argument parsing, output shaping, and the
//!   minimum search-term length guard.

use regsearch_core::db::open_db;
use regsearch_core::{
    build_extractor, parse_extractor_kind, Docket, DocketService, ExtractorKind, IngestPipeline,
    KeywordExtractor, LexicalExtractor, SqliteDocketRepository,
};
use std::process::ExitCode;

const MIN_SEARCH_TERM_CHARS: usize = 2;
const PREVIEW_WIDTH: usize = 40;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let Some(command) = args.first() else {
        return Err(usage());
    };

    match command.as_str() {
        "ingest" => cmd_ingest(&args[1..]),
        "list" => cmd_list(&args[1..]),
        "get" => cmd_get(&args[1..]),
        "search" => cmd_search(&args[1..]),
        "keywords" => cmd_keywords(&args[1..]),
        "version" => {
            println!("regsearch {}", regsearch_core::core_version());
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n{}", usage())),
    }
}

fn usage() -> String {
    [
        "usage: regsearch <command> [args]",
        "  ingest <db> <json> [--extractor lexical|linguistic] [--min-token-len N]",
        "  list <db>",
        "  get <db> <docket-id>",
        "  search <db> <term>",
        "  keywords <db>",
        "  version",
    ]
    .join("\n")
}

fn cmd_ingest(args: &[String]) -> Result<(), String> {
    let (db_path, rest) = take_arg(args, "database path")?;
    let (source_path, flags) = take_arg(rest, "source path")?;

    let mut kind = ExtractorKind::Lexical;
    let mut min_token_len: Option<usize> = None;
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--extractor" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--extractor requires a value".to_string())?;
                kind = parse_extractor_kind(value).map_err(|err| err.to_string())?;
            }
            "--min-token-len" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--min-token-len requires a value".to_string())?;
                let parsed: usize = value
                    .parse()
                    .map_err(|_| format!("invalid --min-token-len value `{value}`"))?;
                min_token_len = Some(parsed);
            }
            other => return Err(format!("unknown flag `{other}`")),
        }
    }

    let extractor: Box<dyn KeywordExtractor> = match (kind, min_token_len) {
        (ExtractorKind::Lexical, Some(len)) => Box::new(LexicalExtractor::new(len)),
        (ExtractorKind::Linguistic, Some(_)) => {
            return Err("--min-token-len only applies to the lexical extractor".to_string());
        }
        (kind, None) => build_extractor(kind),
    };

    let mut conn = open_db(db_path).map_err(|err| err.to_string())?;
    let repo = SqliteDocketRepository::try_new(&mut conn).map_err(|err| err.to_string())?;
    let mut pipeline = IngestPipeline::new(repo, extractor);
    let count = pipeline
        .ingest_path(source_path)
        .map_err(|err| err.to_string())?;
    println!("ingested {count} records from {source_path}");
    Ok(())
}

fn cmd_list(args: &[String]) -> Result<(), String> {
    let (db_path, _) = take_arg(args, "database path")?;
    let mut conn = open_db(db_path).map_err(|err| err.to_string())?;
    let repo = SqliteDocketRepository::try_new(&mut conn).map_err(|err| err.to_string())?;
    let service = DocketService::new(repo);

    let dockets = service.list_all().map_err(|err| err.to_string())?;
    for docket in &dockets {
        println!("{}", format_docket(docket));
    }
    println!("total: {} dockets", dockets.len());
    Ok(())
}

fn cmd_get(args: &[String]) -> Result<(), String> {
    let (db_path, rest) = take_arg(args, "database path")?;
    let (id_text, _) = take_arg(rest, "docket id")?;
    let docket_id: i64 = id_text
        .parse()
        .map_err(|_| format!("invalid docket id `{id_text}`"))?;

    let mut conn = open_db(db_path).map_err(|err| err.to_string())?;
    let repo = SqliteDocketRepository::try_new(&mut conn).map_err(|err| err.to_string())?;
    let service = DocketService::new(repo);

    match service.get(docket_id).map_err(|err| err.to_string())? {
        Some(docket) => {
            println!("docket #{}", docket.docket_id);
            println!("title:    {}", docket.title);
            println!("summary:  {}", docket.summary);
            println!("keywords: {}", join_keywords(&docket));
            Ok(())
        }
        None => Err(format!("docket {docket_id} not found")),
    }
}

fn cmd_search(args: &[String]) -> Result<(), String> {
    let (db_path, rest) = take_arg(args, "database path")?;
    let (term, _) = take_arg(rest, "search term")?;
    if term.trim().chars().count() < MIN_SEARCH_TERM_CHARS {
        return Err(format!(
            "search term must be at least {MIN_SEARCH_TERM_CHARS} characters"
        ));
    }

    let mut conn = open_db(db_path).map_err(|err| err.to_string())?;
    let repo = SqliteDocketRepository::try_new(&mut conn).map_err(|err| err.to_string())?;
    let service = DocketService::new(repo);

    let hits = service.search(term).map_err(|err| err.to_string())?;
    for docket in &hits {
        println!("{}", format_docket(docket));
    }
    println!("total: {} matches for `{term}`", hits.len());
    Ok(())
}

fn cmd_keywords(args: &[String]) -> Result<(), String> {
    let (db_path, _) = take_arg(args, "database path")?;
    let mut conn = open_db(db_path).map_err(|err| err.to_string())?;
    let repo = SqliteDocketRepository::try_new(&mut conn).map_err(|err| err.to_string())?;
    let service = DocketService::new(repo);

    let keywords = service.list_keywords().map_err(|err| err.to_string())?;
    for keyword in &keywords {
        println!("{keyword}");
    }
    println!("total: {} unique keywords", keywords.len());
    Ok(())
}

fn take_arg<'a>(args: &'a [String], what: &str) -> Result<(&'a String, &'a [String]), String> {
    match args.split_first() {
        Some((first, rest)) => Ok((first, rest)),
        None => Err(format!("missing {what}\n{}", usage())),
    }
}

fn format_docket(docket: &Docket) -> String {
    format!(
        "#{:<6} {} | {} | {}",
        docket.docket_id,
        preview(&docket.title),
        preview(&docket.summary),
        join_keywords(docket)
    )
}

fn join_keywords(docket: &Docket) -> String {
    if docket.keywords.is_empty() {
        "(none)".to_string()
    } else {
        docket
            .keywords
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_WIDTH {
        let short: String = text.chars().take(PREVIEW_WIDTH).collect();
        format!("{short}...")
    } else {
        text.to_string()
    }
}
