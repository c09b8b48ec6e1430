mod scan;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use directory_core::{
    AutocompleteIndex, DirectoryStats, Person, PersonFilter, SortOrder, build_people, build_stats,
    filter_people, sort_people,
};

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(
    name = "people_directory",
    about = "Unified people directory over talks and papers"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the people and autocomplete indices → output/*.json
    Build {
        /// Directory holding talk/paper JSON payloads
        #[arg(default_value = "data")]
        data_dir: PathBuf,
    },
    /// Search the cached people index
    Query {
        /// Search terms (tokens of 2+ characters are matched)
        terms: Vec<String>,
        /// Category filter: all, talks, papers, merged
        #[arg(long, default_value = "all")]
        filter: String,
        /// Sort order: works, citations, alpha, alpha-desc
        #[arg(long, default_value = "works")]
        sort: String,
        /// Maximum number of people to print
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Show autocomplete suggestions for a prefix
    Suggest { prefix: Vec<String> },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Build { data_dir }) => run_build(&data_dir),
        Some(Command::Query {
            terms,
            filter,
            sort,
            limit,
        }) => run_query(&terms.join(" "), &filter, &sort, limit),
        Some(Command::Suggest { prefix }) => run_suggest(&prefix.join(" ")),
        // Default: build from ./data
        None => run_build(Path::new("data")),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT FILE HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn output_path(name: &str) -> PathBuf {
    Path::new(OUTPUT_DIR).join(name)
}

fn write_json<T: serde::Serialize>(name: &str, data: &T) {
    let path = output_path(name);
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    std::fs::write(&path, &json).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    eprintln!("  {} ({} bytes)", path.display(), json.len());
}

fn read_json<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let path = output_path(name);
    let json = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", path.display());
        eprintln!("Run `people_directory build` first to generate the index.");
        std::process::exit(1);
    });
    serde_json::from_str(&json).unwrap_or_else(|e| {
        eprintln!("Cannot parse {}: {e}", path.display());
        eprintln!("The JSON may be from an older format. Re-run the build.");
        std::process::exit(1);
    })
}

#[derive(serde::Serialize, serde::Deserialize)]
struct PeopleFile {
    people: Vec<Person>,
    stats: DirectoryStats,
}

// ═══════════════════════════════════════════════════════════════════════
//  BUILD MODE: scan payloads, build indices, write output/*.json
// ═══════════════════════════════════════════════════════════════════════

fn run_build(data_dir: &Path) {
    eprintln!("Scanning data directory: {}", data_dir.display());

    let corpus = scan::scan_corpus(data_dir);
    eprintln!(
        "Found {} talks in {} file(s), {} papers in {} file(s)",
        corpus.talks.len(),
        corpus.talk_files.len(),
        corpus.papers.len(),
        corpus.paper_files.len()
    );
    if !corpus.skipped.is_empty() {
        eprintln!("Skipped {} unrecognized JSON file(s):", corpus.skipped.len());
        for path in corpus.skipped.iter().take(10) {
            eprintln!("  {}", path.display());
        }
    }

    let people = build_people(&corpus.talks, &corpus.papers);
    let stats = build_stats(&people, &corpus.talks, &corpus.papers);
    let autocomplete = AutocompleteIndex::build(&corpus.talks, &corpus.papers, &people);

    // ── Print statistics ───────────────────────────────────────────
    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  DIRECTORY STATISTICS");
    eprintln!("══════════════════════════════════════════");
    eprintln!("\nPeople:          {}", stats.people);
    eprintln!("  talk-only:     {}", stats.talk_only);
    eprintln!("  paper-only:    {}", stats.paper_only);
    eprintln!(
        "  both:          {}",
        stats.people - stats.talk_only - stats.paper_only
    );
    eprintln!("  multi-variant: {}", stats.multi_variant);
    eprintln!("Talks:           {}", stats.talks);
    eprintln!("Papers:          {}", stats.papers);
    eprintln!("Citations:       {}", stats.citations);

    if !stats.top_affiliations.is_empty() {
        eprintln!("\nTop affiliations:");
        for (affiliation, count) in &stats.top_affiliations {
            eprintln!("  {affiliation}: {count} people");
        }
    }

    eprintln!("\nTop topics:");
    for topic in autocomplete.topics.iter().take(15) {
        eprintln!("  {}: {} occurrences", topic.label, topic.count);
    }

    eprintln!("\nMost active people:");
    for p in people.iter().take(10) {
        let variants = if p.variant_names.is_empty() {
            String::new()
        } else {
            format!(" (also: {})", p.variant_names.join(", "))
        };
        eprintln!(
            "  {} — {} talks, {} papers, {} citations{}",
            p.name, p.talk_count, p.paper_count, p.citation_count, variants
        );
    }

    // ── Write output files ─────────────────────────────────────────
    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  WRITING OUTPUT FILES");
    eprintln!("══════════════════════════════════════════\n");

    std::fs::create_dir_all(OUTPUT_DIR).expect("cannot create output/");
    write_json("people.json", &PeopleFile { people, stats });
    write_json("autocomplete.json", &autocomplete);

    eprintln!("\nDone. Query with:");
    eprintln!("  cargo run -- query lattner");
    eprintln!("  cargo run -- query --filter merged --sort citations");
    eprintln!("  cargo run -- suggest opti");
}

// ═══════════════════════════════════════════════════════════════════════
//  QUERY MODE: search the cached people index
// ═══════════════════════════════════════════════════════════════════════

fn run_query(query: &str, filter: &str, sort: &str, limit: usize) {
    let data: PeopleFile = read_json("people.json");
    let filter = PersonFilter::from_str(filter);
    let sort = SortOrder::from_str(sort);

    let mut matched = filter_people(&data.people, filter, query);
    sort_people(&mut matched, sort);

    eprintln!(
        "{} of {} people match (filter: {}, sort: {})",
        matched.len(),
        data.people.len(),
        filter.as_str(),
        sort.as_str()
    );

    for p in matched.iter().take(limit) {
        let affiliation = if p.affiliation.is_empty() {
            "—"
        } else {
            p.affiliation.as_str()
        };
        println!(
            "{} | {} | {} talks, {} papers, {} citations",
            p.name, affiliation, p.talk_count, p.paper_count, p.citation_count
        );
        if !p.variant_names.is_empty() {
            println!("  also seen as: {}", p.variant_names.join(", "));
        }
    }
    if matched.len() > limit {
        eprintln!(
            "... and {} more (raise --limit to see them)",
            matched.len() - limit
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  SUGGEST MODE: dropdown preview + routing verdict
// ═══════════════════════════════════════════════════════════════════════

fn run_suggest(prefix: &str) {
    let autocomplete: AutocompleteIndex = read_json("autocomplete.json");

    let items = autocomplete.suggest(prefix);
    if items.is_empty() {
        eprintln!("No suggestions for: {prefix}");
    }

    let mut current_section = None;
    for item in &items {
        if current_section != Some(item.section) {
            println!("{}:", item.section.heading());
            current_section = Some(item.section);
        }
        println!("  {} ({})", item.label, item.count);
    }

    if autocomplete.should_route_to_global_search(prefix) {
        println!(
            "\n→ would route to {}",
            directory_core::links::global_search(prefix)
        );
    } else {
        println!("\n→ stays on the people directory");
    }
}
