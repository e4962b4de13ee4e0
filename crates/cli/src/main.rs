use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{Catalog, Criteria, Movie, Year};
use selector::config::present_year;
use selector::{
    GroupedSelector, IterativeSelector, ProgressiveSelector, Selector, SelectorConfig, TopList,
    ViewOrder, Window,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Top Movies - a selection of movies along the years
#[derive(Parser)]
#[command(name = "top-movies")]
#[command(about = "Curated top movie lists from a static ratings dataset", long_about = None)]
struct Cli {
    /// Path to the dataset (.json export or text score database)
    #[arg(short, long, default_value = "data/movies.json")]
    data: PathBuf,

    /// JSON file with selector parameters (flags take precedence)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the top list
    Top {
        #[command(flatten)]
        params: SelectorArgs,

        /// Selection strategy
        #[arg(long, value_enum, default_value_t = Mode::Progressive)]
        mode: Mode,

        /// Presentation order
        #[arg(long, value_enum, default_value_t = SortOrder::Selection)]
        sort: SortOrder,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// List movies of a period ranked by one criteria
    List {
        /// First year of the period
        #[arg(long, default_value = "1900")]
        start: Year,

        /// Last year of the period (defaults to the present year)
        #[arg(long)]
        end: Option<Year>,

        /// Ranking criteria: all, imdb, rotten, rotten_user, meta, meta_user
        #[arg(long, default_value = "all")]
        criteria: Criteria,

        /// Maximum movies to list
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Exclude documentaries
        #[arg(long)]
        no_documentary: bool,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every rating of one movie
    Show {
        /// Movie identifier (e.g. "the-godfather")
        #[arg(long)]
        id: String,
    },
}

/// Selector parameters; each flag given overrides the config file
#[derive(Args, Debug)]
struct SelectorArgs {
    /// Years per window, also the number of movies picked per window
    #[arg(long, allow_negative_numbers = true)]
    group: Option<i32>,

    /// Span of years to walk back from the current year
    #[arg(long, allow_negative_numbers = true)]
    years: Option<i32>,

    /// Let documentaries compete with the other movies
    #[arg(long, overrides_with = "no_documentaries")]
    documentaries: bool,

    /// Keep documentaries out, even if the config file lets them in
    #[arg(long, overrides_with = "documentaries")]
    no_documentaries: bool,

    /// Year the walk starts from (defaults to the present year)
    #[arg(long)]
    current_year: Option<Year>,

    /// Oldest year reached by the last window
    #[arg(long)]
    oldest: Option<Year>,
}

impl SelectorArgs {
    /// Layer the flags over a base config
    fn apply(&self, mut config: SelectorConfig) -> SelectorConfig {
        if let Some(group) = self.group {
            config.group_size = group;
        }
        if let Some(years) = self.years {
            config.total_years = years;
        }
        if self.documentaries {
            config.include_documentaries = true;
        } else if self.no_documentaries {
            config.include_documentaries = false;
        }
        if let Some(year) = self.current_year {
            config.current_year = year;
        }
        if let Some(oldest) = self.oldest {
            config.oldest = oldest;
        }
        config
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Fixed quota per window, unpicked movies carry over
    Progressive,
    /// Best movie of each year
    Iterative,
    /// Every movie of each window
    Grouped,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortOrder {
    Selection,
    Year,
    Score,
    Id,
}

impl From<SortOrder> for ViewOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Selection => ViewOrder::Selection,
            SortOrder::Year => ViewOrder::Year,
            SortOrder::Score => ViewOrder::Score,
            SortOrder::Id => ViewOrder::Id,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let base_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SelectorConfig::default(),
    };

    // Load the dataset once; every command reads the same catalog
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.data)
            .with_context(|| format!("Failed to load dataset {}", cli.data.display()))?,
    );
    info!("Loaded dataset in {:?}", start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Top {
            params,
            mode,
            sort,
            json,
        } => {
            let config = params.apply(base_config);
            debug!("Selector config {:?}", config);
            handle_top(catalog, config, mode, sort.into(), json)?
        }
        Commands::List {
            start,
            end,
            criteria,
            limit,
            no_documentary,
            json,
        } => {
            let end = end.unwrap_or_else(present_year);
            handle_list(catalog, start, end, criteria, limit, no_documentary, json)?
        }
        Commands::Show { id } => handle_show(catalog, &id)?,
    }

    Ok(())
}

/// Read selector parameters from a JSON file
fn load_config(path: &Path) -> Result<SelectorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: SelectorConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    debug!("Loaded config {:?}", config);
    Ok(config)
}

/// Handle the 'top' command
fn handle_top(
    catalog: Arc<Catalog>,
    config: SelectorConfig,
    mode: Mode,
    order: ViewOrder,
    json: bool,
) -> Result<()> {
    let selector: Box<dyn Selector> = match mode {
        Mode::Progressive => Box::new(ProgressiveSelector::new(config)),
        Mode::Iterative => Box::new(IterativeSelector::new(config)),
        Mode::Grouped => Box::new(GroupedSelector::new(config)),
    };

    // Computed once, immutable from here on
    let top = Arc::new(
        TopList::compute(selector.as_ref(), catalog.movies())
            .with_context(|| format!("{} rejected its parameters", selector.name()))?,
    );

    if json {
        return print_json(&top.view(order));
    }

    let with_headers = order == ViewOrder::Selection && mode != Mode::Iterative;
    if with_headers {
        print_windows(&top, mode);
    } else {
        print_header(&format!("Top {} movies", top.len()));
        print_movies(&top.view(order), 0);
    }
    Ok(())
}

/// Handle the 'list' command
fn handle_list(
    catalog: Arc<Catalog>,
    start: Year,
    end: Year,
    criteria: Criteria,
    limit: usize,
    no_documentary: bool,
    json: bool,
) -> Result<()> {
    let movies = catalog.filter(start, end, criteria, no_documentary);

    if json {
        return print_json(&movies[..movies.len().min(limit)]);
    }

    print_header(&format!("Movies from {} to {}", start, end));
    print_movies(&movies[..movies.len().min(limit)], 0);
    if movies.len() > limit {
        println!("... plus other {} movies", movies.len() - limit);
    }
    Ok(())
}

/// Handle the 'show' command
fn handle_show(catalog: Arc<Catalog>, id: &str) -> Result<()> {
    let movie = catalog
        .get_movie(id)
        .ok_or_else(|| anyhow!("Movie {} not found", id))?;

    println!("{}", format!("{} ({})", movie.name, movie.year).bold().blue());
    println!("{}Id: {}", "• ".green(), movie.id);
    println!("{}Score: {:.1}", "• ".green(), movie.score);
    if movie.documentary {
        println!("{}Documentary", "• ".green());
    }

    let ratings = [
        ("IMDb", movie.ratings.imdb),
        ("Rotten Tomatoes", movie.ratings.rotten),
        ("Rotten Tomatoes (users)", movie.ratings.rotten_user),
        ("Metacritic", movie.ratings.meta),
        ("Metacritic (users)", movie.ratings.meta_user),
    ];
    for (source, rating) in ratings {
        match rating {
            Some(value) => println!("{}{}: {}", "• ".cyan(), source, value),
            None => println!("{}{}: {}", "• ".cyan(), source, "--".dimmed()),
        }
    }
    Ok(())
}

fn print_header(title: &str) {
    println!("{}", title.bold().blue());
}

/// Print the windows of a top list, each under its header
fn print_windows(top: &TopList, mode: Mode) {
    for (header, offset, movies) in window_blocks(top, mode) {
        println!("{}", header.bold().blue());
        let movies: Vec<&Movie> = movies.iter().collect();
        print_movies(&movies, offset);
        println!();
    }
}

/// Header and first rank offset of every window.
///
/// Progressive picks are one list, so ranks run across windows; grouped
/// listings start over in every window.
fn window_blocks(top: &TopList, mode: Mode) -> Vec<(String, usize, &[Movie])> {
    let mut total = 0;
    top.windows()
        .map(|(window, movies)| {
            let offset = if mode == Mode::Progressive { total } else { 0 };
            total += movies.len();
            (window_header(window, mode), offset, movies)
        })
        .collect()
}

fn window_header(window: Window, mode: Mode) -> String {
    match mode {
        Mode::Progressive => format!("--- FROM {} AND ON ---", window.start),
        _ => format!("--- {} TO {} ---", window.start, window.end),
    }
}

/// Print movies as numbered lines, starting after `offset`
fn print_movies(movies: &[&Movie], offset: usize) {
    for (i, movie) in movies.iter().enumerate() {
        let rank = format!("{:3}.", offset + i + 1);
        println!("{} {}", rank.green(), movie);
    }
}

fn print_json(movies: &[&Movie]) -> Result<()> {
    let json = serde_json::to_string_pretty(movies).context("Failed to serialize movies")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use data_loader::CriticRatings;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_top_flags() {
        let cli = Cli::try_parse_from([
            "top-movies", "top", "--group", "-1", "--mode", "grouped", "--sort", "score",
        ])
        .unwrap();
        match cli.command {
            Commands::Top { params, mode, sort, .. } => {
                assert_eq!(params.group, Some(-1));
                assert!(matches!(mode, Mode::Grouped));
                assert_eq!(ViewOrder::from(sort), ViewOrder::Score);
            }
            _ => panic!("expected top command"),
        }
    }

    fn top_params(args: &[&str]) -> SelectorArgs {
        let cli = Cli::try_parse_from(["top-movies", "top"].iter().chain(args)).unwrap();
        match cli.command {
            Commands::Top { params, .. } => params,
            _ => panic!("expected top command"),
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"group_size": 3, "total_years": 40, "include_documentaries": true}}"#
        )
        .unwrap();
        let base = load_config(file.path()).unwrap();
        assert!(base.include_documentaries);

        let config = top_params(&["--years", "10", "--no-documentaries"]).apply(base);
        assert_eq!(config.group_size, 3);
        assert_eq!(config.total_years, 10);
        assert!(!config.include_documentaries);

        // No flag keeps the file value
        assert_eq!(top_params(&[]).apply(base), base);
    }

    #[test]
    fn test_last_documentaries_flag_wins() {
        let base = SelectorConfig::default();
        let on = top_params(&["--no-documentaries", "--documentaries"]).apply(base);
        assert!(on.include_documentaries);
        let off = top_params(&["--documentaries", "--no-documentaries"]).apply(base);
        assert!(!off.include_documentaries);
    }

    fn sample_movies() -> Vec<Movie> {
        [("a", 2021, 9.0), ("b", 2021, 8.0), ("c", 2020, 7.0), ("d", 2019, 6.0)]
            .into_iter()
            .map(|(id, year, score)| {
                let mut movie = Movie::new(id, year, CriticRatings::default());
                movie.score = score;
                movie
            })
            .collect()
    }

    fn blocks(top: &TopList, mode: Mode) -> Vec<(String, usize, usize)> {
        window_blocks(top, mode)
            .into_iter()
            .map(|(header, offset, movies)| (header, offset, movies.len()))
            .collect()
    }

    #[test]
    fn test_progressive_ranks_run_across_windows() {
        let movies = sample_movies();
        let config = SelectorConfig::default()
            .with_group_size(2)
            .with_total_years(4)
            .with_current_year(2021);
        let top = TopList::compute(&ProgressiveSelector::new(config), &movies).unwrap();

        assert_eq!(
            blocks(&top, Mode::Progressive),
            vec![
                ("--- FROM 2020 AND ON ---".to_string(), 0, 2),
                ("--- FROM 2018 AND ON ---".to_string(), 2, 2),
            ]
        );
    }

    #[test]
    fn test_grouped_ranks_restart_per_window() {
        let movies = sample_movies();
        let config = SelectorConfig::default()
            .with_group_size(2)
            .with_total_years(4)
            .with_current_year(2021)
            .with_oldest(2018);
        let top = TopList::compute(&GroupedSelector::new(config), &movies).unwrap();

        assert_eq!(
            blocks(&top, Mode::Grouped),
            vec![
                ("--- 2020 TO 2021 ---".to_string(), 0, 3),
                ("--- 2018 TO 2019 ---".to_string(), 0, 1),
            ]
        );
    }

    #[test]
    fn test_parse_list_criteria() {
        let cli = Cli::try_parse_from(["top-movies", "list", "--criteria", "meta_user"]).unwrap();
        match cli.command {
            Commands::List { criteria, start, .. } => {
                assert_eq!(criteria, Criteria::MetaUser);
                assert_eq!(start, 1900);
            }
            _ => panic!("expected list command"),
        }
        assert!(Cli::try_parse_from(["top-movies", "list", "--criteria", "stars"]).is_err());
    }
}
