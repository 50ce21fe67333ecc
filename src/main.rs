use clap::Parser;
use tracing_subscriber::EnvFilter;

use ratreader::api::ApiClient;
use ratreader::cli::{Cli, Commands};
use ratreader::config::Settings;
use ratreader::domain::{Article, Feed, Session};
use ratreader::errors::RatReaderResult;
use ratreader::prompt::TerminalPrompter;
use ratreader::services::{ApiContext, ArticleService, AuthService, FeedService};
use ratreader::storage::{configure_api_url, JsonSessionStore, SessionStore};

type Context = ApiContext<ApiClient, JsonSessionStore, TerminalPrompter>;
type Auth = AuthService<ApiClient, JsonSessionStore, TerminalPrompter>;
type Feeds = FeedService<ApiClient, JsonSessionStore, TerminalPrompter>;
type Articles = ArticleService<ApiClient, JsonSessionStore, TerminalPrompter>;

/// Feed URLs longer than this are shortened in `feeds`
const FEED_URL_WIDTH: usize = 50;
/// Characters of description shown by `articles --verbose`
const SUMMARY_CHARS: usize = 200;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        // Server-reported and precondition failures only abort the command
        if e.is_fatal() {
            std::process::exit(1);
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> RatReaderResult<()> {
    let settings = Settings::from_env()?;
    init_tracing(&settings.log_filter);

    let store = JsonSessionStore::new(settings.session_path());
    let mut session = store.load()?;

    let ctx: Context = ApiContext::new(ApiClient::new()?, store, TerminalPrompter);

    match cli.command {
        Commands::Login { username, password } => {
            cmd_login(AuthService::new(ctx), &mut session, username, password)
        }
        Commands::Register { username, password } => {
            cmd_register(AuthService::new(ctx), &mut session, username, password)
        }
        Commands::Logout => cmd_logout(AuthService::new(ctx), &mut session),
        Commands::Status => cmd_status(AuthService::new(ctx), &session),
        Commands::Feeds => cmd_feeds(FeedService::new(ctx), &mut session),
        Commands::AddFeed { url, name } => {
            cmd_add_feed(FeedService::new(ctx), &mut session, &url, name.as_deref())
        }
        Commands::RemoveFeed { feed_id, yes } => {
            cmd_remove_feed(FeedService::new(ctx), &mut session, &feed_id, yes)
        }
        Commands::Refresh => cmd_refresh(FeedService::new(ctx), &mut session),
        Commands::Articles {
            feed_id,
            limit,
            verbose,
            links,
        } => cmd_articles(
            ArticleService::new(ctx),
            &mut session,
            feed_id.as_deref(),
            limit as usize,
            verbose,
            links,
        ),
        Commands::Read { number, feed_id } => {
            cmd_read(ArticleService::new(ctx), &mut session, &number, feed_id.as_deref())
        }
        Commands::Config { url } => cmd_config(&ctx.store, &mut session, &url),
    }
}

fn cmd_login(
    service: Auth,
    session: &mut Session,
    username: Option<String>,
    password: Option<String>,
) -> RatReaderResult<()> {
    let name = service.login(session, username, password)?;
    println!("Logged in as {}", name);
    Ok(())
}

fn cmd_register(
    service: Auth,
    session: &mut Session,
    username: Option<String>,
    password: Option<String>,
) -> RatReaderResult<()> {
    let name = service.register(session, username, password)?;
    println!("Registered and logged in as {}", name);
    Ok(())
}

fn cmd_logout(service: Auth, session: &mut Session) -> RatReaderResult<()> {
    service.logout(session)?;
    println!("Logged out");
    Ok(())
}

fn cmd_status(service: Auth, session: &Session) -> RatReaderResult<()> {
    let status = service.status(session);

    match status.username {
        Some(name) => println!("Logged in as: {}", name),
        None => println!("Not logged in"),
    }
    println!("API URL: {}", status.api_url.as_deref().unwrap_or("not set"));

    Ok(())
}

fn cmd_feeds(service: Feeds, session: &mut Session) -> RatReaderResult<()> {
    let feeds = service.list(session)?;

    if feeds.is_empty() {
        println!("No feeds yet. Add one with: ratreader add-feed <url>");
        return Ok(());
    }

    print_feed_table(&feeds);
    Ok(())
}

fn print_feed_table(feeds: &[Feed]) {
    let id_width = feeds
        .iter()
        .map(|f| f.id.chars().count())
        .chain(std::iter::once(2))
        .max()
        .unwrap_or(2);
    let name_width = feeds
        .iter()
        .map(|f| f.name.chars().count())
        .chain(std::iter::once(4))
        .max()
        .unwrap_or(4);

    println!("Your feeds:\n");
    println!("  {:>id_width$}  {:<name_width$}  URL", "ID", "Name");
    for feed in feeds {
        println!(
            "  {:>id_width$}  {:<name_width$}  {}",
            feed.id,
            feed.name,
            feed.short_url(FEED_URL_WIDTH)
        );
    }
}

fn cmd_add_feed(
    service: Feeds,
    session: &mut Session,
    url: &str,
    name: Option<&str>,
) -> RatReaderResult<()> {
    let added = service.add(session, url, name)?;
    println!("Added feed: {}", added);
    Ok(())
}

fn cmd_remove_feed(
    service: Feeds,
    session: &mut Session,
    feed_id: &str,
    yes: bool,
) -> RatReaderResult<()> {
    if service.remove(session, feed_id, yes)? {
        println!("Feed removed");
    } else {
        println!("Cancelled.");
    }
    Ok(())
}

fn cmd_refresh(service: Feeds, session: &mut Session) -> RatReaderResult<()> {
    match service.refresh(session)? {
        Some(count) => println!("Refreshed {} feeds", count),
        None => println!("Refresh requested"),
    }
    Ok(())
}

fn cmd_articles(
    service: Articles,
    session: &mut Session,
    feed_id: Option<&str>,
    limit: usize,
    verbose: bool,
    links: bool,
) -> RatReaderResult<()> {
    let articles = service.list(session, feed_id, limit)?;

    if articles.is_empty() {
        println!("No articles found");
        return Ok(());
    }

    for (i, article) in articles.iter().enumerate() {
        print_article_entry(i + 1, article, verbose, links);
    }

    println!("\nShowing {} articles", articles.len());
    Ok(())
}

fn print_article_entry(number: usize, article: &Article, verbose: bool, links: bool) {
    println!("\n{}. {}", number, article.title());
    println!("   {} • {}", article.feed_name(), article.display_date());

    if verbose {
        if let Some(summary) = article.summary(SUMMARY_CHARS) {
            println!("   {}", summary);
        }
    }

    if links {
        println!("   {}", article.link());
    }
}

fn cmd_read(
    service: Articles,
    session: &mut Session,
    number: &str,
    feed_id: Option<&str>,
) -> RatReaderResult<()> {
    let article = service.read(session, number, feed_id)?;

    println!("{}", article.title());
    println!("{} • {}", article.feed_name(), article.display_date());
    println!("\n{}\n", article.body());
    println!("{}", article.link());

    Ok(())
}

fn cmd_config(store: &JsonSessionStore, session: &mut Session, url: &str) -> RatReaderResult<()> {
    let url = configure_api_url(store, session, url)?;
    println!("API URL set to: {}", url);
    Ok(())
}
