use std::env;

use chrono::Local;
use mailbox::{
    index::{http::HttpShardSource, load::IndexLoader},
    list::cache::FolderCache,
    permalink::Permalink,
    storage::MemoryStore,
    Mailbox, MailboxConfig,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = MailboxConfig {
        base_url: Some(env::var("BASE_URL").unwrap_or("http://localhost:8000".into())),
        ..Default::default()
    };
    let name = env::args().nth(1).unwrap_or("bailey-s".into());

    let loader = IndexLoader::new(HttpShardSource::new(config.base_url()));
    let mailbox = Mailbox::load(&loader, &name, config)
        .await
        .unwrap();

    println!("{}", mailbox.title());

    let mut state = mailbox.resolve(&Permalink::default());
    if let Some(term) = env::args().nth(2) {
        state.search(term);
    }

    let listing = mailbox.folder_listing(&state);
    for folder in listing.special.iter().chain(&listing.regular) {
        println!("  {} ({})", folder.display_name(), folder.count);
    }

    let flags = mailbox.flags(MemoryStore::new());
    let page = mailbox.list(&state, &mut FolderCache::new());
    println!();
    println!("{}", page.summary());

    for row in page.rows(&flags, Local::now().naive_local()) {
        println!("{:>8}  {:<24}  {:<48}  {}", row.id, row.from, row.subject, row.date);
    }

    if let Some(message) = page.empty_message() {
        println!("{message}");
    }

    let calendar = mailbox.calendar(Local::now().date_naive());
    println!();
    println!("{} ({} events)", calendar.title(), mailbox.events().len());
}
